//! Typed SQL values and literal sanitization.
//!
//! [`Value`] is a closed enumeration over the value kinds the query
//! builders understand, so the choice of comparison operator and literal
//! form is an exhaustive `match` rather than runtime type inspection.
//!
//! Structured values are shared handles ([`ObjectRef`]) and may reach
//! themselves through their own fields; [`Value::to_json`] detects that
//! with a stack of in-progress ancestors and substitutes the
//! `"[Circular ~]"` placeholder instead of recursing forever.

use std::fmt::Write as _;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;

/// A shared, possibly self-referencing structured value.
pub type ObjectRef = Arc<RwLock<IndexMap<String, Value>>>;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const CIRCULAR_PLACEHOLDER: &str = "[Circular ~]";

/// An application value headed for SQL text.
#[derive(Debug, Clone)]
pub enum Value {
    /// SQL NULL; as a criteria value it requests an `IS NULL` predicate
    Null,
    /// Integer, rendered unquoted
    Int(i64),
    /// Floating point, rendered unquoted
    Float(f64),
    /// String, rendered single-quoted with metacharacters escaped
    Text(String),
    /// Date/time, rendered as `'YYYY-MM-DD HH:mm:ss'`
    DateTime(NaiveDateTime),
    /// Sequence, serialized to JSON and treated as a string
    List(Vec<Value>),
    /// Mapping, serialized to JSON and treated as a string
    Object(ObjectRef),
}

impl Value {
    /// Wrap a field map in a shared object handle.
    pub fn object(fields: IndexMap<String, Value>) -> Self {
        Value::Object(Arc::new(RwLock::new(fields)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value compares with `=` in predicates.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Render this value as a SQL literal fragment.
    ///
    /// Pure: no side effects, same input always yields the same text.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(s) => quote_str(s),
            Value::DateTime(dt) => format!("'{}'", dt.format(DATETIME_FORMAT)),
            Value::List(_) | Value::Object(_) => quote_str(&self.to_json()),
        }
    }

    /// Serialize this value to compact JSON text.
    ///
    /// Any object that is an ancestor of itself in the containment chain
    /// is replaced with the `"[Circular ~]"` string; sibling fields keep
    /// serializing normally, so the output always parses.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        let mut ancestors = Vec::new();
        write_json(self, &mut out, &mut ancestors);
        out
    }
}

/// Single-quote a string literal, escaping MySQL metacharacters so the
/// fragment cannot terminate the literal early.
pub fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1a}' => out.push_str("\\Z"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

fn write_json(value: &Value, out: &mut String, ancestors: &mut Vec<*const ()>) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Int(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Float(v) => {
            let _ = write!(out, "{v}");
        }
        Value::Text(s) => write_json_string(s, out),
        Value::DateTime(dt) => {
            let _ = write!(out, "\"{}\"", dt.format(DATETIME_FORMAT));
        }
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(item, out, ancestors);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            let ptr = Arc::as_ptr(obj) as *const ();
            if ancestors.contains(&ptr) {
                write_json_string(CIRCULAR_PLACEHOLDER, out);
                return;
            }
            ancestors.push(ptr);
            let fields = obj.read().unwrap_or_else(|e| e.into_inner());
            out.push('{');
            for (i, (name, field)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(name, out);
                out.push(':');
                write_json(field, out, ancestors);
            }
            out.push('}');
            ancestors.pop();
        }
    }
}

fn write_json_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Object identity, not deep equality: handles may be cyclic.
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v.naive_utc())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Int(i64::from(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}
