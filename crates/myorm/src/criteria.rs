//! Criteria and ordering specifications for query building.
//!
//! Both mappings preserve insertion order; entry order fixes the order of
//! the generated WHERE predicates and ORDER BY terms.

use indexmap::IndexMap;

use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// Sort direction for ORDER BY clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parse a direction token, case-insensitively.
    ///
    /// Anything outside {ASC, DESC} is a validation error; builders call
    /// this before emitting a statement, so a bad token never reaches the
    /// executor.
    pub fn parse(token: &str) -> OrmResult<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(OrmError::validation(format!(
                "Invalid ordering direction '{token}' (expected ASC or DESC)"
            )))
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Ordered field-to-value mapping that becomes WHERE predicates.
///
/// The value's kind picks the comparison operator: numeric values compare
/// with `=`, null requests `IS NULL`, everything else matches with `LIKE`.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    entries: IndexMap<String, Value>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, consuming and returning self for chaining.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add an entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Value>> for Criteria {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered field-to-direction mapping that becomes an ORDER BY clause.
///
/// Direction tokens stay raw until build time, so malformed input fails
/// inside the builder, before any statement exists.
#[derive(Debug, Clone, Default)]
pub struct OrderBy {
    entries: IndexMap<String, String>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, consuming and returning self for chaining.
    pub fn field(mut self, name: impl Into<String>, direction: impl Into<String>) -> Self {
        self.entries.insert(name.into(), direction.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order, directions still unvalidated.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
