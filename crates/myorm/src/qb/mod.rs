//! Statement builders: criteria in, sanitized SQL text out.
//!
//! One builder struct per statement kind, in the same shape:
//! `new(table)`, fluent setters, `build_sql() -> OrmResult<String>`.
//! Every literal goes through [`Value::to_sql_literal`] and every
//! identifier through [`crate::ident`]; raw caller text is never
//! interpolated into the statement.
//!
//! Safe defaults: INSERT and UPDATE require at least one column, UPDATE
//! requires a key, and DELETE requires a WHERE target. Building without
//! them is a validation error, never a broader statement.
//!
//! ```ignore
//! use myorm::qb;
//!
//! let sql = qb::select("users")
//!     .field("status", "active")
//!     .build_sql()?;
//! assert_eq!(sql, "SELECT * FROM `users` WHERE `status` LIKE 'active'");
//! ```

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use update::UpdateQb;

use crate::ident;
use crate::value::Value;

/// Create a SELECT builder for the given table.
pub fn select(table: &str) -> SelectQb {
    SelectQb::new(table)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder for the given table.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

/// Column the id-keyed operations filter on.
pub(crate) const ID_FIELD: &str = "id";

/// Render one WHERE predicate, dispatching the comparison operator on the
/// value's kind: numeric compares with `=`, null becomes `IS NULL`, and
/// everything else matches with `LIKE`.
pub(crate) fn write_predicate(out: &mut String, field: &str, value: &Value) {
    ident::write_quoted(field, out);
    match value {
        Value::Null => out.push_str(" IS NULL"),
        Value::Int(_) | Value::Float(_) => {
            out.push_str(" = ");
            out.push_str(&value.to_sql_literal());
        }
        _ => {
            out.push_str(" LIKE ");
            out.push_str(&value.to_sql_literal());
        }
    }
}

/// Render the identifier predicate used by keyed operations; identifier
/// comparison is always equality, whatever the value's kind.
pub(crate) fn write_key_predicate(out: &mut String, field: &str, value: &Value) {
    ident::write_quoted(field, out);
    out.push_str(" = ");
    out.push_str(&value.to_sql_literal());
}
