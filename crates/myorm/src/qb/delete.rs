//! DELETE statement builder.

use crate::error::{OrmError, OrmResult};
use crate::ident;
use crate::value::Value;

/// What a DELETE filters on.
#[derive(Debug, Clone)]
enum Target {
    /// `WHERE `id` = <id>`
    ById(Value),
    /// Arbitrary field/value pair, type-dispatched predicate
    ByField(String, Value),
}

/// DELETE statement builder.
///
/// A target is mandatory; there is no delete-all form.
#[derive(Debug, Clone)]
pub struct DeleteQb {
    table: String,
    target: Option<Target>,
}

impl DeleteQb {
    /// Create a new DELETE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            target: None,
        }
    }

    /// Delete the row with the given identifier.
    pub fn by_id(mut self, id: impl Into<Value>) -> Self {
        self.target = Some(Target::ById(id.into()));
        self
    }

    /// Delete rows matching an arbitrary field/value pair.
    pub fn by_field(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.target = Some(Target::ByField(field.to_string(), value.into()));
        self
    }

    /// Build the SQL text.
    pub fn build_sql(&self) -> OrmResult<String> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| OrmError::validation("DELETE requires a WHERE target"))?;

        let mut sql = String::from("DELETE FROM ");
        ident::write_quoted(&self.table, &mut sql);
        sql.push_str(" WHERE ");
        match target {
            Target::ById(id) => super::write_key_predicate(&mut sql, super::ID_FIELD, id),
            Target::ByField(field, value) => super::write_predicate(&mut sql, field, value),
        }
        Ok(sql)
    }
}
