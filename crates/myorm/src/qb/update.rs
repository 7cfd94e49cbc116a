//! UPDATE statement builder.

use crate::error::{OrmError, OrmResult};
use crate::executor::Record;
use crate::ident;
use crate::value::Value;

/// UPDATE statement builder, keyed on the identifier column.
#[derive(Debug, Clone)]
pub struct UpdateQb {
    table: String,
    fields: Record,
    key: Option<Value>,
}

impl UpdateQb {
    /// Create a new UPDATE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            fields: Record::new(),
            key: None,
        }
    }

    /// Set one column value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(column.to_string(), value.into());
        self
    }

    /// Set every column from the record, in its insertion order.
    pub fn record(mut self, record: &Record) -> Self {
        for (column, value) in record {
            self.fields.insert(column.clone(), value.clone());
        }
        self
    }

    /// Key the UPDATE on the identifier column.
    pub fn key(mut self, id: impl Into<Value>) -> Self {
        self.key = Some(id.into());
        self
    }

    /// Build the SQL text; SET clauses follow the record's insertion
    /// order. UPDATE requires at least one SET column and a key.
    pub fn build_sql(&self) -> OrmResult<String> {
        if self.fields.is_empty() {
            return Err(OrmError::validation("UPDATE requires at least one SET column"));
        }
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| OrmError::validation("UPDATE requires an identifier"))?;

        let mut sql = String::from("UPDATE ");
        ident::write_quoted(&self.table, &mut sql);
        sql.push_str(" SET ");
        for (i, (column, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            ident::write_quoted(column, &mut sql);
            sql.push_str(" = ");
            sql.push_str(&value.to_sql_literal());
        }
        sql.push_str(" WHERE ");
        super::write_key_predicate(&mut sql, super::ID_FIELD, key);
        Ok(sql)
    }
}
