//! INSERT statement builder.

use crate::error::{OrmError, OrmResult};
use crate::executor::Record;
use crate::ident;
use crate::value::Value;

/// INSERT statement builder.
#[derive(Debug, Clone)]
pub struct InsertQb {
    table: String,
    fields: Record,
}

impl InsertQb {
    /// Create a new INSERT builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            fields: Record::new(),
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

    /// Build the SQL text; column and value lists follow the record's
    /// insertion order.
    pub fn build_sql(&self) -> OrmResult<String> {
        if self.fields.is_empty() {
            return Err(OrmError::validation("INSERT requires at least one column"));
        }

        let mut sql = String::from("INSERT INTO ");
        ident::write_quoted(&self.table, &mut sql);
        sql.push_str(" (");
        for (i, column) in self.fields.keys().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            ident::write_quoted(column, &mut sql);
        }
        sql.push_str(") VALUES (");
        for (i, value) in self.fields.values().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&value.to_sql_literal());
        }
        sql.push(')');
        Ok(sql)
    }
}
