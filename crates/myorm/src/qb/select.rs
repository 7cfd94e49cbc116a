//! SELECT statement builder.

use crate::criteria::{Criteria, Direction, OrderBy};
use crate::error::OrmResult;
use crate::ident;
use crate::value::Value;

/// SELECT statement builder.
#[derive(Debug, Clone)]
pub struct SelectQb {
    table: String,
    criteria: Criteria,
    order: OrderBy,
    key: Option<Value>,
}

impl SelectQb {
    /// Create a new SELECT builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            criteria: Criteria::new(),
            order: OrderBy::new(),
            key: None,
        }
    }

    /// Filter by the given criteria, replacing any previous criteria.
    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Add one criteria entry.
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.criteria.insert(name, value);
        self
    }

    /// Filter on the identifier column instead of criteria.
    pub fn key(mut self, id: impl Into<Value>) -> Self {
        self.key = Some(id.into());
        self
    }

    /// Order results, replacing any previous ordering.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    /// Build the SQL text.
    ///
    /// Empty criteria and ordering yield a bare `SELECT * FROM ...`; the
    /// WHERE and ORDER BY clauses are absent, not empty. Ordering
    /// directions are validated here, before any statement exists.
    pub fn build_sql(&self) -> OrmResult<String> {
        let mut sql = String::from("SELECT * FROM ");
        ident::write_quoted(&self.table, &mut sql);

        if let Some(key) = &self.key {
            sql.push_str(" WHERE ");
            super::write_key_predicate(&mut sql, super::ID_FIELD, key);
        } else if !self.criteria.is_empty() {
            sql.push_str(" WHERE ");
            for (i, (field, value)) in self.criteria.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" AND ");
                }
                super::write_predicate(&mut sql, field, value);
            }
        }

        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, (field, token)) in self.order.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                let direction = Direction::parse(token)?;
                ident::write_quoted(field, &mut sql);
                sql.push(' ');
                sql.push_str(direction.as_sql());
            }
        }

        Ok(sql)
    }
}
