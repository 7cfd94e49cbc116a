//! The executor seam between record operations and the database.
//!
//! Everything below this trait (transport, retries, pooling limits) is the
//! driver's business; the core only ever hands over one SQL string and
//! receives one outcome.

use indexmap::IndexMap;

use crate::error::OrmResult;
use crate::value::Value;

/// One row, or one insert/update payload: an ordered field-to-value map.
pub type Record = IndexMap<String, Value>;

/// The result of executing one statement.
#[derive(Debug, Clone, Default)]
pub struct StatementOutcome {
    /// Result rows, for SELECTs
    pub rows: Vec<Record>,
    /// Rows touched, for mutations
    pub affected_rows: u64,
    /// Identifier assigned by the database, when it reports one
    pub last_insert_id: Option<u64>,
}

impl StatementOutcome {
    /// Outcome carrying only rows.
    pub fn with_rows(rows: Vec<Record>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }
}

/// Runs one SQL string against the database.
///
/// [`Dao`](crate::Dao) is generic over this trait, so tests inject an
/// in-memory double here instead of patching a live connection.
pub trait Executor: Send + Sync {
    /// Execute a statement and yield its rows or affected-row info.
    fn execute(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = OrmResult<StatementOutcome>> + Send;
}
