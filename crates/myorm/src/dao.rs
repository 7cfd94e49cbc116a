//! Record operations over an [`Executor`].
//!
//! Each operation composes its statement synchronously (so two concurrent
//! calls never interleave partial SQL text), runs it through the injected
//! executor, and resolves to exactly one outcome: a payload or an error.

use crate::criteria::{Criteria, OrderBy};
use crate::error::{OrmError, OrmResult};
use crate::executor::{Executor, Record, StatementOutcome};
use crate::qb;
use crate::value::Value;

/// The CRUD surface.
///
/// Holds the executor by value; operations borrow it per statement and
/// never across statements.
pub struct Dao<E: Executor> {
    executor: E,
}

impl<E: Executor> Dao<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Access the underlying executor, e.g. to disconnect a pool.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    async fn run(&self, sql: String) -> OrmResult<StatementOutcome> {
        tracing::debug!(%sql, "executing statement");
        self.executor.execute(&sql).await
    }

    /// Fetch the row with the given identifier.
    ///
    /// Returns `Ok(None)` when no row matches and `Ok(Some(record))` for
    /// exactly one. More than one match is a consistency violation the
    /// caller must hear about, not a tie to break silently:
    /// [`OrmError::MultipleRows`].
    pub async fn find(&self, id: impl Into<Value>, table: &str) -> OrmResult<Option<Record>> {
        let sql = qb::select(table).key(id).build_sql()?;
        let mut outcome = self.run(sql).await?;
        match outcome.rows.len() {
            0 => Ok(None),
            1 => Ok(outcome.rows.pop()),
            _ => Err(OrmError::MultipleRows),
        }
    }

    /// Fetch all rows matching the criteria, in the given order.
    pub async fn find_by(
        &self,
        criteria: Criteria,
        order: OrderBy,
        table: &str,
    ) -> OrmResult<Vec<Record>> {
        let sql = qb::select(table)
            .criteria(criteria)
            .order_by(order)
            .build_sql()?;
        Ok(self.run(sql).await?.rows)
    }

    /// Fetch every row of the table, in the given order.
    pub async fn find_all(&self, order: OrderBy, table: &str) -> OrmResult<Vec<Record>> {
        self.find_by(Criteria::new(), order, table).await
    }

    /// Fetch the first row matching the criteria, if any. No uniqueness
    /// check; use [`Dao::find`] for that.
    pub async fn find_one_by(
        &self,
        criteria: Criteria,
        table: &str,
    ) -> OrmResult<Option<Record>> {
        let sql = qb::select(table).criteria(criteria).build_sql()?;
        let mut rows = self.run(sql).await?.rows;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    /// Insert a record and return it enriched with the assigned
    /// identifier, when the database reports one.
    pub async fn insert_object(&self, table: &str, mut record: Record) -> OrmResult<Record> {
        let sql = qb::insert(table).record(&record).build_sql()?;
        let outcome = self.run(sql).await?;
        if let Some(id) = outcome.last_insert_id {
            record.insert(qb::ID_FIELD.to_string(), Value::Int(id as i64));
        }
        Ok(record)
    }

    /// Update the identified row's columns. Success is the absence of an
    /// error; a zero-row match is not treated as a failure.
    pub async fn update_object(
        &self,
        id: impl Into<Value>,
        table: &str,
        fields: Record,
    ) -> OrmResult<()> {
        let sql = qb::update(table).record(&fields).key(id).build_sql()?;
        let outcome = self.run(sql).await?;
        if outcome.affected_rows == 0 {
            tracing::debug!(table, "update matched no rows");
        }
        Ok(())
    }

    /// Delete the identified row.
    pub async fn delete(&self, id: impl Into<Value>, table: &str) -> OrmResult<()> {
        let sql = qb::delete(table).by_id(id).build_sql()?;
        let outcome = self.run(sql).await?;
        if outcome.affected_rows == 0 {
            tracing::debug!(table, "delete matched no rows");
        }
        Ok(())
    }

    /// Delete rows matching an arbitrary field/value pair.
    pub async fn delete_by(
        &self,
        field: &str,
        value: impl Into<Value>,
        table: &str,
    ) -> OrmResult<()> {
        let sql = qb::delete(table).by_field(field, value).build_sql()?;
        self.run(sql).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Test double injected at the executor seam: serves one canned
    /// outcome and records every statement it was handed.
    #[derive(Default)]
    struct MockExecutor {
        outcome: Mutex<Option<OrmResult<StatementOutcome>>>,
        statements: Mutex<Vec<String>>,
    }

    impl MockExecutor {
        fn returning(outcome: StatementOutcome) -> Self {
            Self {
                outcome: Mutex::new(Some(Ok(outcome))),
                statements: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: OrmError) -> Self {
            Self {
                outcome: Mutex::new(Some(Err(err))),
                statements: Mutex::new(Vec::new()),
            }
        }

        fn statements(&self) -> Vec<String> {
            self.statements.lock().unwrap().clone()
        }
    }

    impl Executor for MockExecutor {
        fn execute(
            &self,
            sql: &str,
        ) -> impl std::future::Future<Output = OrmResult<StatementOutcome>> + Send {
            self.statements.lock().unwrap().push(sql.to_string());
            let result = self
                .outcome
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(StatementOutcome::default()));
            async move { result }
        }
    }

    fn row(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn find_with_zero_rows_is_none() {
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::default()));
        let found = dao.find(1, "demo").await.unwrap();
        assert!(found.is_none());
        assert_eq!(
            dao.executor().statements(),
            ["SELECT * FROM `demo` WHERE `id` = 1"]
        );
    }

    #[tokio::test]
    async fn find_with_one_row_returns_it() {
        let record = row(&[("id", Value::Int(1)), ("name", Value::from("a"))]);
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::with_rows(vec![
            record.clone(),
        ])));
        let found = dao.find(1, "demo").await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn find_with_multiple_rows_is_a_consistency_error() {
        let rows = vec![row(&[("id", Value::Int(1))]), row(&[("id", Value::Int(1))])];
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::with_rows(rows)));
        let err = dao.find(1, "demo").await.unwrap_err();
        assert!(err.is_multiple_rows());
        assert_eq!(err.to_string(), "Multiple rows found.");
    }

    #[tokio::test]
    async fn find_by_returns_all_rows() {
        let rows = vec![row(&[("n", Value::Int(1))]), row(&[("n", Value::Int(2))])];
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::with_rows(
            rows.clone(),
        )));
        let criteria = Criteria::new().field("status", "active");
        let order = OrderBy::new().field("n", "desc");
        let found = dao.find_by(criteria, order, "demo").await.unwrap();
        assert_eq!(found, rows);
        assert_eq!(
            dao.executor().statements(),
            ["SELECT * FROM `demo` WHERE `status` LIKE 'active' ORDER BY `n` DESC"]
        );
    }

    #[tokio::test]
    async fn find_all_selects_everything() {
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::default()));
        dao.find_all(OrderBy::new(), "demo").await.unwrap();
        assert_eq!(dao.executor().statements(), ["SELECT * FROM `demo`"]);
    }

    #[tokio::test]
    async fn find_one_by_takes_the_first_row_without_uniqueness_check() {
        let rows = vec![row(&[("n", Value::Int(1))]), row(&[("n", Value::Int(2))])];
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::with_rows(rows)));
        let found = dao
            .find_one_by(Criteria::new().field("n", 1), "demo")
            .await
            .unwrap();
        assert_eq!(found, Some(row(&[("n", Value::Int(1))])));
    }

    #[tokio::test]
    async fn insert_object_merges_assigned_id() {
        let dao = Dao::new(MockExecutor::returning(StatementOutcome {
            rows: Vec::new(),
            affected_rows: 1,
            last_insert_id: Some(7),
        }));
        let record = row(&[("lala", Value::Int(1)), ("test2", Value::from("demo"))]);
        let inserted = dao.insert_object("demo", record).await.unwrap();

        let fields: Vec<(&str, &Value)> =
            inserted.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(
            fields,
            [
                ("lala", &Value::Int(1)),
                ("test2", &Value::Text("demo".to_string())),
                ("id", &Value::Int(7)),
            ]
        );
        assert_eq!(
            dao.executor().statements(),
            ["INSERT INTO `demo` (`lala`, `test2`) VALUES (1, 'demo')"]
        );
    }

    #[tokio::test]
    async fn insert_object_without_reported_id_returns_record_unchanged() {
        let dao = Dao::new(MockExecutor::returning(StatementOutcome {
            rows: Vec::new(),
            affected_rows: 1,
            last_insert_id: None,
        }));
        let record = row(&[("lala", Value::Int(1))]);
        let inserted = dao.insert_object("demo", record.clone()).await.unwrap();
        assert_eq!(inserted, record);
    }

    #[tokio::test]
    async fn update_object_builds_keyed_update() {
        let dao = Dao::new(MockExecutor::returning(StatementOutcome {
            rows: Vec::new(),
            affected_rows: 1,
            last_insert_id: None,
        }));
        let fields = row(&[("lala", Value::Int(1)), ("test2", Value::from("demo"))]);
        dao.update_object(1, "demo", fields).await.unwrap();
        assert_eq!(
            dao.executor().statements(),
            ["UPDATE `demo` SET `lala` = 1, `test2` = 'demo' WHERE `id` = 1"]
        );
    }

    #[tokio::test]
    async fn delete_builds_keyed_delete() {
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::default()));
        dao.delete(1, "demo").await.unwrap();
        assert_eq!(
            dao.executor().statements(),
            ["DELETE FROM `demo` WHERE `id` = 1"]
        );
    }

    #[tokio::test]
    async fn delete_by_builds_like_predicate_for_strings() {
        let dao = Dao::new(MockExecutor::returning(StatementOutcome::default()));
        dao.delete_by("demo", "demo", "demo").await.unwrap();
        assert_eq!(
            dao.executor().statements(),
            ["DELETE FROM `demo` WHERE `demo` LIKE 'demo'"]
        );
    }

    #[tokio::test]
    async fn invalid_ordering_never_reaches_the_executor() {
        let dao = Dao::new(MockExecutor::default());
        let order = OrderBy::new().field("a", "sideways");
        let err = dao
            .find_by(Criteria::new(), order, "demo")
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(dao.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn executor_errors_pass_through_unmodified() {
        let dao = Dao::new(MockExecutor::failing(OrmError::connection(
            "connection refused",
        )));
        let err = dao.find(1, "demo").await.unwrap_err();
        assert!(matches!(err, OrmError::Connection(ref m) if m == "connection refused"));
    }
}
