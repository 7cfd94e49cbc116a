//! Convenient imports for typical `myorm` usage.
//!
//! ```ignore
//! use myorm::prelude::*;
//! ```

pub use crate::{
    Criteria, Dao, Direction, Executor, OrderBy, OrmError, OrmResult, Record, StatementOutcome,
    Value,
};

pub use crate::{MysqlExecutor, create_pool, create_pool_with_config};
