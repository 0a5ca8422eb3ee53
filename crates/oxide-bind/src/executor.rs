//! The execution capability the dialect executor drives.
//!
//! Implementations own connections, prepared statements and transactions.
//! Every method receives SQL with positional `?` placeholders and exactly one
//! parameter per placeholder.

use std::future::Future;

use oxide_bind_core::{Row, SqlValue};

/// Runs SQL against a database.
pub trait SqlExecutor: Send + Sync {
    /// Error reported by the underlying driver.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes a statement without parameters.
    fn execute(&self, sql: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Executes a mutation and returns the affected row count.
    fn execute_update(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Executes a query and returns every row.
    fn execute_query(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send;

    /// Executes `sql` once per parameter set, returning per-set counts.
    fn execute_batch_update(
        &self,
        sql: &str,
        param_sets: &[Vec<SqlValue>],
    ) -> impl Future<Output = Result<Vec<u64>, Self::Error>> + Send;

    /// Executes an insert and returns the driver-reported generated key.
    fn execute_update_returning_generated_key(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> impl Future<Output = Result<Option<SqlValue>, Self::Error>> + Send;

    /// Executes an insert once per parameter set, returning the generated
    /// keys of each set in order.
    fn execute_batch_returning_generated_keys(
        &self,
        sql: &str,
        param_sets: &[Vec<SqlValue>],
    ) -> impl Future<Output = Result<Vec<Vec<SqlValue>>, Self::Error>> + Send;
}
