//! Dialect executor.
//!
//! Renders statement models for one dialect and hands them to a
//! [`SqlExecutor`], choosing the dialect's generated-key strategy.

use oxide_bind_core::dialect::{Dialect, KeyRetrieval, ReturnTarget};
use oxide_bind_core::{BatchInsert, BatchUpdate, DeleteFrom, Row, RowInsert, RowUpdate, Statement};
use tracing::{debug, trace};

use crate::builder::{
    BatchInsertBuilder, BatchUpdateBuilder, DeleteBuilder, NoValues, RowInsertBuilder,
    RowUpdateBuilder,
};
use crate::error::{Error, Result};
use crate::executor::SqlExecutor;
use crate::keys::{optional_key, required_key};

/// Executes statements for a fixed dialect.
pub struct DialectExecutor<E, D> {
    executor: E,
    dialect: D,
}

impl<E: SqlExecutor, D: Dialect> DialectExecutor<E, D> {
    /// Creates a new dialect executor.
    pub const fn new(executor: E, dialect: D) -> Self {
        Self { executor, dialect }
    }

    /// Returns the underlying executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Consumes the dialect executor, returning the underlying executor.
    pub fn into_inner(self) -> E {
        self.executor
    }

    // Fluent entry points

    /// Starts a single-row INSERT into `table`.
    pub fn insert_into(&self, table: &str) -> RowInsertBuilder<'_, E, D, NoValues> {
        trace!(table = %table, "Using [insert_into] builder");
        RowInsertBuilder::new(self, table)
    }

    /// Starts a batch INSERT into `table`, one row per element of `rows`.
    pub fn batch_insert_into<'a, T: Sync>(
        &'a self,
        table: &str,
        rows: &'a [T],
    ) -> BatchInsertBuilder<'a, E, D, T, NoValues> {
        trace!(table = %table, rows = rows.len(), "Using [batch_insert_into] builder");
        BatchInsertBuilder::new(self, table, rows)
    }

    /// Starts a single UPDATE on `table`.
    pub fn update_table(&self, table: &str) -> RowUpdateBuilder<'_, E, D, NoValues> {
        trace!(table = %table, "Using [update_table] builder");
        RowUpdateBuilder::new(self, table)
    }

    /// Starts a batch UPDATE on `table`, one execution per element of `rows`.
    pub fn batch_update<'a, T: Sync>(
        &'a self,
        table: &str,
        rows: &'a [T],
    ) -> BatchUpdateBuilder<'a, E, D, T, NoValues> {
        trace!(table = %table, rows = rows.len(), "Using [batch_update] builder");
        BatchUpdateBuilder::new(self, table, rows)
    }

    /// Starts a DELETE from `table`.
    pub fn delete_from(&self, table: &str) -> DeleteBuilder<'_, E, D> {
        trace!(table = %table, "Using [delete_from] builder");
        DeleteBuilder::new(self, table)
    }

    // Model execution

    /// Executes a single-row insert, returning the affected row count.
    pub async fn execute_insert(&self, insert: &RowInsert) -> Result<u64> {
        self.run_update(&insert.render(&self.dialect)).await
    }

    /// Executes a single-row insert and returns its generated key.
    ///
    /// `column` names the key column for dialects that return it explicitly;
    /// dialects with driver-reported keys ignore it. `Ok(None)` means the
    /// driver reported no key or a NULL one.
    pub async fn execute_insert_returning_key(
        &self,
        insert: &RowInsert,
        column: &str,
    ) -> Result<Option<i64>> {
        match self.dialect.key_retrieval() {
            KeyRetrieval::Implicit => {
                let stmt = insert.render(&self.dialect);
                debug!(sql = %stmt.sql, "Executing insert with generated key");
                let key = self
                    .executor
                    .execute_update_returning_generated_key(&stmt.sql, &stmt.params)
                    .await
                    .map_err(Error::execution)?;
                key.as_ref().map_or(Ok(None), optional_key)
            }
            KeyRetrieval::Returning | KeyRetrieval::OutputInserted => {
                let stmt = insert.render_returning(&self.dialect, ReturnTarget::Column(column));
                let rows = self.fetch(&stmt).await?;
                let row = rows.first().ok_or(Error::MissingGeneratedKey { row: 0 })?;
                row.value(0)
                    .map_or(Err(Error::MissingGeneratedKey { row: 0 }), optional_key)
            }
        }
    }

    /// Executes a single-row insert and maps the inserted row.
    ///
    /// Only dialects that can return whole rows (`RETURNING *` or
    /// `OUTPUT INSERTED.*`) support this.
    pub async fn execute_insert_returning_row<T, F>(
        &self,
        insert: &RowInsert,
        mapper: F,
    ) -> Result<Option<T>>
    where
        F: Fn(&Row) -> oxide_bind_core::Result<T>,
    {
        let expected = batch.rows().len();
        if self.dialect.key_retrieval() == KeyRetrieval::Implicit {
            let stmt = batch.render(&self.dialect);
            debug!(
                sql = %stmt.sql,
                rows = stmt.param_sets.len(),
                "Executing batch insert with generated keys"
            );
            let key_sets = self
                .executor
                .execute_batch_returning_generated_keys(&stmt.sql, &stmt.param_sets)
                .await
                .map_err(Error::execution)?;
            check_key_count(expected, key_sets.len())?;
            return key_sets
                .iter()
                .enumerate()
                .map(|(row, keys)| required_key(keys.first(), row))
                .collect();
        }

        let statements = batch.render_returning(&self.dialect, column);
        debug!(
            table = %batch.table(),
            rows = expected,
            statements = statements.len(),
            "Executing multi-row insert with generated keys"
        );
        let mut keys = Vec::with_capacity(expected);
        for stmt in &statements {
            for row in self.fetch(stmt).await? {
                keys.push(required_key(row.value(0), keys.len())?);
            }
        }
        check_key_count(expected, keys.len())?;
        Ok(keys)
    }

    /// Executes a single update, returning the affected row count.
    pub async fn execute_update(&self, update: &RowUpdate) -> Result<u64> {
        self.run_update(&update.render(&self.dialect)).await
    }

    /// Executes a batch update, returning one count per row.
    ///
    /// No statement is issued for an empty batch.
    pub async fn execute_batch_update<T: Sync>(
        &self,
        batch: &BatchUpdate<'_, T>,
    ) -> Result<Vec<u64>> {
        if batch.rows().is_empty() {
            debug!(table = %batch.table(), "No rows in batch update");
            return Ok(Vec::new());
        }
        let stmt = batch.render(&self.dialect);
        debug!(sql = %stmt.sql, rows = stmt.param_sets.len(), "Executing batch update");
        self.executor
            .execute_batch_update(&stmt.sql, &stmt.param_sets)
            .await
            .map_err(Error::execution)
    }

    /// Executes a delete, returning the affected row count.
    pub async fn execute_delete(&self, delete: &DeleteFrom) -> Result<u64> {
        self.run_update(&delete.render(&self.dialect)).await
    }

    pub(crate) async fn run_update(&self, stmt: &Statement) -> Result<u64> {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "Executing update");
        self.executor
            .execute_update(&stmt.sql, &stmt.params)
            .await
            .map_err(Error::execution)
    }

    pub(crate) async fn fetch(&self, stmt: &Statement) -> Result<Vec<Row>> {
        debug!(sql = %stmt.sql, params = stmt.params.len(), "Executing query");
        self.executor
            .execute_query(&stmt.sql, &stmt.params)
            .await
            .map_err(Error::execution)
    }
}

/// Applies `mapper` to every row.
pub(crate) fn map_rows<T, F>(rows: &[Row], mapper: F) -> Result<Vec<T>>
where
    F: Fn(&Row) -> oxide_bind_core::Result<T>,
{
    rows.iter()
        .map(|row| mapper(row).map_err(Error::from))
        .collect()
}

/// At most one item, or [`Error::TooManyRows`].
pub(crate) fn single<T>(mut items: Vec<T>) -> Result<Option<T>> {
    if items.len() > 1 {
        return Err(Error::TooManyRows(items.len()));
    }
    Ok(items.pop())
}

/// Requires exactly one generated key per inserted row.
fn check_key_count(expected: usize, found: usize) -> Result<()> {
    match found.cmp(&expected) {
        std::cmp::Ordering::Less => Err(Error::MissingGeneratedKey { row: found }),
        std::cmp::Ordering::Greater => Err(Error::UnexpectedGeneratedKeys { expected, found }),
        std::cmp::Ordering::Equal => Ok(()),
    }
}
