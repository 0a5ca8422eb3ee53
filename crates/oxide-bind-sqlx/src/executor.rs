//! SQLite executor.

use oxide_bind::SqlExecutor;
use oxide_bind_core::{Row, SqlValue};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use tracing::trace;

use crate::decode::decode_row;

/// Runs statements on a sqlx SQLite pool.
///
/// Batches run sequentially on a single pooled connection. Driver-reported
/// keys come from `last_insert_rowid()`.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
}

impl SqliteExecutor {
    /// Wraps an existing pool.
    ///
    /// In-memory databases exist per connection, so a `:memory:` pool
    /// should be limited to one connection.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`, e.g. `sqlite:app.db`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl SqlExecutor for SqliteExecutor {
    type Error = sqlx::Error;

    async fn execute(&self, sql: &str) -> Result<(), Self::Error> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn execute_update(&self, sql: &str, params: &[SqlValue]) -> Result<u64, Self::Error> {
        let result = prepare(sql, params).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, Self::Error> {
        let rows = prepare(sql, params).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute_batch_update(
        &self,
        sql: &str,
        param_sets: &[Vec<SqlValue>],
    ) -> Result<Vec<u64>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        trace!(sets = param_sets.len(), "Running batch");
        let mut counts = Vec::with_capacity(param_sets.len());
        for params in param_sets {
            let result = prepare(sql, params).execute(&mut *conn).await?;
            counts.push(result.rows_affected());
        }
        Ok(counts)
    }

    async fn execute_update_returning_generated_key(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Option<SqlValue>, Self::Error> {
        let result = prepare(sql, params).execute(&self.pool).await?;
        Ok((result.rows_affected() > 0).then_some(SqlValue::Int(result.last_insert_rowid())))
    }

    async fn execute_batch_returning_generated_keys(
        &self,
        sql: &str,
        param_sets: &[Vec<SqlValue>],
    ) -> Result<Vec<Vec<SqlValue>>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        trace!(sets = param_sets.len(), "Running batch with generated keys");
        let mut key_sets = Vec::with_capacity(param_sets.len());
        for params in param_sets {
            let result = prepare(sql, params).execute(&mut *conn).await?;
            let keys = if result.rows_affected() > 0 {
                vec![SqlValue::Int(result.last_insert_rowid())]
            } else {
                Vec::new()
            };
            key_sets.push(keys);
        }
        Ok(key_sets)
    }
}

fn prepare<'q>(sql: &'q str, params: &[SqlValue]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params.iter().cloned().fold(sqlx::query(sql), bind_param)
}

fn bind_param<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}
