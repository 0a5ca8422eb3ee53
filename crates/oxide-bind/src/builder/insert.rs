//! INSERT builders.

use std::marker::PhantomData;

use oxide_bind_core::dialect::Dialect;
use oxide_bind_core::{row_fn, BatchInsert, ColumnMap, Row, RowFn, RowInsert, SqlValue, ToSqlValue};

use super::{HasValues, NoValues};
use crate::dialect_executor::DialectExecutor;
use crate::error::Result;
use crate::executor::SqlExecutor;

/// Builds and runs a single-row INSERT.
pub struct RowInsertBuilder<'a, E, D, S> {
    db: &'a DialectExecutor<E, D>,
    table: String,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
    _state: PhantomData<S>,
}

impl<'a, E, D> RowInsertBuilder<'a, E, D, NoValues> {
    pub(crate) fn new(db: &'a DialectExecutor<E, D>, table: &str) -> Self {
        Self {
            db,
            table: String::from(table),
            values: ColumnMap::new(),
            raw_values: ColumnMap::new(),
            _state: PhantomData,
        }
    }
}

impl<'a, E, D, S> RowInsertBuilder<'a, E, D, S> {
    /// Binds `column` to a parameter.
    #[must_use]
    pub fn value<V: ToSqlValue>(
        mut self,
        column: &str,
        value: V,
    ) -> RowInsertBuilder<'a, E, D, HasValues> {
        self.raw_values.remove(column);
        self.values.insert(column, value.to_sql_value());
        self.bound()
    }

    /// Sets `column` to a raw SQL expression such as `NOW()`, inlined verbatim.
    #[must_use]
    pub fn value_raw(mut self, column: &str, sql: &str) -> RowInsertBuilder<'a, E, D, HasValues> {
        self.values.remove(column);
        self.raw_values.insert(column, String::from(sql));
        self.bound()
    }

    fn bound(self) -> RowInsertBuilder<'a, E, D, HasValues> {
        RowInsertBuilder {
            db: self.db,
            table: self.table,
            values: self.values,
            raw_values: self.raw_values,
            _state: PhantomData,
        }
    }
}

impl<E: SqlExecutor, D: Dialect> RowInsertBuilder<'_, E, D, HasValues> {
    fn build(self) -> Result<RowInsert> {
        Ok(RowInsert::new(self.table, self.values, self.raw_values)?)
    }

    /// Runs the insert, returning the affected row count.
    pub async fn insert(self) -> Result<u64> {
        let db = self.db;
        db.execute_insert(&self.build()?).await
    }

    /// Runs the insert and returns the generated key of `column`.
    ///
    /// See [`DialectExecutor::execute_insert_returning_key`].
    pub async fn insert_returning_key(self, column: &str) -> Result<Option<i64>> {
        let db = self.db;
        db.execute_insert_returning_key(&self.build()?, column).await
    }

    /// Runs the insert and maps the inserted row.
    ///
    /// See [`DialectExecutor::execute_insert_returning_row`].
    pub async fn insert_returning<T, F>(self, mapper: F) -> Result<Option<T>>
    where
        F: Fn(&Row) -> oxide_bind_core::Result<T>,
    {
        let db = self.db;
        db.execute_insert_returning_row(&self.build()?, mapper).await
    }
}

/// Builds and runs a batch INSERT over a slice of rows.
pub struct BatchInsertBuilder<'a, E, D, T, S> {
    db: &'a DialectExecutor<E, D>,
    table: String,
    rows: &'a [T],
    mappings: ColumnMap<RowFn<'a, T>>,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
    _state: PhantomData<S>,
}

impl<'a, E, D, T> BatchInsertBuilder<'a, E, D, T, NoValues> {
    pub(crate) fn new(db: &'a DialectExecutor<E, D>, table: &str, rows: &'a [T]) -> Self {
        Self {
            db,
            table: String::from(table),
            rows,
            mappings: ColumnMap::new(),
            values: ColumnMap::new(),
            raw_values: ColumnMap::new(),
            _state: PhantomData,
        }
    }
}

impl<'a, E, D, T, S> BatchInsertBuilder<'a, E, D, T, S> {
    /// Binds `column` to a value computed from each row.
    #[must_use]
    pub fn value_with<F, V>(
        mut self,
        column: &str,
        f: F,
    ) -> BatchInsertBuilder<'a, E, D, T, HasValues>
    where
        F: Fn(&T) -> V + Send + Sync + 'a,
        V: ToSqlValue,
    {
        self.forget(column);
        self.mappings.insert(column, row_fn(f));
        self.bound()
    }

    /// Binds `column` to the same parameter for every row.
    #[must_use]
    pub fn value<V: ToSqlValue>(
        mut self,
        column: &str,
        value: V,
    ) -> BatchInsertBuilder<'a, E, D, T, HasValues> {
        self.forget(column);
        self.values.insert(column, value.to_sql_value());
        self.bound()
    }

    /// Sets `column` to a raw SQL expression for every row, inlined verbatim.
    #[must_use]
    pub fn value_raw(
        mut self,
        column: &str,
        sql: &str,
    ) -> BatchInsertBuilder<'a, E, D, T, HasValues> {
        self.forget(column);
        self.raw_values.insert(column, String::from(sql));
        self.bound()
    }

    fn forget(&mut self, column: &str) {
        self.mappings.remove(column);
        self.values.remove(column);
        self.raw_values.remove(column);
    }

    fn bound(self) -> BatchInsertBuilder<'a, E, D, T, HasValues> {
        BatchInsertBuilder {
            db: self.db,
            table: self.table,
            rows: self.rows,
            mappings: self.mappings,
            values: self.values,
            raw_values: self.raw_values,
            _state: PhantomData,
        }
    }
}

impl<'a, E: SqlExecutor, D: Dialect, T: Sync> BatchInsertBuilder<'a, E, D, T, HasValues> {
    fn build(self) -> Result<BatchInsert<'a, T>> {
        Ok(BatchInsert::new(
            self.table,
            self.rows,
            self.mappings,
            self.values,
            self.raw_values,
        )?)
    }

    /// Runs the batch, returning one affected count per row.
    pub async fn insert(self) -> Result<Vec<u64>> {
        let db = self.db;
        db.execute_batch_insert(&self.build()?).await
    }

    /// Runs the batch and returns one generated key per row, in row order.
    ///
    /// See [`DialectExecutor::execute_batch_insert_returning_keys`].
    pub async fn insert_returning_keys(self, column: &str) -> Result<Vec<i64>> {
        let db = self.db;
        db.execute_batch_insert_returning_keys(&self.build()?, column).await
    }
}
