//! UPDATE builders.

use std::marker::PhantomData;

use oxide_bind_core::dialect::Dialect;
use oxide_bind_core::{
    flatten, row_fn, Arg, BatchUpdate, ColumnMap, RowFn, RowUpdate, SqlValue, ToSqlValue,
};

use super::{HasValues, NoValues, ID_COLUMN};
use crate::dialect_executor::DialectExecutor;
use crate::error::Result;
use crate::executor::SqlExecutor;

/// Builds and runs a single UPDATE.
pub struct RowUpdateBuilder<'a, E, D, S> {
    db: &'a DialectExecutor<E, D>,
    table: String,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
    _state: PhantomData<S>,
}

impl<'a, E, D> RowUpdateBuilder<'a, E, D, NoValues> {
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

impl<'a, E, D, S> RowUpdateBuilder<'a, E, D, S> {
    /// Adds a SET assignment bound to a parameter.
    #[must_use]
    pub fn set<V: ToSqlValue>(
        mut self,
        column: &str,
        value: V,
    ) -> RowUpdateBuilder<'a, E, D, HasValues> {
        self.raw_values.remove(column);
        self.values.insert(column, value.to_sql_value());
        self.bound()
    }

    /// Adds one parameter-bound SET assignment per pair, in order.
    #[must_use]
    pub fn set_all<I, K, V>(mut self, pairs: I) -> RowUpdateBuilder<'a, E, D, HasValues>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        for (column, value) in pairs {
            let column = column.as_ref();
            self.raw_values.remove(column);
            self.values.insert(column, value.to_sql_value());
        }
        self.bound()
    }

    /// Adds a SET assignment to a raw SQL expression, inlined verbatim.
    #[must_use]
    pub fn set_raw(mut self, column: &str, sql: &str) -> RowUpdateBuilder<'a, E, D, HasValues> {
        self.values.remove(column);
        self.raw_values.insert(column, String::from(sql));
        self.bound()
    }

    /// Adds one raw SET assignment per pair, in order.
    #[must_use]
    pub fn set_raw_all<I, K, R>(mut self, pairs: I) -> RowUpdateBuilder<'a, E, D, HasValues>
    where
        I: IntoIterator<Item = (K, R)>,
        K: AsRef<str>,
        R: Into<String>,
    {
        for (column, sql) in pairs {
            let column = column.as_ref();
            self.values.remove(column);
            self.raw_values.insert(column, sql.into());
        }
        self.bound()
    }

    fn bound(self) -> RowUpdateBuilder<'a, E, D, HasValues> {
        RowUpdateBuilder {
            db: self.db,
            table: self.table,
            values: self.values,
            raw_values: self.raw_values,
            _state: PhantomData,
        }
    }
}

impl<E: SqlExecutor, D: Dialect> RowUpdateBuilder<'_, E, D, HasValues> {
    /// Runs the update filtered by `clause`, flattening list arguments.
    ///
    /// SET parameters come first, then the WHERE parameters.
    pub async fn where_clause<I>(self, clause: &str, args: I) -> Result<u64>
    where
        I: IntoIterator<Item = Arg>,
    {
        let flat = flatten(clause, args)?;
        let update =
            RowUpdate::new(self.table, self.values, self.raw_values, flat.sql, flat.params)?;
        self.db.execute_update(&update).await
    }

    /// Runs the update on the row whose `id` equals `id`.
    pub async fn where_id_eq<V: ToSqlValue>(self, id: V) -> Result<u64> {
        self.where_clause(&format!("{ID_COLUMN} = ?"), [Arg::from(id)]).await
    }

    /// Runs the update on every row whose `id` is in `ids`.
    pub async fn where_id_in<I>(self, ids: I) -> Result<u64>
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        self.where_clause(&format!("{ID_COLUMN} IN (?)"), [Arg::list(ids)]).await
    }
}

/// Builds and runs an UPDATE once per row of a slice.
pub struct BatchUpdateBuilder<'a, E, D, T, S> {
    db: &'a DialectExecutor<E, D>,
    table: String,
    rows: &'a [T],
    mappings: ColumnMap<RowFn<'a, T>>,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
    _state: PhantomData<S>,
}

impl<'a, E, D, T> BatchUpdateBuilder<'a, E, D, T, NoValues> {
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

impl<'a, E, D, T, S> BatchUpdateBuilder<'a, E, D, T, S> {
    /// Sets `column` from a value computed per row.
    #[must_use]
    pub fn set_with<F, V>(
        mut self,
        column: &str,
        f: F,
    ) -> BatchUpdateBuilder<'a, E, D, T, HasValues>
    where
        F: Fn(&T) -> V + Send + Sync + 'a,
        V: ToSqlValue,
    {
        self.forget(column);
        self.mappings.insert(column, row_fn(f));
        self.bound()
    }

    /// Sets `column` to the same parameter for every row.
    #[must_use]
    pub fn set<V: ToSqlValue>(
        mut self,
        column: &str,
        value: V,
    ) -> BatchUpdateBuilder<'a, E, D, T, HasValues> {
        self.forget(column);
        self.values.insert(column, value.to_sql_value());
        self.bound()
    }

    /// Sets `column` to a raw SQL expression for every row, inlined verbatim.
    #[must_use]
    pub fn set_raw(
        mut self,
        column: &str,
        sql: &str,
    ) -> BatchUpdateBuilder<'a, E, D, T, HasValues> {
        self.forget(column);
        self.raw_values.insert(column, String::from(sql));
        self.bound()
    }

    fn forget(&mut self, column: &str) {
        self.mappings.remove(column);
        self.values.remove(column);
        self.raw_values.remove(column);
    }

    fn bound(self) -> BatchUpdateBuilder<'a, E, D, T, HasValues> {
        BatchUpdateBuilder {
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

impl<'a, E: SqlExecutor, D: Dialect, T: Sync> BatchUpdateBuilder<'a, E, D, T, HasValues> {
    /// Runs the batch with a WHERE clause whose `?` placeholders are bound, in
    /// order, from `mappings` applied to each row. Lists are not expanded.
    pub async fn where_clause_with(
        self,
        clause: &str,
        mappings: Vec<RowFn<'a, T>>,
    ) -> Result<Vec<u64>> {
        let batch = BatchUpdate::new(
            self.table,
            self.rows,
            self.mappings,
            self.values,
            self.raw_values,
            clause,
            mappings,
        )?;
        self.db.execute_batch_update(&batch).await
    }

    /// Runs the batch with a single-placeholder WHERE clause bound from `f`.
    pub async fn where_clause<F, V>(self, clause: &str, f: F) -> Result<Vec<u64>>
    where
        F: Fn(&T) -> V + Send + Sync + 'a,
        V: ToSqlValue,
    {
        self.where_clause_with(clause, vec![row_fn(f)]).await
    }

    /// Runs the batch matching each row by its `id`.
    pub async fn where_id_eq<F, V>(self, f: F) -> Result<Vec<u64>>
    where
        F: Fn(&T) -> V + Send + Sync + 'a,
        V: ToSqlValue,
    {
        self.where_clause(&format!("{ID_COLUMN} = ?"), f).await
    }
}
