//! Plain SQL entry points with placeholder flattening.

use oxide_bind_core::dialect::Dialect;
use oxide_bind_core::{flatten, flatten_named, Arg, FromSqlValue, NamedArgs, Row};
use tracing::debug;

use crate::dialect_executor::{map_rows, single, DialectExecutor};
use crate::error::{Error, Result};
use crate::executor::SqlExecutor;
use crate::typed::TypedQuery;

impl<E: SqlExecutor, D: Dialect> DialectExecutor<E, D> {
    /// Executes a statement without parameters, such as DDL.
    pub async fn execute(&self, sql: &str) -> Result<()> {
        debug!(sql = %sql, "Executing statement");
        self.executor()
            .execute(sql)
            .await
            .map_err(Error::execution)
    }

    /// Executes a mutation, returning the affected row count.
    pub async fn update<I>(&self, sql: &str, args: I) -> Result<u64>
    where
        I: IntoIterator<Item = Arg>,
    {
        self.run_update(&flatten(sql, args)?).await
    }

    /// Executes a mutation with `:name` placeholders.
    pub async fn update_named(&self, sql: &str, args: &NamedArgs) -> Result<u64> {
        self.run_update(&flatten_named(sql, args)?).await
    }

    /// Runs a query and maps every row.
    pub async fn query<T, F, I>(&self, sql: &str, args: I, mapper: F) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = Arg>,
        F: Fn(&Row) -> oxide_bind_core::Result<T>,
    {
        let rows = self.fetch(&flatten(sql, args)?).await?;
        map_rows(&rows, mapper)
    }

    /// Runs a query with `:name` placeholders and maps every row.
    pub async fn query_named<T, F>(&self, sql: &str, args: &NamedArgs, mapper: F) -> Result<Vec<T>>
    where
        F: Fn(&Row) -> oxide_bind_core::Result<T>,
    {
        let rows = self.fetch(&flatten_named(sql, args)?).await?;
        map_rows(&rows, mapper)
    }

    /// Runs a query expected to return at most one row.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyRows`] when more than one row comes back.
    pub async fn query_one<T, F, I>(&self, sql: &str, args: I, mapper: F) -> Result<Option<T>>
    where
        I: IntoIterator<Item = Arg>,
        F: Fn(&Row) -> oxide_bind_core::Result<T>,
    {
        single(self.query(sql, args, mapper).await?)
    }

    /// Named-parameter form of [`query_one`](Self::query_one).
    pub async fn query_one_named<T, F>(
        &self,
        sql: &str,
        args: &NamedArgs,
        mapper: F,
    ) -> Result<Option<T>>
    where
        F: Fn(&Row) -> oxide_bind_core::Result<T>,
    {
        single(self.query_named(sql, args, mapper).await?)
    }

    /// Decodes the first column of every row, e.g. a list of ids or names.
    pub async fn query_scalars<T, I>(&self, sql: &str, args: I) -> Result<Vec<T>>
    where
        T: FromSqlValue,
        I: IntoIterator<Item = Arg>,
    {
        self.query(sql, args, |row| row.get(0)).await
    }

    /// Named-parameter form of [`query_scalars`](Self::query_scalars).
    pub async fn query_scalars_named<T: FromSqlValue>(
        &self,
        sql: &str,
        args: &NamedArgs,
    ) -> Result<Vec<T>> {
        self.query_named(sql, args, |row| row.get(0)).await
    }

    /// Decodes the first column of at most one row.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyRows`] when more than one row comes back.
    pub async fn query_scalar<T, I>(&self, sql: &str, args: I) -> Result<Option<T>>
    where
        T: FromSqlValue,
        I: IntoIterator<Item = Arg>,
    {
        single(self.query_scalars(sql, args).await?)
    }

    /// Named-parameter form of [`query_scalar`](Self::query_scalar).
    pub async fn query_scalar_named<T: FromSqlValue>(
        &self,
        sql: &str,
        args: &NamedArgs,
    ) -> Result<Option<T>> {
        single(self.query_scalars_named(sql, args).await?)
    }

    /// Binds a row mapper for repeated queries of the same shape.
    pub fn typed<T, F>(&self, mapper: F) -> TypedQuery<'_, E, D, T, F>
    where
        F: Fn(&Row) -> oxide_bind_core::Result<T>,
    {
        TypedQuery::new(self, mapper)
    }
}
