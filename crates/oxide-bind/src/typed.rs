//! Queries bound to a row mapper.

use std::marker::PhantomData;

use oxide_bind_core::dialect::Dialect;
use oxide_bind_core::{Arg, NamedArgs, Row};

use crate::dialect_executor::DialectExecutor;
use crate::error::Result;
use crate::executor::SqlExecutor;

/// A dialect executor paired with one row mapper.
///
/// ```rust,ignore
/// let users = db.typed(|row| Ok(User { id: row.get(0)?, name: row.get(1)? }));
/// let active = users.query("SELECT id, name FROM users WHERE active = ?", args![true]).await?;
/// let one = users.query_one("SELECT id, name FROM users WHERE id = ?", args![7]).await?;
/// ```
pub struct TypedQuery<'a, E, D, T, F> {
    db: &'a DialectExecutor<E, D>,
    mapper: F,
    _row: PhantomData<fn() -> T>,
}

impl<'a, E, D, T, F> TypedQuery<'a, E, D, T, F> {
    pub(crate) fn new(db: &'a DialectExecutor<E, D>, mapper: F) -> Self {
        Self {
            db,
            mapper,
            _row: PhantomData,
        }
    }
}

impl<E, D, T, F> TypedQuery<'_, E, D, T, F>
where
    E: SqlExecutor,
    D: Dialect,
    F: Fn(&Row) -> oxide_bind_core::Result<T>,
{
    /// Runs a query and maps every row.
    pub async fn query<I>(&self, sql: &str, args: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = Arg>,
    {
        self.db.query(sql, args, &self.mapper).await
    }

    /// Runs a query expected to return at most one row.
    pub async fn query_one<I>(&self, sql: &str, args: I) -> Result<Option<T>>
    where
        I: IntoIterator<Item = Arg>,
    {
        self.db.query_one(sql, args, &self.mapper).await
    }

    pub async fn query_named(&self, sql: &str, args: &NamedArgs) -> Result<Vec<T>> {
        self.db.query_named(sql, args, &self.mapper).await
    }

    pub async fn query_one_named(&self, sql: &str, args: &NamedArgs) -> Result<Option<T>> {
        self.db.query_one_named(sql, args, &self.mapper).await
    }
}
