//! DELETE builder.

use oxide_bind_core::dialect::Dialect;
use oxide_bind_core::{Arg, DeleteFrom, ToSqlValue};

use super::ID_COLUMN;
use crate::dialect_executor::DialectExecutor;
use crate::error::Result;
use crate::executor::SqlExecutor;

/// Builds and runs a DELETE. Every terminal requires a WHERE clause.
pub struct DeleteBuilder<'a, E, D> {
    db: &'a DialectExecutor<E, D>,
    table: String,
}

impl<'a, E: SqlExecutor, D: Dialect> DeleteBuilder<'a, E, D> {
    pub(crate) fn new(db: &'a DialectExecutor<E, D>, table: &str) -> Self {
        Self {
            db,
            table: String::from(table),
        }
    }

    /// Deletes rows matching `clause`, flattening list arguments.
    pub async fn where_clause<I>(self, clause: &str, args: I) -> Result<u64>
    where
        I: IntoIterator<Item = Arg>,
    {
        let delete = DeleteFrom::filtered(self.table, clause, args)?;
        self.db.execute_delete(&delete).await
    }

    /// Deletes the row whose `id` equals `id`.
    pub async fn where_id_eq<V: ToSqlValue>(self, id: V) -> Result<u64> {
        self.where_clause(&format!("{ID_COLUMN} = ?"), [Arg::from(id)]).await
    }

    /// Deletes every row whose `id` is in `ids`.
    pub async fn where_id_in<I>(self, ids: I) -> Result<u64>
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        self.where_clause(&format!("{ID_COLUMN} IN (?)"), [Arg::list(ids)]).await
    }
}
