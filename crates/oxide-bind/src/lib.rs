//! # oxide-bind
//!
//! Fluent INSERT/UPDATE/DELETE builders and query helpers over any database
//! driver that implements [`SqlExecutor`].
//!
//! A [`DialectExecutor`] pairs an executor with a [`Dialect`]. Builders
//! collect column bindings, flatten list arguments in WHERE clauses, render
//! SQL for the dialect and run it:
//!
//! ```rust,ignore
//! use oxide_bind::prelude::*;
//!
//! let db = DialectExecutor::new(executor, SqlServerDialect::new());
//!
//! let id = db
//!     .insert_into("users")
//!     .value("name", "alice")
//!     .value_raw("created_at", "GETDATE()")
//!     .insert_returning_key("id")
//!     .await?;
//!
//! let removed = db
//!     .delete_from("users")
//!     .where_clause("id IN (?)", args![list([5, 6, 7])])
//!     .await?;
//!
//! let names: Vec<String> = db
//!     .query_scalars("SELECT name FROM users WHERE active = ?", args![true])
//!     .await?;
//! ```
//!
//! Generated keys come back through the dialect's own idiom: driver-reported
//! keys for MySQL, `RETURNING` for PostgreSQL and SQLite, and
//! `OUTPUT INSERTED` for SQL Server, where large batches are split to respect
//! statement limits.

pub mod builder;
pub mod dialect_executor;
pub mod error;
pub mod executor;
mod keys;
mod query;
pub mod typed;

pub use dialect_executor::DialectExecutor;
pub use error::{Error, Result};
pub use executor::SqlExecutor;
pub use typed::TypedQuery;

pub use oxide_bind_core::dialect::{self, Dialect};
pub use oxide_bind_core::{
    args, list, row_fn, Arg, BindError, ColumnMap, FromSqlValue, NamedArgs, Row, RowFn, SqlValue,
    ToSqlValue,
};

/// Common imports.
pub mod prelude {
    pub use crate::dialect::{
        DialectConfig, DialectKind, MySqlDialect, PostgresDialect, SqlServerDialect,
        SqliteDialect,
    };
    pub use crate::{
        args, list, row_fn, Arg, Dialect, DialectExecutor, Error, FromSqlValue, NamedArgs, Row,
        SqlExecutor, SqlValue, ToSqlValue,
    };
}
