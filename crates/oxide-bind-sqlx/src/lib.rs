//! # oxide-bind-sqlx
//!
//! A [`SqlExecutor`](oxide_bind::SqlExecutor) over a sqlx SQLite pool.
//!
//! ```rust,ignore
//! use oxide_bind::prelude::*;
//! use oxide_bind_sqlx::SqliteExecutor;
//!
//! let executor = SqliteExecutor::connect("sqlite:app.db").await?;
//! let db = DialectExecutor::new(executor, SqliteDialect::new());
//! let id = db.insert_into("users").value("name", "ann").insert_returning_key("id").await?;
//! ```
//!
//! SQLite reports keys through `RETURNING` with [`SqliteDialect`]. The
//! driver-reported path (`last_insert_rowid()`) is also implemented, for
//! dialects whose key retrieval is implicit.
//!
//! [`SqliteDialect`]: oxide_bind::dialect::SqliteDialect

mod decode;
mod executor;

pub use executor::SqliteExecutor;
