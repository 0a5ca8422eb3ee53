//! # oxide-bind-core
//!
//! Placeholder flattening and dialect-aware statement rendering.
//!
//! This crate provides:
//! - A placeholder flattener that expands list arguments into placeholder runs
//! - Immutable INSERT/UPDATE/DELETE models validated at construction
//! - Per-dialect identifier quoting, statement limits and key retrieval
//! - A batch partitioner for multi-row `VALUES` statements
//!
//! Nothing here talks to a database: every operation produces SQL text plus
//! an ordered parameter list.
//!
//! ## Flattening
//!
//! ```rust
//! use oxide_bind_core::{args, flatten, list};
//!
//! let stmt = flatten("DELETE FROM users WHERE id IN (?)", args![list([5, 6, 7])])?;
//! assert_eq!(stmt.sql, "DELETE FROM users WHERE id IN (?, ?, ?)");
//! assert_eq!(stmt.params.len(), 3);
//! # Ok::<(), oxide_bind_core::BindError>(())
//! ```
//!
//! ## Rendering a model
//!
//! ```rust
//! use oxide_bind_core::dialect::SqlServerDialect;
//! use oxide_bind_core::{ColumnMap, RowInsert, SqlValue};
//!
//! let values: ColumnMap<SqlValue> = [("a", SqlValue::Int(1)), ("b", SqlValue::Int(2))]
//!     .into_iter()
//!     .collect();
//! let insert = RowInsert::new("dbo.items", values, ColumnMap::new())?;
//!
//! let stmt = insert.render(&SqlServerDialect::new());
//! assert_eq!(stmt.sql, "INSERT INTO [dbo].[items] ([a], [b]) VALUES (?, ?)");
//! # Ok::<(), oxide_bind_core::BindError>(())
//! ```

pub mod columns;
pub mod dialect;
pub mod error;
pub mod flatten;
pub mod model;
pub mod partition;
pub mod row;
pub mod statement;
pub mod value;

pub use columns::ColumnMap;
pub use dialect::{Dialect, KeyRetrieval, ReturnTarget};
pub use error::{BindError, Result};
pub use flatten::{flatten, flatten_named, NamedArgs};
pub use model::{row_fn, BatchInsert, BatchUpdate, DeleteFrom, RowFn, RowInsert, RowUpdate};
pub use partition::{batch_size, partition};
pub use row::{FromSqlValue, Row};
pub use statement::{BatchStatement, Statement};
pub use value::{list, Arg, SqlValue, ToSqlValue};
