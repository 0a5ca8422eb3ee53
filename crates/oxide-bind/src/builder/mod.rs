//! Fluent statement builders.
//!
//! Builders accumulate column bindings and run on their terminal call. Insert
//! and update builders use the typestate pattern: terminal methods only exist
//! once at least one column is bound.
//!
//! ```rust,ignore
//! let affected = db
//!     .update_table("users")
//!     .set("active", false)
//!     .set_raw("updated_at", "NOW()")
//!     .where_clause("id IN (?)", args![list([5, 6, 7])])
//!     .await?;
//!
//! // This would NOT compile: no column bound yet.
//! // db.update_table("users").where_id_eq(5).await?;
//! ```
//!
//! Binding a column again replaces the earlier binding, whichever kind it was.
//! Raw bindings are inlined into the SQL verbatim and must only ever carry
//! trusted expressions.

mod delete;
mod insert;
mod update;

pub use delete::DeleteBuilder;
pub use insert::{BatchInsertBuilder, RowInsertBuilder};
pub use update::{BatchUpdateBuilder, RowUpdateBuilder};

// Typestate markers

/// Marker: no column bound yet.
pub struct NoValues;
/// Marker: at least one column bound.
pub struct HasValues;

/// Column name of the `where_id_*` shorthands.
pub(crate) const ID_COLUMN: &str = "id";
