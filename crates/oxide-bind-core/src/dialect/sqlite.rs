//! SQLite dialect.

use super::{Dialect, KeyRetrieval};

/// SQLite dialect implementation.
///
/// Uses double-quote identifiers and `RETURNING` (SQLite 3.35+).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identifier_quotes(&self) -> Option<(char, char)> {
        Some(('"', '"'))
    }

    fn max_parameters_per_query(&self) -> usize {
        32_766
    }

    fn max_rows_per_query(&self) -> usize {
        10_000
    }

    fn key_retrieval(&self) -> KeyRetrieval {
        KeyRetrieval::Returning
    }
}
