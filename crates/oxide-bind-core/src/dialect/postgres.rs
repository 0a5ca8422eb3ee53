//! PostgreSQL.

use super::{Dialect, KeyRetrieval};

/// PostgreSQL dialect.
///
/// Identifiers are passed through unquoted so unquoted names keep Postgres'
/// lower-case folding. Keys come back through `RETURNING`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostgresDialect;

impl PostgresDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn identifier_quotes(&self) -> Option<(char, char)> {
        None
    }

    fn max_parameters_per_query(&self) -> usize {
        65_535
    }

    fn max_rows_per_query(&self) -> usize {
        10_000
    }

    fn key_retrieval(&self) -> KeyRetrieval {
        KeyRetrieval::Returning
    }
}
