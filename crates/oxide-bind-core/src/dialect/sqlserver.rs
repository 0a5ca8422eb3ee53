//! Microsoft SQL Server.

use super::{Dialect, KeyRetrieval};

/// SQL Server dialect: bracket quoting, `OUTPUT INSERTED` for keys.
///
/// A statement may carry at most 2100 parameters and a table value
/// constructor at most 1000 rows; both limits are kept just under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn identifier_quotes(&self) -> Option<(char, char)> {
        Some(('[', ']'))
    }

    fn max_parameters_per_query(&self) -> usize {
        2_098
    }

    fn max_rows_per_query(&self) -> usize {
        999
    }

    fn key_retrieval(&self) -> KeyRetrieval {
        KeyRetrieval::OutputInserted
    }
}
