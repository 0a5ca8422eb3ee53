//! MySQL and MariaDB.

use super::{Dialect, KeyRetrieval};

/// MySQL dialect: backtick quoting, keys reported by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlDialect;

impl MySqlDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quotes(&self) -> Option<(char, char)> {
        Some(('`', '`'))
    }

    fn max_parameters_per_query(&self) -> usize {
        65_535
    }

    fn max_rows_per_query(&self) -> usize {
        10_000
    }

    fn key_retrieval(&self) -> KeyRetrieval {
        KeyRetrieval::Implicit
    }
}
