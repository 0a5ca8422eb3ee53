//! Dialect selection from configuration.
//!
//! ```rust
//! use oxide_bind_core::dialect::{Dialect, DialectConfig, DialectKind};
//!
//! let config: DialectConfig = "sqlserver".parse::<DialectKind>()?.into();
//! assert_eq!(config.max_rows_per_query(), 999);
//!
//! let tuned = config.with_max_rows(100);
//! assert_eq!(tuned.max_rows_per_query(), 100);
//! # Ok::<(), oxide_bind_core::BindError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::{Dialect, KeyRetrieval, MySqlDialect, PostgresDialect, SqlServerDialect, SqliteDialect};
use crate::error::BindError;

/// The built-in dialects, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DialectKind {
    MySql,
    Postgres,
    SqlServer,
    Sqlite,
}

impl DialectKind {
    fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::MySql => &MySqlDialect,
            Self::Postgres => &PostgresDialect,
            Self::SqlServer => &SqlServerDialect,
            Self::Sqlite => &SqliteDialect,
        }
    }
}

impl FromStr for DialectKind {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(BindError::UnknownDialect(String::from(s))),
        }
    }
}

impl TryFrom<String> for DialectKind {
    type Error = BindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dialect().name())
    }
}

impl Dialect for DialectKind {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn identifier_quotes(&self) -> Option<(char, char)> {
        self.dialect().identifier_quotes()
    }

    fn max_parameters_per_query(&self) -> usize {
        self.dialect().max_parameters_per_query()
    }

    fn max_rows_per_query(&self) -> usize {
        self.dialect().max_rows_per_query()
    }

    fn key_retrieval(&self) -> KeyRetrieval {
        self.dialect().key_retrieval()
    }
}

/// A dialect chosen by name, with optional statement-limit overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DialectConfig {
    pub dialect: DialectKind,
    #[serde(default)]
    pub max_parameters_per_query: Option<usize>,
    #[serde(default)]
    pub max_rows_per_query: Option<usize>,
}

impl DialectConfig {
    #[must_use]
    pub const fn new(dialect: DialectKind) -> Self {
        Self {
            dialect,
            max_parameters_per_query: None,
            max_rows_per_query: None,
        }
    }

    /// Overrides the parameter limit.
    #[must_use]
    pub const fn with_max_parameters(mut self, limit: usize) -> Self {
        self.max_parameters_per_query = Some(limit);
        self
    }

    /// Overrides the row limit.
    #[must_use]
    pub const fn with_max_rows(mut self, limit: usize) -> Self {
        self.max_rows_per_query = Some(limit);
        self
    }
}

impl From<DialectKind> for DialectConfig {
    fn from(dialect: DialectKind) -> Self {
        Self::new(dialect)
    }
}

impl Dialect for DialectConfig {
    fn name(&self) -> &'static str {
        self.dialect.name()
    }

    fn identifier_quotes(&self) -> Option<(char, char)> {
        self.dialect.identifier_quotes()
    }

    fn max_parameters_per_query(&self) -> usize {
        self.max_parameters_per_query
            .unwrap_or_else(|| self.dialect.max_parameters_per_query())
    }

    fn max_rows_per_query(&self) -> usize {
        self.max_rows_per_query
            .unwrap_or_else(|| self.dialect.max_rows_per_query())
    }

    fn key_retrieval(&self) -> KeyRetrieval {
        self.dialect.key_retrieval()
    }
}
