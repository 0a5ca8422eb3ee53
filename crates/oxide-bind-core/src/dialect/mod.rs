//! SQL dialect support.
//!
//! A dialect decides how identifiers are quoted, how many parameters and rows
//! a single statement may carry, and how generated keys come back from an
//! insert.

mod config;
mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use config::{DialectConfig, DialectKind};
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

/// How a dialect reports keys generated by an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRetrieval {
    /// The driver reports keys alongside the update count.
    Implicit,
    /// `INSERT ... RETURNING col`, executed as a query.
    Returning,
    /// `INSERT ... OUTPUT INSERTED.col VALUES ...`, executed as a query.
    OutputInserted,
}

/// What an insert should hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTarget<'a> {
    /// A single column, usually the generated key.
    Column(&'a str),
    /// The whole inserted row.
    AllColumns,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Opening and closing identifier quote, or `None` to leave identifiers
    /// as written.
    fn identifier_quotes(&self) -> Option<(char, char)>;

    /// Most `?` placeholders one statement may carry.
    fn max_parameters_per_query(&self) -> usize;

    /// Most rows one multi-row `VALUES` list may carry.
    fn max_rows_per_query(&self) -> usize;

    /// How generated keys are fetched after an insert.
    fn key_retrieval(&self) -> KeyRetrieval;

    /// Quotes a possibly schema-qualified identifier.
    ///
    /// Surrounding whitespace and any quote characters already present are
    /// stripped, then each `.`-separated part is wrapped.
    fn quote_identifier(&self, name: &str) -> String {
        let name = name.trim();
        let Some((open, close)) = self.identifier_quotes() else {
            return String::from(name);
        };
        let bare: String = name.chars().filter(|c| *c != open && *c != close).collect();
        bare.split('.')
            .map(|part| format!("{open}{part}{close}"))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Clause placed between the column list and `VALUES`, if any.
    fn output_clause(&self, target: ReturnTarget<'_>) -> Option<String> {
        match self.key_retrieval() {
            KeyRetrieval::OutputInserted => {
                Some(format!("OUTPUT INSERTED.{}", self.return_target(target)))
            }
            KeyRetrieval::Implicit | KeyRetrieval::Returning => None,
        }
    }

    /// Clause appended after the `VALUES` list, if any.
    fn returning_clause(&self, target: ReturnTarget<'_>) -> Option<String> {
        match self.key_retrieval() {
            KeyRetrieval::Returning => Some(format!("RETURNING {}", self.return_target(target))),
            KeyRetrieval::Implicit | KeyRetrieval::OutputInserted => None,
        }
    }

    /// Renders a return target as SQL.
    fn return_target(&self, target: ReturnTarget<'_>) -> String {
        match target {
            ReturnTarget::Column(column) => self.quote_identifier(column),
            ReturnTarget::AllColumns => String::from("*"),
        }
    }
}
