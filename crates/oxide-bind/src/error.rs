//! Error types for statement execution.

use oxide_bind_core::BindError;

/// Errors that can occur while building or executing a statement.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The statement could not be prepared (placeholder mismatch, no
    /// columns bound, row decoding).
    #[error(transparent)]
    Bind(#[from] BindError),

    /// A single-result query returned more than one row.
    #[error("Expected at most one row, got {0}")]
    TooManyRows(usize),

    /// A generated key was not numeric.
    #[error("Generated key has non-numeric type {found}")]
    InvalidGeneratedKeyType {
        /// SQL type name of the value returned.
        found: &'static str,
    },

    /// No generated key was reported for an inserted row.
    #[error("No generated key reported for row {row}")]
    MissingGeneratedKey {
        /// Zero-based index of the row in the insert.
        row: usize,
    },

    /// More generated keys came back than rows were inserted.
    #[error("Expected {expected} generated keys, got {found}")]
    UnexpectedGeneratedKeys {
        /// Rows in the insert.
        expected: usize,
        /// Keys reported.
        found: usize,
    },

    /// The dialect cannot express the requested operation.
    #[error("Dialect '{dialect}' does not support {feature}")]
    Unsupported {
        /// Dialect name.
        dialect: &'static str,
        /// What was asked for.
        feature: &'static str,
    },

    /// The executor failed. The original error is kept as the source.
    #[error("Execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an executor error.
    pub fn execution<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution(Box::new(error))
    }
}

/// Result type alias for execution.
pub type Result<T> = std::result::Result<T, Error>;
