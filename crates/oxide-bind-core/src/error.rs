//! Error types for flattening, model construction and row decoding.

/// Errors raised while preparing a statement, before anything is executed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// Fewer arguments were supplied than there are `?` placeholders.
    #[error("SQL has {placeholders} placeholders but only {arguments} arguments were supplied")]
    ArgumentUnderflow {
        /// Placeholders found in the SQL text.
        placeholders: usize,
        /// Arguments supplied by the caller.
        arguments: usize,
    },

    /// More arguments were supplied than there are `?` placeholders.
    #[error("SQL has {placeholders} placeholders but {arguments} arguments were supplied")]
    ArgumentOverflow {
        /// Placeholders found in the SQL text.
        placeholders: usize,
        /// Arguments supplied by the caller.
        arguments: usize,
    },

    /// A statement model was built without any column binding.
    #[error("{operation} on '{table}' must bind at least one column")]
    EmptyColumnSet {
        /// The kind of statement (`INSERT`, `UPDATE`, ...).
        operation: &'static str,
        /// Target table.
        table: String,
    },

    /// A `:name` placeholder has no bound value.
    #[error("No value bound for named parameter ':{0}'")]
    MissingNamedParameter(String),

    /// SQL with `:name` placeholders also contains a positional `?`.
    #[error("Positional '?' at byte {position} in SQL with named parameters")]
    MixedPlaceholders {
        /// Byte offset of the `?` in the SQL text.
        position: usize,
    },

    /// A column value could not be converted into the requested type.
    #[error("Decode error on column '{column}': {message}")]
    Decode {
        /// Column label, or its index when unnamed.
        column: String,
        /// What went wrong.
        message: String,
    },

    /// A dialect name could not be resolved.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Result type alias for statement preparation.
pub type Result<T> = std::result::Result<T, BindError>;
