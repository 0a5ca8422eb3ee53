//! Rendered SQL ready to hand to an executor.

use crate::value::SqlValue;

/// SQL text plus its positional parameters, one per `?`, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    #[must_use]
    pub const fn new(sql: String, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }
}

/// One SQL template executed once per parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStatement {
    pub sql: String,
    pub param_sets: Vec<Vec<SqlValue>>,
}

impl BatchStatement {
    #[must_use]
    pub const fn new(sql: String, param_sets: Vec<Vec<SqlValue>>) -> Self {
        Self { sql, param_sets }
    }

    /// Returns `true` when there are no rows to execute.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.param_sets.is_empty()
    }
}
