//! UPDATE models.

use std::fmt;

use super::{update_sql, RowFn};
use crate::columns::ColumnMap;
use crate::dialect::Dialect;
use crate::error::{BindError, Result};
use crate::flatten::count_placeholders;
use crate::statement::{BatchStatement, Statement};
use crate::value::SqlValue;

/// A single-row UPDATE with an already flattened WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct RowUpdate {
    table: String,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
    where_clause: String,
    where_params: Vec<SqlValue>,
}

impl RowUpdate {
    /// Creates a row update.
    ///
    /// `where_clause` is mandatory; pass an always-true predicate such as
    /// `1 = 1` to update every row.
    ///
    /// # Errors
    ///
    /// [`BindError::EmptyColumnSet`] when neither map binds a column.
    pub fn new(
        table: impl Into<String>,
        values: ColumnMap<SqlValue>,
        raw_values: ColumnMap<String>,
        where_clause: impl Into<String>,
        where_params: Vec<SqlValue>,
    ) -> Result<Self> {
        let table = table.into();
        if values.is_empty() && raw_values.is_empty() {
            return Err(BindError::EmptyColumnSet {
                operation: "UPDATE",
                table,
            });
        }
        Ok(Self {
            table,
            values,
            raw_values,
            where_clause: where_clause.into(),
            where_params,
        })
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    #[must_use]
    pub fn where_params(&self) -> &[SqlValue] {
        &self.where_params
    }

    /// Renders the update. Parameters are SET values, then WHERE values.
    #[must_use]
    pub fn render<D: Dialect + ?Sized>(&self, dialect: &D) -> Statement {
        let columns: Vec<&str> = self.values.columns().collect();
        let sql = update_sql(
            dialect,
            &self.table,
            &columns,
            &self.raw_values,
            &self.where_clause,
        );
        let params = self
            .values
            .values()
            .chain(&self.where_params)
            .cloned()
            .collect();
        Statement::new(sql, params)
    }
}

/// An UPDATE executed once per row.
pub struct BatchUpdate<'a, T> {
    table: String,
    rows: &'a [T],
    mappings: ColumnMap<RowFn<'a, T>>,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
    where_clause: String,
    where_mappings: Vec<RowFn<'a, T>>,
}

impl<'a, T> BatchUpdate<'a, T> {
    /// Creates a batch update.
    ///
    /// Each `?` in `where_clause` is bound from the matching entry of
    /// `where_mappings`, in order.
    ///
    /// # Errors
    ///
    /// [`BindError::EmptyColumnSet`] when no column is bound, or
    /// [`BindError::ArgumentUnderflow`]/[`BindError::ArgumentOverflow`] when
    /// the WHERE mappings do not match the clause's placeholders.
    pub fn new(
        table: impl Into<String>,
        rows: &'a [T],
        mappings: ColumnMap<RowFn<'a, T>>,
        values: ColumnMap<SqlValue>,
        raw_values: ColumnMap<String>,
        where_clause: impl Into<String>,
        where_mappings: Vec<RowFn<'a, T>>,
    ) -> Result<Self> {
        let table = table.into();
        if mappings.is_empty() && values.is_empty() && raw_values.is_empty() {
            return Err(BindError::EmptyColumnSet {
                operation: "UPDATE",
                table,
            });
        }

        let where_clause = where_clause.into();
        let placeholders = count_placeholders(&where_clause);
        let arguments = where_mappings.len();
        if arguments < placeholders {
            return Err(BindError::ArgumentUnderflow {
                placeholders,
                arguments,
            });
        }
        if arguments > placeholders {
            return Err(BindError::ArgumentOverflow {
                placeholders,
                arguments,
            });
        }

        Ok(Self {
            table,
            rows,
            mappings,
            values,
            raw_values,
            where_clause,
            where_mappings,
        })
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn rows(&self) -> &'a [T] {
        self.rows
    }

    /// Renders the shared template and one parameter set per row: mapped
    /// values, constants, then WHERE values.
    #[must_use]
    pub fn render<D: Dialect + ?Sized>(&self, dialect: &D) -> BatchStatement {
        let columns: Vec<&str> = self
            .mappings
            .columns()
            .chain(self.values.columns())
            .collect();
        let sql = update_sql(
            dialect,
            &self.table,
            &columns,
            &self.raw_values,
            &self.where_clause,
        );
        let param_sets = self
            .rows
            .iter()
            .map(|row| {
                self.mappings
                    .values()
                    .map(|f| f(row))
                    .chain(self.values.values().cloned())
                    .chain(self.where_mappings.iter().map(|f| f(row)))
                    .collect::<Vec<_>>()
            })
            .collect();
        BatchStatement::new(sql, param_sets)
    }
}

impl<T> fmt::Debug for BatchUpdate<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchUpdate")
            .field("table", &self.table)
            .field("rows", &self.rows.len())
            .field("mappings", &self.mappings.columns().collect::<Vec<_>>())
            .field("values", &self.values)
            .field("raw_values", &self.raw_values)
            .field("where_clause", &self.where_clause)
            .field("where_mappings", &self.where_mappings.len())
            .finish()
    }
}
