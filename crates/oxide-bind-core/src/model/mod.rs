//! Statement parameter models.
//!
//! Immutable descriptions of one INSERT, UPDATE or DELETE, validated at
//! construction and rendered to SQL against a [`Dialect`].
//!
//! Raw fragments (`raw_values`) are inlined into the SQL text verbatim. They
//! exist for trusted expressions such as `NOW()` and must never carry user
//! input.

mod delete;
mod insert;
mod update;

pub use delete::DeleteFrom;
pub use insert::{BatchInsert, RowInsert};
pub use update::{BatchUpdate, RowUpdate};

use crate::columns::ColumnMap;
use crate::dialect::{Dialect, ReturnTarget};
use crate::value::{SqlValue, ToSqlValue};

/// Maps a batch row to the value bound for one column or WHERE placeholder.
pub type RowFn<'a, T> = Box<dyn Fn(&T) -> SqlValue + Send + Sync + 'a>;

/// Boxes a closure as a [`RowFn`], converting its output to a [`SqlValue`].
pub fn row_fn<'a, T, V, F>(f: F) -> RowFn<'a, T>
where
    F: Fn(&T) -> V + Send + Sync + 'a,
    V: ToSqlValue,
{
    Box::new(move |row| f(row).to_sql_value())
}

/// `INSERT INTO t (cols) [OUTPUT ...] VALUES rows [RETURNING ...]`.
fn insert_sql<D: Dialect + ?Sized>(
    dialect: &D,
    table: &str,
    columns: &[&str],
    value_rows: &[String],
    target: Option<ReturnTarget<'_>>,
) -> String {
    let mut sql = String::from("INSERT INTO ");
    sql.push_str(&dialect.quote_identifier(table));
    sql.push_str(" (");
    sql.push_str(&quote_all(dialect, columns).join(", "));
    sql.push(')');

    if let Some(output) = target.and_then(|t| dialect.output_clause(t)) {
        sql.push(' ');
        sql.push_str(&output);
    }

    sql.push_str(" VALUES ");
    sql.push_str(&value_rows.join(", "));

    if let Some(returning) = target.and_then(|t| dialect.returning_clause(t)) {
        sql.push(' ');
        sql.push_str(&returning);
    }
    sql
}

/// `(?, ?, raw, ...)` for one inserted row.
fn value_row(placeholders: usize, raw_values: &ColumnMap<String>) -> String {
    let parts: Vec<&str> = std::iter::repeat_n("?", placeholders)
        .chain(raw_values.values().map(String::as_str))
        .collect();
    format!("({})", parts.join(", "))
}

/// `UPDATE t SET a = ?, b = raw WHERE clause`.
fn update_sql<D: Dialect + ?Sized>(
    dialect: &D,
    table: &str,
    bound_columns: &[&str],
    raw_values: &ColumnMap<String>,
    where_clause: &str,
) -> String {
    let assignments: Vec<String> = bound_columns
        .iter()
        .map(|column| format!("{} = ?", dialect.quote_identifier(column)))
        .chain(
            raw_values
                .iter()
                .map(|(column, raw)| format!("{} = {raw}", dialect.quote_identifier(column))),
        )
        .collect();

    let mut sql = String::from("UPDATE ");
    sql.push_str(&dialect.quote_identifier(table));
    sql.push_str(" SET ");
    sql.push_str(&assignments.join(", "));
    sql.push_str(" WHERE ");
    sql.push_str(where_clause);
    sql
}

fn quote_all<D: Dialect + ?Sized>(dialect: &D, columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| dialect.quote_identifier(c)).collect()
}
