//! SQLite rows to [`Row`].

use oxide_bind_core::{Row, SqlValue};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

/// Copies every column of `row` by its storage class.
pub(crate) fn decode_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    let columns = row
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let values = (0..row.len())
        .map(|index| decode_value(row, index))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Row::new(columns, values))
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<SqlValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    // Non-null values report their runtime storage class, not the declared type.
    let value = match raw.type_info().name() {
        "INTEGER" => SqlValue::Int(row.try_get_unchecked(index)?),
        "BOOLEAN" => SqlValue::Bool(row.try_get_unchecked(index)?),
        "REAL" => SqlValue::Float(row.try_get_unchecked(index)?),
        "BLOB" => SqlValue::Blob(row.try_get_unchecked(index)?),
        _ => SqlValue::Text(row.try_get_unchecked(index)?),
    };
    Ok(value)
}
