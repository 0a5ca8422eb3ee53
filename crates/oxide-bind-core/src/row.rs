//! Result rows and value decoding.

use crate::error::{BindError, Result};
use crate::value::SqlValue;

/// One result row: column labels and values, in select-list order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Row {
    /// Creates a row. `columns` and `values` are paired by position.
    #[must_use]
    pub const fn new(columns: Vec<String>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Decodes the value at `index`.
    ///
    /// # Errors
    ///
    /// [`BindError::Decode`] when the index is out of range or the value does
    /// not convert to `T`.
    pub fn get<T: FromSqlValue>(&self, index: usize) -> Result<T> {
        let label = || {
            self.columns
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("#{index}"))
        };
        let value = self.values.get(index).ok_or_else(|| BindError::Decode {
            column: label(),
            message: format!("row has {} columns", self.values.len()),
        })?;
        T::from_sql_value(value).map_err(|message| BindError::Decode {
            column: label(),
            message,
        })
    }

    /// Decodes the value of the column labelled `name` (case-insensitive).
    ///
    /// # Errors
    ///
    /// [`BindError::Decode`] when no column has that label or the value does
    /// not convert to `T`.
    pub fn get_named<T: FromSqlValue>(&self, name: &str) -> Result<T> {
        let index = self
            .columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
            .ok_or_else(|| BindError::Decode {
                column: String::from(name),
                message: String::from("no such column"),
            })?;
        self.get(index)
    }
}

/// Conversion from a bound SQL value into a Rust type.
pub trait FromSqlValue: Sized {
    /// Converts `value`, describing the mismatch on failure.
    ///
    /// # Errors
    ///
    /// A message naming the expected and found types.
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String>;
}

fn mismatch(expected: &str, found: &SqlValue) -> String {
    format!("expected {expected}, found {}", found.type_name())
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        Ok(value.clone())
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        match value {
            SqlValue::Int(n) => Ok(*n),
            other => Err(mismatch("INTEGER", other)),
        }
    }
}

impl FromSqlValue for i32 {
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        let wide = i64::from_sql_value(value)?;
        Self::try_from(wide).map_err(|_| format!("{wide} does not fit in i32"))
    }
}

impl FromSqlValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        match value {
            SqlValue::Float(f) => Ok(*f),
            SqlValue::Int(n) => Ok(*n as Self),
            other => Err(mismatch("REAL", other)),
        }
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        match value {
            SqlValue::Bool(b) => Ok(*b),
            SqlValue::Int(n) => Ok(*n != 0),
            other => Err(mismatch("BOOLEAN", other)),
        }
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        match value {
            SqlValue::Text(s) => Ok(s.clone()),
            other => Err(mismatch("TEXT", other)),
        }
    }
}

impl FromSqlValue for Vec<u8> {
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        match value {
            SqlValue::Blob(b) => Ok(b.clone()),
            other => Err(mismatch("BLOB", other)),
        }
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: &SqlValue) -> std::result::Result<Self, String> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}
