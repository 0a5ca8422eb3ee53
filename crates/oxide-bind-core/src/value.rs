//! Bind values and placeholder arguments.
//!
//! A [`SqlValue`] is one scalar bound to one `?`. An [`Arg`] is what a caller
//! hands to a placeholder: either a scalar, or a list that the flattener
//! expands into a run of placeholders.

/// A SQL value that is always bound through a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BOOLEAN",
            Self::Int(_) => "INTEGER",
            Self::Float(_) => "REAL",
            Self::Text(_) => "TEXT",
            Self::Blob(_) => "BLOB",
        }
    }

    /// Returns `true` for SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

macro_rules! widening_int {
    ($($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )+
    };
}

widening_int!(i8, i16, i32, u8, u16, u32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

/// One argument consumed by one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Bound as-is; the placeholder is left untouched.
    Scalar(SqlValue),
    /// Expanded into `len` comma-separated placeholders.
    List(Vec<SqlValue>),
}

impl Arg {
    /// Builds a list argument from any iterable of values.
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        Self::List(values.into_iter().map(ToSqlValue::to_sql_value).collect())
    }

    /// Number of placeholders this argument occupies once flattened.
    #[must_use]
    pub const fn width(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::List(values) => values.len(),
        }
    }
}

impl<T: ToSqlValue> From<T> for Arg {
    fn from(value: T) -> Self {
        Self::Scalar(value.to_sql_value())
    }
}

/// Shorthand for [`Arg::list`].
pub fn list<I>(values: I) -> Arg
where
    I: IntoIterator,
    I::Item: ToSqlValue,
{
    Arg::list(values)
}

/// Builds a `Vec<Arg>` from mixed scalars and lists.
///
/// ```rust
/// use oxide_bind_core::{args, list, Arg};
///
/// let args = args![42, "active", list([5, 6, 7])];
/// assert_eq!(args.len(), 3);
/// assert!(matches!(args[2], Arg::List(_)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}
