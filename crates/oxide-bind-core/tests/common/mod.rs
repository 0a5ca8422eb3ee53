#![allow(dead_code)]

use oxide_bind_core::dialect::{
    Dialect, MySqlDialect, PostgresDialect, SqlServerDialect, SqliteDialect,
};
use oxide_bind_core::{flatten, Arg, ColumnMap, SqlValue, Statement};

pub fn all_dialects() -> Vec<Box<dyn Dialect>> {
    vec![
        Box::new(MySqlDialect::new()),
        Box::new(PostgresDialect::new()),
        Box::new(SqlServerDialect::new()),
        Box::new(SqliteDialect::new()),
    ]
}

pub fn flat(sql: &str, args: Vec<Arg>) -> Statement {
    flatten(sql, args).unwrap_or_else(|e| panic!("Failed to flatten: {sql}\nError: {e}"))
}

pub fn ints(values: &[i64]) -> Vec<SqlValue> {
    values.iter().copied().map(SqlValue::Int).collect()
}

pub fn bound(pairs: &[(&str, i64)]) -> ColumnMap<SqlValue> {
    pairs.iter().map(|(c, v)| (*c, SqlValue::Int(*v))).collect()
}
