#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use oxide_bind::prelude::*;
use oxide_bind::BindError;

/// One call received by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute(String),
    Update(String, Vec<SqlValue>),
    Query(String, Vec<SqlValue>),
    Batch(String, Vec<Vec<SqlValue>>),
    UpdateReturningKey(String, Vec<SqlValue>),
    BatchReturningKeys(String, Vec<Vec<SqlValue>>),
}

#[derive(Debug, thiserror::Error)]
#[error("connection reset")]
pub struct ConnectionReset;

/// In-memory executor that records calls and replays scripted results.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Call>>,
    query_results: Mutex<VecDeque<Vec<Row>>>,
    generated_key: Option<SqlValue>,
    key_sets: Option<Vec<Vec<SqlValue>>>,
    affected: u64,
    failing: bool,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            affected: 1,
            generated_key: Some(SqlValue::Int(1)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Queues the rows returned by the next query.
    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        self.query_results.lock().unwrap().push_back(rows);
        self
    }

    pub fn with_affected(mut self, affected: u64) -> Self {
        self.affected = affected;
        self
    }

    pub fn with_generated_key(mut self, key: Option<SqlValue>) -> Self {
        self.generated_key = key;
        self
    }

    pub fn with_key_sets(mut self, key_sets: Vec<Vec<SqlValue>>) -> Self {
        self.key_sets = Some(key_sets);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ConnectionReset> {
        self.calls.lock().unwrap().push(call);
        if self.failing {
            Err(ConnectionReset)
        } else {
            Ok(())
        }
    }
}

impl SqlExecutor for RecordingExecutor {
    type Error = ConnectionReset;

    async fn execute(&self, sql: &str) -> Result<(), Self::Error> {
        self.record(Call::Execute(sql.to_string()))
    }

    async fn execute_update(&self, sql: &str, params: &[SqlValue]) -> Result<u64, Self::Error> {
        self.record(Call::Update(sql.to_string(), params.to_vec()))?;
        Ok(self.affected)
    }

    async fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, Self::Error> {
        self.record(Call::Query(sql.to_string(), params.to_vec()))?;
        Ok(self.query_results.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn execute_batch_update(
        &self,
        sql: &str,
        param_sets: &[Vec<SqlValue>],
    ) -> Result<Vec<u64>, Self::Error> {
        self.record(Call::Batch(sql.to_string(), param_sets.to_vec()))?;
        Ok(vec![self.affected; param_sets.len()])
    }

    async fn execute_update_returning_generated_key(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Option<SqlValue>, Self::Error> {
        self.record(Call::UpdateReturningKey(sql.to_string(), params.to_vec()))?;
        Ok(self.generated_key.clone())
    }

    async fn execute_batch_returning_generated_keys(
        &self,
        sql: &str,
        param_sets: &[Vec<SqlValue>],
    ) -> Result<Vec<Vec<SqlValue>>, Self::Error> {
        self.record(Call::BatchReturningKeys(sql.to_string(), param_sets.to_vec()))?;
        let sequential = || (1..=param_sets.len() as i64).map(|k| vec![SqlValue::Int(k)]).collect();
        Ok(self.key_sets.clone().unwrap_or_else(sequential))
    }
}

pub fn mysql(executor: RecordingExecutor) -> DialectExecutor<RecordingExecutor, MySqlDialect> {
    DialectExecutor::new(executor, MySqlDialect::new())
}

pub fn postgres(
    executor: RecordingExecutor,
) -> DialectExecutor<RecordingExecutor, PostgresDialect> {
    DialectExecutor::new(executor, PostgresDialect::new())
}

pub fn sqlserver(
    executor: RecordingExecutor,
) -> DialectExecutor<RecordingExecutor, SqlServerDialect> {
    DialectExecutor::new(executor, SqlServerDialect::new())
}

pub fn ints(values: &[i64]) -> Vec<SqlValue> {
    values.iter().copied().map(SqlValue::Int).collect()
}

pub fn text(value: &str) -> SqlValue {
    SqlValue::Text(value.to_string())
}

/// A one-column row per value.
pub fn id_rows(ids: &[i64]) -> Vec<Row> {
    ids.iter()
        .map(|id| Row::new(vec![String::from("id")], vec![SqlValue::Int(*id)]))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

pub fn users() -> Vec<User> {
    vec![
        User { id: 1, name: String::from("ann"), age: 30 },
        User { id: 2, name: String::from("bob"), age: 41 },
        User { id: 3, name: String::from("cy"), age: 25 },
    ]
}

pub fn user_row(id: i64, name: &str, age: i32) -> Row {
    Row::new(
        vec![String::from("id"), String::from("name"), String::from("age")],
        vec![SqlValue::Int(id), text(name), SqlValue::Int(i64::from(age))],
    )
}

pub fn map_user(row: &Row) -> Result<User, BindError> {
    Ok(User {
        id: row.get_named("id")?,
        name: row.get_named("name")?,
        age: row.get_named("age")?,
    })
}
