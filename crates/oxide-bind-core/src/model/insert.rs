//! INSERT models.

use std::fmt;

use super::{insert_sql, value_row, RowFn};
use crate::columns::ColumnMap;
use crate::dialect::{Dialect, ReturnTarget};
use crate::error::{BindError, Result};
use crate::partition::{batch_size, partition};
use crate::statement::{BatchStatement, Statement};
use crate::value::SqlValue;

/// A single-row INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct RowInsert {
    table: String,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
}

impl RowInsert {
    /// Creates a row insert.
    ///
    /// # Errors
    ///
    /// [`BindError::EmptyColumnSet`] when neither map binds a column.
    pub fn new(
        table: impl Into<String>,
        values: ColumnMap<SqlValue>,
        raw_values: ColumnMap<String>,
    ) -> Result<Self> {
        let table = table.into();
        if values.is_empty() && raw_values.is_empty() {
            return Err(BindError::EmptyColumnSet {
                operation: "INSERT",
                table,
            });
        }
        Ok(Self {
            table,
            values,
            raw_values,
        })
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Parameter-bound columns.
    #[must_use]
    pub const fn values(&self) -> &ColumnMap<SqlValue> {
        &self.values
    }

    /// Columns inlined as raw SQL.
    #[must_use]
    pub const fn raw_values(&self) -> &ColumnMap<String> {
        &self.raw_values
    }

    /// Renders `INSERT INTO t (..) VALUES (..)`.
    #[must_use]
    pub fn render<D: Dialect + ?Sized>(&self, dialect: &D) -> Statement {
        self.render_with(dialect, None)
    }

    /// Renders the insert with the dialect's returning or output clause.
    ///
    /// Dialects with implicit key retrieval render a plain insert.
    #[must_use]
    pub fn render_returning<D: Dialect + ?Sized>(
        &self,
        dialect: &D,
        target: ReturnTarget<'_>,
    ) -> Statement {
        self.render_with(dialect, Some(target))
    }

    fn render_with<D: Dialect + ?Sized>(
        &self,
        dialect: &D,
        target: Option<ReturnTarget<'_>>,
    ) -> Statement {
        let columns: Vec<&str> = self
            .values
            .columns()
            .chain(self.raw_values.columns())
            .collect();
        let row = value_row(self.values.len(), &self.raw_values);
        let sql = insert_sql(dialect, &self.table, &columns, &[row], target);
        Statement::new(sql, self.values.values().cloned().collect())
    }
}

/// A multi-row INSERT driven by per-row mapping functions.
pub struct BatchInsert<'a, T> {
    table: String,
    rows: &'a [T],
    mappings: ColumnMap<RowFn<'a, T>>,
    values: ColumnMap<SqlValue>,
    raw_values: ColumnMap<String>,
}

impl<'a, T> BatchInsert<'a, T> {
    /// Creates a batch insert. `rows` may be empty.
    ///
    /// # Errors
    ///
    /// [`BindError::EmptyColumnSet`] when none of the three maps binds a
    /// column.
    pub fn new(
        table: impl Into<String>,
        rows: &'a [T],
        mappings: ColumnMap<RowFn<'a, T>>,
        values: ColumnMap<SqlValue>,
        raw_values: ColumnMap<String>,
    ) -> Result<Self> {
        let table = table.into();
        if mappings.is_empty() && values.is_empty() && raw_values.is_empty() {
            return Err(BindError::EmptyColumnSet {
                operation: "INSERT",
                table,
            });
        }
        Ok(Self {
            table,
            rows,
            mappings,
            values,
            raw_values,
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

    /// Placeholders each row contributes.
    #[must_use]
    pub fn params_per_row(&self) -> usize {
        self.mappings.len() + self.values.len()
    }

    fn columns(&self) -> Vec<&str> {
        self.mappings
            .columns()
            .chain(self.values.columns())
            .chain(self.raw_values.columns())
            .collect()
    }

    /// Mapped values, then constants.
    fn row_params(&self, row: &T) -> Vec<SqlValue> {
        self.mappings
            .values()
            .map(|f| f(row))
            .chain(self.values.values().cloned())
            .collect()
    }

    /// Renders a single-row template with one parameter set per row.
    #[must_use]
    pub fn render<D: Dialect + ?Sized>(&self, dialect: &D) -> BatchStatement {
        let row = value_row(self.params_per_row(), &self.raw_values);
        let sql = insert_sql(dialect, &self.table, &self.columns(), &[row], None);
        let param_sets = self.rows.iter().map(|row| self.row_params(row)).collect();
        BatchStatement::new(sql, param_sets)
    }

    /// Renders multi-row `VALUES` statements that return `column`.
    ///
    /// Rows are split so no statement exceeds the dialect's parameter or row
    /// limit; statements come back in row order.
    #[must_use]
    pub fn render_returning<D: Dialect + ?Sized>(
        &self,
        dialect: &D,
        column: &str,
    ) -> Vec<Statement> {
        let size = batch_size(
            self.params_per_row(),
            dialect.max_parameters_per_query(),
            dialect.max_rows_per_query(),
        );
        let columns = self.columns();
        let row_template = value_row(self.params_per_row(), &self.raw_values);

        partition(self.rows, size)
            .into_iter()
            .map(|chunk| {
                let value_rows = vec![row_template.clone(); chunk.len()];
                let sql = insert_sql(
                    dialect,
                    &self.table,
                    &columns,
                    &value_rows,
                    Some(ReturnTarget::Column(column)),
                );
                let params = chunk.iter().flat_map(|row| self.row_params(row)).collect();
                Statement::new(sql, params)
            })
            .collect()
    }
}

impl<T> fmt::Debug for BatchInsert<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchInsert")
            .field("table", &self.table)
            .field("rows", &self.rows.len())
            .field("mappings", &self.mappings.columns().collect::<Vec<_>>())
            .field("values", &self.values)
            .field("raw_values", &self.raw_values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{
        DialectConfig, DialectKind, MySqlDialect, PostgresDialect, SqlServerDialect,
    };
    use crate::model::row_fn;

    struct User {
        name: &'static str,
        age: i32,
    }

    static USERS: [User; 3] = [
        User { name: "ann", age: 30 },
        User { name: "bob", age: 41 },
        User { name: "cy", age: 25 },
    ];

    fn values(pairs: &[(&str, i64)]) -> ColumnMap<SqlValue> {
        pairs.iter().map(|(c, v)| (*c, SqlValue::Int(*v))).collect()
    }

    fn user_mappings<'a>() -> ColumnMap<RowFn<'a, User>> {
        let mut mappings = ColumnMap::new();
        mappings.insert("name", row_fn(|u: &User| u.name));
        mappings.insert("age", row_fn(|u: &User| u.age));
        mappings
    }

    fn mapped_batch(rows: &[User]) -> BatchInsert<'_, User> {
        BatchInsert::new("users", rows, user_mappings(), ColumnMap::new(), ColumnMap::new())
            .unwrap()
    }

    #[test]
    fn test_row_insert_render() {
        let insert = RowInsert::new("t", values(&[("a", 1), ("b", 2)]), ColumnMap::new()).unwrap();
        let stmt = insert.render(&MySqlDialect::new());

        assert_eq!(stmt.sql, "INSERT INTO `t` (`a`, `b`) VALUES (?, ?)");
        assert_eq!(stmt.params, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_raw_values_follow_bound_values() {
        let raw: ColumnMap<String> = [("created_at", String::from("NOW()"))].into_iter().collect();
        let insert = RowInsert::new("events", values(&[("kind", 3)]), raw).unwrap();
        let stmt = insert.render(&SqlServerDialect::new());

        assert_eq!(
            stmt.sql,
            "INSERT INTO [events] ([kind], [created_at]) VALUES (?, NOW())"
        );
        assert_eq!(stmt.params, vec![SqlValue::Int(3)]);
    }

    #[test]
    fn test_row_insert_requires_a_column() {
        let err = RowInsert::new("t", ColumnMap::new(), ColumnMap::new()).unwrap_err();
        assert_eq!(
            err,
            BindError::EmptyColumnSet {
                operation: "INSERT",
                table: String::from("t")
            }
        );
    }

    #[test]
    fn test_row_insert_returning() {
        let insert = RowInsert::new("users", values(&[("age", 9)]), ColumnMap::new()).unwrap();

        assert_eq!(
            insert.render_returning(&PostgresDialect::new(), ReturnTarget::Column("id")).sql,
            "INSERT INTO users (age) VALUES (?) RETURNING id"
        );
        assert_eq!(
            insert.render_returning(&SqlServerDialect::new(), ReturnTarget::AllColumns).sql,
            "INSERT INTO [users] ([age]) OUTPUT INSERTED.* VALUES (?)"
        );
    }

    #[test]
    fn test_batch_insert_render() {
        let constants = [("source", SqlValue::Text(String::from("import")))]
            .into_iter()
            .collect();
        let raw = [("created_at", String::from("GETDATE()"))].into_iter().collect();
        let batch =
            BatchInsert::new("users", &USERS[..2], user_mappings(), constants, raw).unwrap();
        let stmt = batch.render(&SqlServerDialect::new());

        assert_eq!(
            stmt.sql,
            "INSERT INTO [users] ([name], [age], [source], [created_at]) VALUES (?, ?, ?, GETDATE())"
        );
        assert_eq!(
            stmt.param_sets,
            vec![
                vec![
                    SqlValue::Text(String::from("ann")),
                    SqlValue::Int(30),
                    SqlValue::Text(String::from("import")),
                ],
                vec![
                    SqlValue::Text(String::from("bob")),
                    SqlValue::Int(41),
                    SqlValue::Text(String::from("import")),
                ],
            ]
        );
    }

    #[test]
    fn test_batch_insert_requires_a_column() {
        let result = BatchInsert::new(
            "users",
            &USERS[..],
            ColumnMap::new(),
            ColumnMap::new(),
            ColumnMap::new(),
        );
        assert!(matches!(result, Err(BindError::EmptyColumnSet { .. })));
    }

    #[test]
    fn test_empty_rows_are_valid() {
        let batch = mapped_batch(&USERS[..0]);

        assert!(batch.render(&MySqlDialect::new()).is_empty());
        assert!(batch.render_returning(&PostgresDialect::new(), "id").is_empty());
    }

    #[test]
    fn test_render_returning_multi_row() {
        let batch = mapped_batch(&USERS);
        let statements = batch.render_returning(&PostgresDialect::new(), "id");

        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].sql,
            "INSERT INTO users (name, age) VALUES (?, ?), (?, ?), (?, ?) RETURNING id"
        );
        assert_eq!(statements[0].params.len(), 6);
        assert_eq!(statements[0].params[4], SqlValue::Text(String::from("cy")));
    }

    #[test]
    fn test_render_returning_partitions_by_limits() {
        // Four parameters allow two rows per statement.
        let dialect = DialectConfig::new(DialectKind::SqlServer).with_max_parameters(4);
        let batch = mapped_batch(&USERS);
        let statements = batch.render_returning(&dialect, "id");

        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0].sql,
            "INSERT INTO [users] ([name], [age]) OUTPUT INSERTED.[id] VALUES (?, ?), (?, ?)"
        );
        assert_eq!(
            statements[1].sql,
            "INSERT INTO [users] ([name], [age]) OUTPUT INSERTED.[id] VALUES (?, ?)"
        );
        assert_eq!(
            statements[1].params,
            vec![SqlValue::Text(String::from("cy")), SqlValue::Int(25)]
        );
    }

    #[test]
    fn test_render_returning_row_limit_wins() {
        let dialect = DialectConfig::new(DialectKind::Postgres).with_max_rows(1);
        let batch = mapped_batch(&USERS);

        assert_eq!(batch.render_returning(&dialect, "id").len(), 3);
    }
}
