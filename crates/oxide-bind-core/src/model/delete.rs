//! DELETE model.

use crate::dialect::Dialect;
use crate::error::Result;
use crate::flatten::flatten;
use crate::statement::Statement;
use crate::value::{Arg, SqlValue};

/// A DELETE with an already flattened WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteFrom {
    table: String,
    where_clause: String,
    where_params: Vec<SqlValue>,
}

impl DeleteFrom {
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        where_clause: impl Into<String>,
        where_params: Vec<SqlValue>,
    ) -> Self {
        Self {
            table: table.into(),
            where_clause: where_clause.into(),
            where_params,
        }
    }

    /// Flattens `where_clause` against `args` and builds the delete.
    ///
    /// # Errors
    ///
    /// Placeholder/argument count mismatches from [`flatten`].
    pub fn filtered<I>(table: impl Into<String>, where_clause: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arg>,
    {
        let flat = flatten(where_clause, args)?;
        Ok(Self::new(table, flat.sql, flat.params))
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    /// Renders `DELETE FROM t WHERE clause`.
    #[must_use]
    pub fn render<D: Dialect + ?Sized>(&self, dialect: &D) -> Statement {
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            dialect.quote_identifier(&self.table),
            self.where_clause
        );
        Statement::new(sql, self.where_params.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::dialect::{MySqlDialect, PostgresDialect};
    use crate::error::BindError;
    use crate::value::list;

    #[test]
    fn test_delete_with_list() {
        let delete = DeleteFrom::filtered("users", "id IN (?)", args![list([5, 6, 7])]).unwrap();
        let stmt = delete.render(&MySqlDialect::new());

        assert_eq!(stmt.sql, "DELETE FROM `users` WHERE id IN (?, ?, ?)");
        assert_eq!(
            stmt.params,
            vec![SqlValue::Int(5), SqlValue::Int(6), SqlValue::Int(7)]
        );
    }

    #[test]
    fn test_delete_placeholder_mismatch() {
        let err = DeleteFrom::filtered("users", "id = ? OR id = ?", args![1]).unwrap_err();
        assert!(matches!(err, BindError::ArgumentUnderflow { .. }));
    }

    #[test]
    fn test_delete_render_postgres() {
        let delete = DeleteFrom::new("audit.log", "created < NOW()", vec![]);
        assert_eq!(
            delete.render(&PostgresDialect::new()).sql,
            "DELETE FROM audit.log WHERE created < NOW()"
        );
    }
}
