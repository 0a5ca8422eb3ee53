//! Placeholder flattening.
//!
//! Rewrites SQL so that a placeholder bound to a list becomes one placeholder
//! per element, keeping a single flat parameter list in step with the text.
//!
//! ```rust
//! use oxide_bind_core::{args, flatten, list, SqlValue};
//!
//! let stmt = flatten(
//!     "SELECT * FROM users WHERE id IN (?) AND active = ?",
//!     args![list([5, 6]), true],
//! )?;
//! assert_eq!(stmt.sql, "SELECT * FROM users WHERE id IN (?, ?) AND active = ?");
//! assert_eq!(stmt.params, vec![SqlValue::Int(5), SqlValue::Int(6), SqlValue::Bool(true)]);
//! # Ok::<(), oxide_bind_core::BindError>(())
//! ```

use std::collections::HashMap;

use crate::error::{BindError, Result};
use crate::statement::Statement;
use crate::value::{Arg, SqlValue, ToSqlValue};

/// Counts `?` occurrences. String literals are not inspected.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

/// A run of `count` comma-separated placeholders; empty for zero.
#[must_use]
pub fn placeholder_list(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Flattens positional `?` placeholders against `args`.
///
/// Each `?` consumes one argument in order. Scalars are bound as-is; a list of
/// `N` values replaces its `?` with `N` placeholders (none for an empty list).
///
/// # Errors
///
/// [`BindError::ArgumentUnderflow`] when there are fewer arguments than
/// placeholders, [`BindError::ArgumentOverflow`] when there are more.
pub fn flatten<I>(sql: &str, args: I) -> Result<Statement>
where
    I: IntoIterator<Item = Arg>,
{
    let args: Vec<Arg> = args.into_iter().collect();
    let placeholders = count_placeholders(sql);
    let arguments = args.len();
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

    let mut out = String::with_capacity(sql.len());
    let mut params = Vec::with_capacity(args.iter().map(Arg::width).sum());
    let mut args = args.into_iter();
    for ch in sql.chars() {
        if ch != '?' {
            out.push(ch);
            continue;
        }
        let arg = args.next().ok_or(BindError::ArgumentUnderflow {
            placeholders,
            arguments,
        })?;
        push_arg(&mut out, &mut params, arg);
    }

    Ok(Statement::new(out, params))
}

fn push_arg(out: &mut String, params: &mut Vec<SqlValue>, arg: Arg) {
    match arg {
        Arg::Scalar(value) => {
            out.push('?');
            params.push(value);
        }
        Arg::List(values) => {
            out.push_str(&placeholder_list(values.len()));
            params.extend(values);
        }
    }
}

/// Values for `:name` placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedArgs {
    values: HashMap<String, Arg>,
}

impl NamedArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` (without the leading colon), replacing any earlier value.
    #[must_use]
    pub fn bind(mut self, name: &str, value: impl Into<Arg>) -> Self {
        self.values.insert(String::from(name), value.into());
        self
    }

    /// Binds `name` to a list, expanded like a positional list argument.
    #[must_use]
    pub fn bind_list<I>(self, name: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        self.bind(name, Arg::list(values))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.values.get(name)
    }
}

/// Rewrites `:name` placeholders to positional `?` placeholders.
///
/// Values are bound in order of appearance; a name used twice is bound twice.
/// Quoted text, `--` and `/* */` comments and `::` casts are copied through
/// untouched. Bound names the SQL never mentions are ignored.
///
/// # Errors
///
/// [`BindError::MissingNamedParameter`] when a name in the SQL has no value,
/// and [`BindError::MixedPlaceholders`] when the SQL also holds a bare `?`.
pub fn flatten_named(sql: &str, args: &NamedArgs) -> Result<Statement> {
    let mut out = String::with_capacity(sql.len());
    let mut params = Vec::new();
    let mut chars = sql.char_indices().peekable();
    let mut skip: Option<Skip> = None;

    while let Some((index, ch)) = chars.next() {
        if let Some(mode) = skip {
            out.push(ch);
            match mode {
                Skip::Quoted(close) if ch == close => skip = None,
                Skip::LineComment if ch == '\n' => skip = None,
                Skip::BlockComment if ch == '*' && matches!(chars.peek(), Some((_, '/'))) => {
                    chars.next();
                    out.push('/');
                    skip = None;
                }
                _ => {}
            }
            continue;
        }
        match ch {
            '\'' | '"' => {
                skip = Some(Skip::Quoted(ch));
                out.push(ch);
            }
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                chars.next();
                skip = Some(Skip::LineComment);
                out.push_str("--");
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                skip = Some(Skip::BlockComment);
                out.push_str("/*");
            }
            '?' => return Err(BindError::MixedPlaceholders { position: index }),
            ':' if matches!(chars.peek(), Some((_, ':'))) => {
                chars.next();
                out.push_str("::");
            }
            ':' => {
                let start = index + 1;
                let mut end = start;
                while let Some(&(at, next)) = chars.peek() {
                    if !(next.is_alphanumeric() || next == '_') {
                        break;
                    }
                    end = at + next.len_utf8();
                    chars.next();
                }
                if end == start {
                    out.push(':');
                    continue;
                }
                let name = &sql[start..end];
                let arg = args
                    .get(name)
                    .ok_or_else(|| BindError::MissingNamedParameter(String::from(name)))?;
                push_arg(&mut out, &mut params, arg.clone());
            }
            _ => out.push(ch),
        }
    }

    Ok(Statement::new(out, params))
}

/// Text the named-parameter scanner copies through verbatim.
#[derive(Debug, Clone, Copy)]
enum Skip {
    Quoted(char),
    LineComment,
    BlockComment,
}
