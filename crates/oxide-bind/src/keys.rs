//! Generated-key decoding.

use oxide_bind_core::SqlValue;

use crate::error::{Error, Result};

/// Decodes a key reported for a single-row insert. NULL means no key.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn optional_key(value: &SqlValue) -> Result<Option<i64>> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Int(n) => Ok(Some(*n)),
        SqlValue::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Ok(Some(*f as i64))
        }
        other => Err(Error::InvalidGeneratedKeyType {
            found: other.type_name(),
        }),
    }
}

/// Decodes the key for row `row` of a batch, where a key is mandatory.
pub(crate) fn required_key(value: Option<&SqlValue>, row: usize) -> Result<i64> {
    let value = value.ok_or(Error::MissingGeneratedKey { row })?;
    optional_key(value)?.ok_or(Error::MissingGeneratedKey { row })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_key() {
        assert_eq!(optional_key(&SqlValue::Int(12)).unwrap(), Some(12));
        assert_eq!(optional_key(&SqlValue::Float(7.0)).unwrap(), Some(7));
        assert_eq!(optional_key(&SqlValue::Null).unwrap(), None);
    }

    #[test]
    fn test_non_numeric_key() {
        let err = optional_key(&SqlValue::Text(String::from("abc"))).unwrap_err();
        assert!(matches!(err, Error::InvalidGeneratedKeyType { found: "TEXT" }));

        let err = optional_key(&SqlValue::Float(1.5)).unwrap_err();
        assert!(matches!(err, Error::InvalidGeneratedKeyType { found: "REAL" }));
    }

    #[test]
    fn test_required_key() {
        assert_eq!(required_key(Some(&SqlValue::Int(3)), 0).unwrap(), 3);
        assert!(matches!(
            required_key(None, 4),
            Err(Error::MissingGeneratedKey { row: 4 })
        ));
        assert!(matches!(
            required_key(Some(&SqlValue::Null), 1),
            Err(Error::MissingGeneratedKey { row: 1 })
        ));
    }
}
