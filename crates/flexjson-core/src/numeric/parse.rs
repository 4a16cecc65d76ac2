//! Reconciliation of scalar tokens into `i64`.

use serde_json::Number;

use super::{NumericError, ScalarToken};
use crate::TRACING_TARGET_NUMERIC;

/// Truncates a float toward zero.
///
/// Values beyond the `i64` range saturate at `i64::MIN` / `i64::MAX`; NaN
/// becomes zero. JSON cannot carry non-finite numbers, so the last case only
/// arises for non-JSON deserializers.
#[inline]
pub fn truncate_f64(value: f64) -> i64 {
    value as i64
}

/// Parses the contents of a string-wrapped number using the JSON number
/// grammar.
///
/// Surrounding whitespace is accepted. Integer contents are taken exactly;
/// fractional or exponent forms are truncated toward zero.
///
/// # Errors
///
/// Returns [`NumericError::InvalidFormat`] when the contents are not a JSON
/// number, including empty strings, `NaN`, hexadecimal and
/// thousands-separated forms, and magnitudes that overflow `f64`.
///
/// # Examples
///
/// ```rust
/// # use flexjson_core::numeric::parse_numeric_str;
/// assert_eq!(parse_numeric_str("1748682323").unwrap(), 1748682323);
/// assert_eq!(parse_numeric_str("-123.456").unwrap(), -123);
/// assert!(parse_numeric_str("invalid").is_err());
/// ```
pub fn parse_numeric_str(input: &str) -> Result<i64, NumericError> {
    let number: Number =
        serde_json::from_str(input).map_err(|_| NumericError::invalid_format(input))?;
    Ok(number_to_i64(&number))
}

/// Applies the reconciliation policy to a single token.
///
/// # Errors
///
/// Returns [`NumericError::InvalidFormat`] for strings that are not JSON
/// numbers and [`NumericError::UnexpectedToken`] for booleans, arrays,
/// objects and bytes.
pub fn reconcile_i64(token: ScalarToken<'_>) -> Result<i64, NumericError> {
    match token {
        ScalarToken::Int(value) => Ok(value),
        ScalarToken::Uint(value) => Ok(saturate_u64(value)),
        ScalarToken::Float(value) => {
            let truncated = truncate_f64(value);
            if value.fract() != 0.0 {
                tracing::trace!(
                    target: TRACING_TARGET_NUMERIC,
                    input = value,
                    output = truncated,
                    "truncated fractional numeric value"
                );
            }
            Ok(truncated)
        }
        ScalarToken::Str(contents) => parse_numeric_str(contents),
        ScalarToken::Null => Ok(0),
        ScalarToken::Unexpected(found) => Err(NumericError::unexpected_token(found)),
    }
}

fn number_to_i64(number: &Number) -> i64 {
    if let Some(value) = number.as_i64() {
        value
    } else if let Some(value) = number.as_u64() {
        saturate_u64(value)
    } else {
        number.as_f64().map_or(0, truncate_f64)
    }
}

fn saturate_u64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
