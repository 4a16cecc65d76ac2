//! Failures raised by the flexible numeric decode hook.

use strum::{Display, IntoStaticStr};

use crate::ErrorKind;

/// The kind of JSON token a decoder presented to a scalar hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    /// A JSON number.
    Number,
    /// A JSON string.
    String,
    /// The JSON `null` literal.
    Null,
    /// `true` or `false`.
    Bool,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// Raw bytes, only produced by non-JSON deserializers.
    Bytes,
}

/// Reconciliation failure for a flexible numeric field.
///
/// The `Display` output is what surfaces through serde; the codec recognises
/// the two message prefixes to classify the failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    /// The string contents are not a JSON number.
    #[error("invalid numeric format: {input:?}")]
    InvalidFormat {
        /// The offending string contents.
        input: String,
    },

    /// The token is neither a number, a string nor null.
    #[error("unexpected token kind: expected number or numeric string, found {found}")]
    UnexpectedToken {
        /// What the decoder found instead.
        found: TokenKind,
    },
}

impl NumericError {
    const INVALID_FORMAT_PREFIX: &'static str = "invalid numeric format: ";
    const UNEXPECTED_TOKEN_PREFIX: &'static str = "unexpected token kind: ";

    /// Creates an invalid format error for the given string contents.
    pub fn invalid_format(input: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(found: TokenKind) -> Self {
        Self::UnexpectedToken { found }
    }

    /// Returns the codec error kind this failure maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::InvalidNumericFormat,
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedTokenKind,
        }
    }

    /// Recovers the error kind from a rendered serde error message.
    pub(crate) fn kind_of(message: &str) -> Option<ErrorKind> {
        if message.starts_with(Self::INVALID_FORMAT_PREFIX) {
            Some(ErrorKind::InvalidNumericFormat)
        } else if message.starts_with(Self::UNEXPECTED_TOKEN_PREFIX) {
            Some(ErrorKind::UnexpectedTokenKind)
        } else {
            None
        }
    }
}
