//! Error types for decode and encode operations.

use serde_json::error::Category;
use strum::{AsRefStr, IntoStaticStr};

use crate::numeric::NumericError;

/// Result type for all codec operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors surfaced by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input is not valid JSON or does not match the target's shape.
    MalformedInput,
    /// A string-wrapped numeric field does not hold a JSON number.
    InvalidNumericFormat,
    /// A flexible numeric field received a boolean, array or object.
    UnexpectedTokenKind,
    /// A value cannot be represented as JSON.
    Serialization,
    /// The underlying reader failed.
    Io,
}

/// Unified error type for codec operations.
///
/// A decode error means the target was not produced; there is no partially
/// populated value to recover.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid JSON syntax, premature end of input, trailing characters, or a
    /// structural mismatch with the target type.
    #[error("malformed input: {source}")]
    MalformedInput { source: serde_json::Error },

    /// A string-wrapped value that is not a JSON number. The message carries
    /// the offending string.
    #[error("{source}")]
    InvalidNumericFormat { source: serde_json::Error },

    /// A flexible numeric field received a token of the wrong kind.
    #[error("{source}")]
    UnexpectedTokenKind { source: serde_json::Error },

    /// The value graph contains something JSON cannot represent.
    #[error("serialization error: {source}")]
    Serialization { source: serde_json::Error },

    /// Reading from the input stream failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies a decode failure reported by `serde_json`.
    ///
    /// Failures raised by the flexible numeric hook are recognised by the
    /// message prefixes of [`NumericError`]; every other data error is a
    /// shape mismatch.
    pub(crate) fn from_decode(source: serde_json::Error) -> Self {
        match source.classify() {
            Category::Io => Self::Io(source.into()),
            Category::Syntax | Category::Eof => Self::MalformedInput { source },
            Category::Data => match NumericError::kind_of(&source.to_string()) {
                Some(ErrorKind::InvalidNumericFormat) => Self::InvalidNumericFormat { source },
                Some(ErrorKind::UnexpectedTokenKind) => Self::UnexpectedTokenKind { source },
                _ => Self::MalformedInput { source },
            },
        }
    }

    /// Wraps an encode failure reported by `serde_json`.
    pub(crate) fn from_encode(source: serde_json::Error) -> Self {
        match source.classify() {
            Category::Io => Self::Io(source.into()),
            _ => Self::Serialization { source },
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
            Self::InvalidNumericFormat { .. } => ErrorKind::InvalidNumericFormat,
            Self::UnexpectedTokenKind { .. } => ErrorKind::UnexpectedTokenKind,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind().into()
    }

    /// Returns the one-based input line where decoding failed, if known.
    pub fn line(&self) -> Option<usize> {
        self.json_source()
            .map(serde_json::Error::line)
            .filter(|line| *line > 0)
    }

    /// Returns the one-based input column where decoding failed, if known.
    pub fn column(&self) -> Option<usize> {
        self.json_source()
            .filter(|source| source.line() > 0)
            .map(serde_json::Error::column)
    }

    fn json_source(&self) -> Option<&serde_json::Error> {
        match self {
            Self::MalformedInput { source }
            | Self::InvalidNumericFormat { source }
            | Self::UnexpectedTokenKind { source }
            | Self::Serialization { source } => Some(source),
            Self::Io(_) => None,
        }
    }
}
