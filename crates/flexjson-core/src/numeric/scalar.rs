//! The custom scalar hook and its serde visitor.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::Serializer;

use super::{NumericError, TokenKind};

/// One JSON scalar token as presented to a [`CustomScalarCodec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarToken<'a> {
    /// A number that fits in `i64`.
    Int(i64),
    /// A non-negative number above `i64::MAX`.
    Uint(u64),
    /// A number with a fraction or exponent, or one outside the `i64`/`u64` range.
    Float(f64),
    /// String contents, already unescaped.
    Str(&'a str),
    /// The `null` literal.
    Null,
    /// Any token a scalar cannot be built from.
    Unexpected(TokenKind),
}

impl ScalarToken<'_> {
    /// Returns the JSON token kind.
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Int(_) | Self::Uint(_) | Self::Float(_) => TokenKind::Number,
            Self::Str(_) => TokenKind::String,
            Self::Null => TokenKind::Null,
            Self::Unexpected(kind) => *kind,
        }
    }
}

/// Decode and encode hooks for a scalar type with a non-default wire form.
///
/// Implementors are bound into serde by writing their `Deserialize` impl in
/// terms of [`deserialize_scalar`] and their `Serialize` impl in terms of
/// [`CustomScalarCodec::encode_scalar`]. The binding is resolved at compile
/// time from the field's declared type.
pub trait CustomScalarCodec: Sized {
    /// Description used in serde's "invalid type" messages.
    const EXPECTING: &'static str;

    /// Builds a value from the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`NumericError`] when the token cannot be reconciled.
    fn decode_scalar(token: ScalarToken<'_>) -> Result<Self, NumericError>;

    /// Writes the canonical wire form.
    fn encode_scalar<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer;
}

/// Serde visitor that converts whatever token comes next into a
/// [`ScalarToken`] and hands it to `T`'s decode hook.
pub struct ScalarVisitor<T>(PhantomData<fn() -> T>);

impl<T> ScalarVisitor<T> {
    /// Creates a new visitor.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ScalarVisitor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ScalarVisitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScalarVisitor")
    }
}

impl<T: CustomScalarCodec> ScalarVisitor<T> {
    fn decode<E: de::Error>(token: ScalarToken<'_>) -> Result<T, E> {
        T::decode_scalar(token).map_err(E::custom)
    }
}

impl<'de, T: CustomScalarCodec> Visitor<'de> for ScalarVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(T::EXPECTING)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<T, E> {
        Self::decode(ScalarToken::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<T, E> {
        match i64::try_from(value) {
            Ok(value) => Self::decode(ScalarToken::Int(value)),
            Err(_) => Self::decode(ScalarToken::Uint(value)),
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<T, E> {
        Self::decode(ScalarToken::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        Self::decode(ScalarToken::Str(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Self::decode(ScalarToken::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<T, E> {
        Self::decode(ScalarToken::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<T, E> {
        Self::decode(ScalarToken::Unexpected(TokenKind::Bool))
    }

    fn visit_bytes<E: de::Error>(self, _value: &[u8]) -> Result<T, E> {
        Self::decode(ScalarToken::Unexpected(TokenKind::Bytes))
    }

    fn visit_seq<A>(self, _seq: A) -> Result<T, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Self::decode(ScalarToken::Unexpected(TokenKind::Array))
    }

    fn visit_map<A>(self, _map: A) -> Result<T, A::Error>
    where
        A: MapAccess<'de>,
    {
        Self::decode(ScalarToken::Unexpected(TokenKind::Object))
    }
}

/// Deserializes a [`CustomScalarCodec`] type from any self-describing format.
pub fn deserialize_scalar<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: CustomScalarCodec,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor::<T>::new())
}
