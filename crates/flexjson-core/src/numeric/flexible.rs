//! The [`FlexibleInt`] field type.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{CustomScalarCodec, NumericError, ScalarToken, deserialize_scalar};
use super::{parse_numeric_str, reconcile_i64};

/// An `i64` that tolerates being encoded as a JSON integer, float, numeric
/// string or `null`.
///
/// Floats truncate toward zero, `null` becomes zero, and the value always
/// encodes as a bare integer literal. The fractional part of a float input is
/// dropped on decode and cannot be recovered.
///
/// # Examples
///
/// ```rust
/// # use flexjson_core::FlexibleInt;
/// let created: FlexibleInt = serde_json::from_str("1748682323.3797884").unwrap();
/// assert_eq!(created.as_i64(), 1748682323);
/// assert_eq!(serde_json::to_string(&created).unwrap(), "1748682323");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct FlexibleInt(i64);

/// Epoch-seconds timestamps are the most common flexible field.
pub type FlexibleTimestamp = FlexibleInt;

impl FlexibleInt {
    /// The zero value, also produced by decoding `null`.
    pub const ZERO: Self = Self(0);

    /// Creates a new value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the plain integer.
    #[inline]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Interprets the value as seconds since the Unix epoch.
    ///
    /// Returns `None` when the value is outside the range `jiff` supports.
    pub fn to_timestamp(self) -> Option<Timestamp> {
        Timestamp::from_second(self.0).ok()
    }
}

impl CustomScalarCodec for FlexibleInt {
    const EXPECTING: &'static str = "an integer encoded as a JSON number, numeric string or null";

    fn decode_scalar(token: ScalarToken<'_>) -> Result<Self, NumericError> {
        reconcile_i64(token).map(Self)
    }

    fn encode_scalar<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl Serialize for FlexibleInt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.encode_scalar(serializer)
    }
}

impl<'de> Deserialize<'de> for FlexibleInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_scalar(deserializer)
    }
}

impl From<i64> for FlexibleInt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<FlexibleInt> for i64 {
    fn from(value: FlexibleInt) -> Self {
        value.0
    }
}

impl From<Timestamp> for FlexibleInt {
    fn from(value: Timestamp) -> Self {
        Self(value.as_second())
    }
}

impl fmt::Display for FlexibleInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FlexibleInt {
    type Err = NumericError;

    /// Parses with the same rules as a string-wrapped JSON value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_numeric_str(s).map(Self)
    }
}
