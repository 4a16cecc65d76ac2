//! Flexible decoding for plain `i64` fields.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Usage {
//!     #[serde(default, with = "flexjson_core::as_flexible_i64")]
//!     total_tokens: i64,
//!     #[serde(default, with = "flexjson_core::as_flexible_i64::option")]
//!     cached_tokens: Option<i64>,
//! }
//!
//! let usage: Usage = serde_json::from_str(r#"{"total_tokens":"18.0","cached_tokens":null}"#).unwrap();
//! assert_eq!(usage.total_tokens, 18);
//! assert_eq!(usage.cached_tokens, None);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::FlexibleInt;

/// Serializes the value as a bare integer literal.
pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    FlexibleInt::new(*value).serialize(serializer)
}

/// Deserializes an integer, float, numeric string or `null` into an `i64`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    FlexibleInt::deserialize(deserializer).map(FlexibleInt::as_i64)
}

/// Same rules for `Option<i64>`; `null` decodes as `None`.
pub mod option {
    use super::*;

    /// Serializes `Some` as a bare integer literal and `None` as `null`.
    pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(FlexibleInt::new).serialize(serializer)
    }

    /// Deserializes a flexible integer, mapping `null` to `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<FlexibleInt>::deserialize(deserializer).map(|value| value.map(FlexibleInt::as_i64))
    }
}
