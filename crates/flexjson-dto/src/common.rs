//! Types shared by full responses and stream chunks.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Token accounting for a request.
///
/// Some providers report counts as floats or strings; every field goes
/// through the flexible integer rules and defaults to zero when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Usage {
    #[serde(default, with = "flexjson_core::as_flexible_i64")]
    #[cfg_attr(feature = "schema", schemars(with = "i64"))]
    pub prompt_tokens: i64,
    #[serde(default, with = "flexjson_core::as_flexible_i64")]
    #[cfg_attr(feature = "schema", schemars(with = "i64"))]
    pub completion_tokens: i64,
    #[serde(default, with = "flexjson_core::as_flexible_i64")]
    #[cfg_attr(feature = "schema", schemars(with = "i64"))]
    pub total_tokens: i64,
}

impl Usage {
    /// Creates a usage record; the total is the sum of both parts, saturating
    /// at the `i64` bounds.
    pub const fn new(prompt_tokens: i64, completion_tokens: i64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Returns `true` when no tokens were reported.
    pub const fn is_empty(&self) -> bool {
        self.prompt_tokens == 0 && self.completion_tokens == 0 && self.total_tokens == 0
    }
}

/// Error object some providers embed in an otherwise successful body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Either a string or an integer depending on the provider; passed through
    /// undecoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<serde_json::Value>"))]
    pub code: Option<Box<RawValue>>,
}
