//! Non-streaming chat completion response.

use flexjson_core::{FlexibleTimestamp, Result};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::{ApiError, Usage};

/// A `chat.completion` response body.
///
/// `created` tolerates integer, float and string encodings; some providers
/// send fractional epoch seconds. It always re-encodes as a bare integer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ChatCompletionResponse {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: FlexibleTimestamp,
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Usage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl ChatCompletionResponse {
    /// Decodes a response body with the process codec.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        flexjson_core::decode_from_bytes(data)
    }

    /// Encodes the response with the process codec.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        flexjson_core::encode(self)
    }

    /// Returns `created` as a timestamp, if it is in range.
    pub fn created_at(&self) -> Option<Timestamp> {
        self.created.to_timestamp()
    }

    /// Returns the text content of the first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// One completion alternative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ChatChoice {
    #[serde(default, with = "flexjson_core::as_flexible_i64")]
    #[cfg_attr(feature = "schema", schemars(with = "i64"))]
    pub index: i64,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// A message produced by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Tool call list, passed through without interpretation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<serde_json::Value>"))]
    pub tool_calls: Option<Box<RawValue>>,
}
