//! Streaming chat completion chunk.

use flexjson_core::{FlexibleTimestamp, Result};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::Usage;

/// A `chat.completion.chunk` event from a streaming response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ChatCompletionChunk {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: FlexibleTimestamp,
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    /// Only present on the final chunk when the client asked for usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionChunk {
    /// Decodes a chunk with the process codec.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        flexjson_core::decode_from_bytes(data)
    }

    /// Encodes the chunk with the process codec.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        flexjson_core::encode(self)
    }

    /// Concatenates the content deltas of all choices.
    pub fn content(&self) -> String {
        self.choices
            .iter()
            .filter_map(|choice| choice.delta.content.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ChunkChoice {
    #[serde(default, with = "flexjson_core::as_flexible_i64")]
    #[cfg_attr(feature = "schema", schemars(with = "i64"))]
    pub index: i64,
    #[serde(default)]
    pub delta: ChatDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ChatDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "schema", schemars(with = "Option<serde_json::Value>"))]
    pub tool_calls: Option<Box<RawValue>>,
}
