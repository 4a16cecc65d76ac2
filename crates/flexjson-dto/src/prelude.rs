//! Convenient re-exports for common use.

pub use flexjson_core::{Error, FlexibleTimestamp, Result};

pub use crate::{
    ApiError, ChatChoice, ChatCompletionChunk, ChatCompletionResponse, ChatDelta, ChatMessage,
    ChunkChoice, Usage,
};
