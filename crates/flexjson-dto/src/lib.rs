#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod chat_chunk;
mod chat_completion;
mod common;
#[doc(hidden)]
pub mod prelude;

pub use chat_chunk::{ChatCompletionChunk, ChatDelta, ChunkChoice};
pub use chat_completion::{ChatChoice, ChatCompletionResponse, ChatMessage};
pub use common::{ApiError, Usage};
