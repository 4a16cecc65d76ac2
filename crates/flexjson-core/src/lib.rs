#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Flexjson Core
//!
//! Fault-tolerant JSON decoding for numeric fields whose wire representation
//! differs between upstream producers. A field declared as [`FlexibleInt`]
//! accepts a JSON integer, a JSON float, a string holding either, or `null`,
//! and always encodes back as a bare integer literal.
//!
//! All decode and encode calls in a process route through one
//! [`TolerantCodec`], installed once with [`init`] or lazily with the default
//! [`CodecConfig`] on first use.

/// Tracing target for codec installation and decode/encode calls.
pub const TRACING_TARGET_CODEC: &str = "flexjson_core::codec";

/// Tracing target for flexible numeric reconciliation.
pub const TRACING_TARGET_NUMERIC: &str = "flexjson_core::numeric";

pub mod codec;
mod error;
pub mod numeric;
#[doc(hidden)]
pub mod prelude;

pub use codec::{
    CodecConfig, TolerantCodec, codec, decode_from_bytes, decode_from_reader, decode_from_str,
    decode_from_value, encode, encode_to_string, init,
};
pub use error::{Error, ErrorKind, Result};
pub use numeric::{
    CustomScalarCodec, FlexibleInt, FlexibleTimestamp, NumericError, ScalarToken, TokenKind,
    as_flexible_i64,
};
