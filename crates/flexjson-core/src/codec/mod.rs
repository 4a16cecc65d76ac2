//! Process-wide tolerant JSON codec.
//!
//! Every decode and encode in a process goes through one [`TolerantCodec`].
//! It is installed once, either explicitly with [`init`] at startup or
//! implicitly with [`CodecConfig::default`] on the first call to [`codec`].
//! After installation the codec is immutable and shared by all threads.
//!
//! Fixed decode policy:
//! - field names match case-sensitively
//! - unknown fields are accepted and discarded
//! - `RawValue` sub-documents are syntactically validated
//! - decoded maps keep document key order
//! - flexible numeric fields reconcile through their
//!   [`CustomScalarCodec`](crate::CustomScalarCodec) hook, bound at compile
//!   time by the field type
//!
//! Encode options from [`CodecConfig`] cover the whole output. Embedded
//! `RawValue` documents are copied verbatim only while every option is off.

mod config;
mod formatter;
mod tolerant;

use std::io;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use config::CodecConfig;
pub use tolerant::TolerantCodec;

use crate::{Result, TRACING_TARGET_CODEC};

static CODEC: OnceLock<TolerantCodec> = OnceLock::new();

/// Installs the process codec.
///
/// Only the first installation takes effect. A later call with a different
/// configuration keeps the installed codec and logs a warning.
pub fn init(config: CodecConfig) -> &'static TolerantCodec {
    let mut installed_now = false;
    let codec = CODEC.get_or_init(|| {
        installed_now = true;
        TolerantCodec::new(config)
    });

    if installed_now {
        tracing::info!(
            target: TRACING_TARGET_CODEC,
            escape_html = config.escape_html,
            sort_map_keys = config.sort_map_keys,
            pretty = config.pretty,
            "tolerant codec installed"
        );
    } else if codec.config() != &config {
        tracing::warn!(
            target: TRACING_TARGET_CODEC,
            requested = ?config,
            installed = ?codec.config(),
            "tolerant codec already installed, ignoring new configuration"
        );
    }

    codec
}

/// Returns the process codec, installing the default one if needed.
pub fn codec() -> &'static TolerantCodec {
    match CODEC.get() {
        Some(codec) => codec,
        None => init(CodecConfig::default()),
    }
}

/// Decodes a byte slice with the process codec.
///
/// See [`TolerantCodec::decode_from_bytes`].
pub fn decode_from_bytes<'de, T>(data: &'de [u8]) -> Result<T>
where
    T: Deserialize<'de>,
{
    codec().decode_from_bytes(data)
}

/// Decodes a string with the process codec.
///
/// See [`TolerantCodec::decode_from_str`].
pub fn decode_from_str<'de, T>(data: &'de str) -> Result<T>
where
    T: Deserialize<'de>,
{
    codec().decode_from_str(data)
}

/// Decodes one document from a reader with the process codec.
pub fn decode_from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    codec().decode_from_reader(reader)
}

/// Decodes a parsed JSON tree with the process codec.
pub fn decode_from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    codec().decode_from_value(value)
}

/// Encodes a value with the process codec.
///
/// See [`TolerantCodec::encode`].
pub fn encode<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    codec().encode(value)
}

/// Encodes a value into a string with the process codec.
pub fn encode_to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    codec().encode_to_string(value)
}
