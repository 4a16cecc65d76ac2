//! Command-line configuration.
//!
//! Codec options come from [`CodecConfig`] and are flattened into the
//! top-level parser, so every flag also has an environment variable.

mod input;

use clap::Parser;
use flexjson_core::CodecConfig;

pub use input::{InputConfig, PayloadKind};

use crate::TRACING_TARGET_CONFIG;

/// Normalize provider payloads with inconsistent numeric encodings.
#[derive(Debug, Clone, Parser)]
#[command(name = "flexjson", version, about, long_about = None)]
pub struct Cli {
    /// Input selection.
    #[command(flatten)]
    pub input: InputConfig,

    /// Encode options for the process codec.
    #[command(flatten)]
    pub codec: CodecConfig,
}

/// Logs the effective configuration.
pub fn log_config(cli: &Cli) {
    tracing::info!(
        target: TRACING_TARGET_CONFIG,
        kind = %cli.input.kind,
        lines = cli.input.lines,
        input = %cli.input.display_name(),
        escape_html = cli.codec.escape_html,
        sort_map_keys = cli.codec.sort_map_keys,
        pretty = cli.codec.pretty,
        "normalizer configuration"
    );
}
