//! Codec encode policy.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Encode options for the [`TolerantCodec`](super::TolerantCodec).
///
/// Decoding policy is fixed and not part of this struct: field names match
/// case-sensitively, unknown fields are ignored, embedded raw documents are
/// validated, and decoded maps keep document order.
///
/// The options apply to the whole encoded document, including embedded
/// `RawValue` sub-documents. Those are written verbatim only when every
/// option is off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct CodecConfig {
    /// Escape `<`, `>` and `&` inside strings as `\u003c`, `\u003e`, `\u0026`.
    #[cfg_attr(
        feature = "config",
        arg(long = "escape-html", env = "FLEXJSON_ESCAPE_HTML")
    )]
    #[serde(default)]
    pub escape_html: bool,

    /// Sort object keys lexicographically on encode.
    #[cfg_attr(
        feature = "config",
        arg(long = "sort-map-keys", env = "FLEXJSON_SORT_MAP_KEYS")
    )]
    #[serde(default)]
    pub sort_map_keys: bool,

    /// Indent output with two spaces.
    #[cfg_attr(feature = "config", arg(long = "pretty", env = "FLEXJSON_PRETTY"))]
    #[serde(default)]
    pub pretty: bool,
}

impl CodecConfig {
    /// The tolerant default: compact output, no escaping, document key order.
    pub const TOLERANT: Self = Self {
        escape_html: false,
        sort_map_keys: false,
        pretty: false,
    };

    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self::TOLERANT
    }

    /// Returns `true` when no option rewrites the output, so embedded raw
    /// documents pass through untouched.
    pub const fn is_verbatim(&self) -> bool {
        !self.escape_html && !self.sort_map_keys && !self.pretty
    }

    /// Enables or disables HTML escaping.
    #[must_use]
    pub const fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Enables or disables key sorting.
    #[must_use]
    pub const fn with_sort_map_keys(mut self, sort_map_keys: bool) -> Self {
        self.sort_map_keys = sort_map_keys;
        self
    }

    /// Enables or disables pretty output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tolerant() {
        assert_eq!(CodecConfig::default(), CodecConfig::TOLERANT);
        assert_eq!(CodecConfig::new(), CodecConfig::TOLERANT);
    }

    #[test]
    fn test_builder_methods() {
        let config = CodecConfig::new()
            .with_escape_html(true)
            .with_sort_map_keys(true)
            .with_pretty(true);
        assert!(config.escape_html);
        assert!(config.sort_map_keys);
        assert!(config.pretty);
    }

    #[test]
    fn test_any_option_disables_verbatim_output() {
        assert!(CodecConfig::TOLERANT.is_verbatim());
        assert!(!CodecConfig::new().with_escape_html(true).is_verbatim());
        assert!(!CodecConfig::new().with_sort_map_keys(true).is_verbatim());
        assert!(!CodecConfig::new().with_pretty(true).is_verbatim());
    }

    #[test]
    fn test_partial_config_file() {
        let config: CodecConfig = serde_json::from_str(r#"{"sort_map_keys": true}"#).unwrap();
        assert_eq!(config, CodecConfig::new().with_sort_map_keys(true));
    }
}
