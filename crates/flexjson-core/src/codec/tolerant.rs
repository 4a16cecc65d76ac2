//! The tolerant JSON codec.

use std::io;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};

use super::CodecConfig;
use super::formatter::HtmlSafeFormatter;
use crate::{Error, Result, TRACING_TARGET_CODEC};

/// JSON decode/encode engine with a fixed leniency policy.
///
/// Decoding is `serde_json` with field-level hooks for flexible numeric
/// types. The trailing-content check is strict: a document followed by
/// anything other than whitespace is malformed. Encoding applies the
/// [`CodecConfig`] options.
///
/// The codec holds no mutable state and can be shared across threads freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TolerantCodec {
    config: CodecConfig,
}

impl TolerantCodec {
    /// Creates a codec with the given encode options.
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Returns the encode options.
    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decodes a byte slice into `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] for invalid JSON, trailing content or a
    ///   shape mismatch
    /// - [`Error::InvalidNumericFormat`] / [`Error::UnexpectedTokenKind`] when
    ///   a flexible numeric field cannot be reconciled
    pub fn decode_from_bytes<'de, T>(&self, data: &'de [u8]) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        tracing::trace!(target: TRACING_TARGET_CODEC, len = data.len(), "decoding bytes");
        serde_json::from_slice(data).map_err(|err| self.decode_failed(err))
    }

    /// Decodes a string into `T`. Same semantics as
    /// [`decode_from_bytes`](Self::decode_from_bytes).
    pub fn decode_from_str<'de, T>(&self, data: &'de str) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        tracing::trace!(target: TRACING_TARGET_CODEC, len = data.len(), "decoding string");
        serde_json::from_str(data).map_err(|err| self.decode_failed(err))
    }

    /// Decodes one document from a reader.
    ///
    /// # Errors
    ///
    /// Same as [`decode_from_bytes`](Self::decode_from_bytes), plus
    /// [`Error::Io`] when the reader fails.
    pub fn decode_from_reader<R, T>(&self, reader: R) -> Result<T>
    where
        R: io::Read,
        T: DeserializeOwned,
    {
        tracing::trace!(target: TRACING_TARGET_CODEC, "decoding reader");
        serde_json::from_reader(reader).map_err(|err| self.decode_failed(err))
    }

    /// Decodes an already parsed JSON tree into `T`.
    pub fn decode_from_value<T>(&self, value: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(value).map_err(|err| self.decode_failed(err))
    }

    /// Encodes `value` into JSON bytes.
    ///
    /// With the default options the value is serialized directly and embedded
    /// `RawValue` documents are copied verbatim. Any enabled option re-encodes
    /// the value through a [`Value`] tree, so raw documents get the same
    /// escaping, key order and layout as the rest of the output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value cannot be represented as
    /// JSON, e.g. a map with non-string keys or a failing `Serialize` impl.
    pub fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: ?Sized + Serialize,
    {
        let mut out = Vec::with_capacity(128);
        if self.config.is_verbatim() {
            self.write(&mut out, value)?;
        } else {
            let mut tree = serde_json::to_value(value).map_err(|err| self.encode_failed(err))?;
            if self.config.sort_map_keys {
                sort_keys(&mut tree);
            }
            self.write(&mut out, &tree)?;
        }

        tracing::trace!(target: TRACING_TARGET_CODEC, len = out.len(), "encoded value");
        Ok(out)
    }

    /// Encodes `value` into a JSON string.
    pub fn encode_to_string<T>(&self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        let bytes = self.encode(value)?;
        String::from_utf8(bytes)
            .map_err(|err| self.encode_failed(serde::ser::Error::custom(err)))
    }

    fn write<T>(&self, out: &mut Vec<u8>, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match (self.config.escape_html, self.config.pretty) {
            (false, false) => serialize_with(out, value, CompactFormatter),
            (false, true) => serialize_with(out, value, PrettyFormatter::new()),
            (true, false) => serialize_with(out, value, HtmlSafeFormatter::new(CompactFormatter)),
            (true, true) => serialize_with(
                out,
                value,
                HtmlSafeFormatter::new(PrettyFormatter::new()),
            ),
        }
        .map_err(|err| self.encode_failed(err))
    }

    fn decode_failed(&self, err: serde_json::Error) -> Error {
        let error = Error::from_decode(err);
        tracing::debug!(
            target: TRACING_TARGET_CODEC,
            kind = error.kind_str(),
            line = error.line(),
            column = error.column(),
            error = %error,
            "decode failed"
        );
        error
    }

    fn encode_failed(&self, err: serde_json::Error) -> Error {
        let error = Error::from_encode(err);
        tracing::debug!(
            target: TRACING_TARGET_CODEC,
            kind = error.kind_str(),
            error = %error,
            "encode failed"
        );
        error
    }
}

fn serialize_with<T, F>(out: &mut Vec<u8>, value: &T, formatter: F) -> serde_json::Result<()>
where
    T: ?Sized + Serialize,
    F: Formatter,
{
    let mut serializer = Serializer::with_formatter(out, formatter);
    value.serialize(&mut serializer)
}

/// Sorts object keys recursively.
fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (key, mut value) in entries {
                sort_keys(&mut value);
                map.insert(key, value);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};
    use serde_json::value::RawValue;

    use super::*;
    use crate::{ErrorKind, FlexibleInt};

    #[derive(Debug, Serialize, Deserialize)]
    struct Event {
        name: String,
        created: FlexibleInt,
        #[serde(default)]
        tags: Vec<String>,
    }

    fn codec() -> TolerantCodec {
        TolerantCodec::default()
    }

    #[test]
    fn test_decode_bytes_and_str_agree() {
        let input = r#"{"name": "deploy", "created": "1748682323.9", "tags": ["a"]}"#;
        let from_bytes: Event = codec().decode_from_bytes(input.as_bytes()).unwrap();
        let from_str: Event = codec().decode_from_str(input).unwrap();
        assert_eq!(from_bytes.created, from_str.created);
        assert_eq!(from_bytes.created.as_i64(), 1748682323);
        assert_eq!(from_str.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let input = r#"{"name": "x", "created": 1, "extra": {"deep": [1, 2]}, "more": null}"#;
        let event: Event = codec().decode_from_str(input).unwrap();
        assert_eq!(event.name, "x");
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let input = r#"{"Name": "x", "created": 1}"#;
        let error = codec().decode_from_str::<Event>(input).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedInput);
        assert!(error.to_string().contains("missing field `name`"));
    }

    #[test]
    fn test_error_taxonomy() {
        let cases = [
            (r#"{"name": "x", "created": 1"#, ErrorKind::MalformedInput),
            (r#"{"name": "x", "created": 1} trailing"#, ErrorKind::MalformedInput),
            (r#"{"name": 5, "created": 1}"#, ErrorKind::MalformedInput),
            (r#"{"name": "x", "created": "soon"}"#, ErrorKind::InvalidNumericFormat),
            (r#"{"name": "x", "created": true}"#, ErrorKind::UnexpectedTokenKind),
            (r#"{"name": "x", "created": [1]}"#, ErrorKind::UnexpectedTokenKind),
            (r#"{"name": "x", "created": {"s": 1}}"#, ErrorKind::UnexpectedTokenKind),
        ];

        for (input, kind) in cases {
            let error = codec().decode_from_str::<Event>(input).unwrap_err();
            assert_eq!(error.kind(), kind, "input: {input}");
        }
    }

    #[test]
    fn test_invalid_numeric_error_names_the_input() {
        let input = r#"{"name": "x", "created": "soon"}"#;
        let error = codec().decode_from_str::<Event>(input).unwrap_err();
        assert!(error.to_string().contains(r#""soon""#));
        assert_eq!(error.line(), Some(1));
    }

    #[test]
    fn test_raw_values_are_validated() {
        #[derive(Debug, Deserialize)]
        struct Envelope {
            payload: Box<RawValue>,
        }

        let envelope: Envelope = codec()
            .decode_from_str(r#"{"payload": {"keep": [1, "as", "is"]}}"#)
            .unwrap();
        assert_eq!(envelope.payload.get(), r#"{"keep": [1, "as", "is"]}"#);

        let error = codec()
            .decode_from_str::<Envelope>(r#"{"payload": {"keep": [1,}}"#)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_decoded_maps_keep_document_order() {
        let value: Value = codec().decode_from_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(codec().encode_to_string(&value).unwrap(), r#"{"b":1,"a":2,"c":3}"#);
    }

    #[test]
    fn test_decode_from_reader_and_value() {
        let input = br#"{"name": "r", "created": 7.5}"#;
        let event: Event = codec().decode_from_reader(&input[..]).unwrap();
        assert_eq!(event.created.as_i64(), 7);

        let tree = serde_json::json!({ "name": "v", "created": "-3.9" });
        let event: Event = codec().decode_from_value(tree).unwrap();
        assert_eq!(event.created.as_i64(), -3);

        let tree = serde_json::json!({ "name": "v", "created": false });
        let error = codec().decode_from_value::<Event>(tree).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedTokenKind);
    }

    #[test]
    fn test_reader_failure_is_io() {
        struct Broken;

        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let error = codec().decode_from_reader::<_, Event>(Broken).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_encode_default_is_compact_and_unescaped() {
        let event = Event {
            name: "<a & b>".into(),
            created: FlexibleInt::new(1748682323),
            tags: vec![],
        };
        assert_eq!(
            codec().encode_to_string(&event).unwrap(),
            r#"{"name":"<a & b>","created":1748682323,"tags":[]}"#
        );
    }

    #[test]
    fn test_encode_escape_html() {
        let codec = TolerantCodec::new(CodecConfig::new().with_escape_html(true));
        let encoded = codec.encode_to_string(&serde_json::json!({ "html": "<a & b>" })).unwrap();
        assert_eq!(encoded, r#"{"html":"\u003ca \u0026 b\u003e"}"#);
    }

    #[test]
    fn test_encode_sort_map_keys() {
        let value: Value = codec()
            .decode_from_str(r#"{"z": {"y": 1, "x": 2}, "a": [{"d": 1, "c": 2}]}"#)
            .unwrap();

        let sorted = TolerantCodec::new(CodecConfig::new().with_sort_map_keys(true));
        assert_eq!(
            sorted.encode_to_string(&value).unwrap(),
            r#"{"a":[{"c":2,"d":1}],"z":{"x":2,"y":1}}"#
        );
        assert_eq!(
            codec().encode_to_string(&value).unwrap(),
            r#"{"z":{"y":1,"x":2},"a":[{"d":1,"c":2}]}"#
        );
    }

    #[test]
    fn test_encode_pretty() {
        let pretty = TolerantCodec::new(CodecConfig::new().with_pretty(true));
        let encoded = pretty
            .encode_to_string(&serde_json::json!({ "created": FlexibleInt::new(1) }))
            .unwrap();
        assert_eq!(encoded, "{\n  \"created\": 1\n}");
    }

    #[test]
    fn test_raw_documents_follow_every_option() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Message {
            tool_calls: Box<RawValue>,
        }

        let message: Message = codec()
            .decode_from_str(r#"{"tool_calls": [{"z": 1, "a": "<b>"}]}"#)
            .unwrap();

        let cases = [
            (CodecConfig::new(), r#"{"tool_calls":[{"z": 1, "a": "<b>"}]}"#),
            (
                CodecConfig::new().with_escape_html(true),
                r#"{"tool_calls":[{"z":1,"a":"\u003cb\u003e"}]}"#,
            ),
            (
                CodecConfig::new().with_sort_map_keys(true),
                r#"{"tool_calls":[{"a":"<b>","z":1}]}"#,
            ),
            (
                CodecConfig::new()
                    .with_escape_html(true)
                    .with_sort_map_keys(true),
                r#"{"tool_calls":[{"a":"\u003cb\u003e","z":1}]}"#,
            ),
        ];

        for (config, expected) in cases {
            let encoded = TolerantCodec::new(config).encode_to_string(&message).unwrap();
            assert_eq!(encoded, expected, "config: {config:?}");
        }

        let pretty = TolerantCodec::new(CodecConfig::new().with_pretty(true));
        assert_eq!(
            pretty.encode_to_string(&message).unwrap(),
            "{\n  \"tool_calls\": [\n    {\n      \"z\": 1,\n      \"a\": \"<b>\"\n    }\n  ]\n}"
        );
    }

    #[test]
    fn test_encode_unrepresentable_value() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");
        let error = codec().encode(&map).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);

        let sorted = TolerantCodec::new(CodecConfig::new().with_sort_map_keys(true));
        let error = sorted.encode(&map).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Serialization);
    }
}
