//! Decode-then-encode normalization of payload documents.

use std::io::{BufRead, Write};

use anyhow::Context;
use flexjson_core::TolerantCodec;
use flexjson_dto::{ChatCompletionChunk, ChatCompletionResponse};

use crate::TRACING_TARGET_NORMALIZE;
use crate::config::PayloadKind;

const SSE_DATA_PREFIX: &str = "data:";
const SSE_DONE_MARKER: &str = "[DONE]";

/// Normalizes every document in `reader` and writes one canonical document
/// per line to `writer`.
///
/// Returns the number of documents written.
pub fn normalize<R, W>(
    codec: &TolerantCodec,
    kind: PayloadKind,
    lines: bool,
    mut reader: R,
    writer: &mut W,
) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write,
{
    if !lines {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .context("failed to read input")?;
        let output = normalize_document(codec, kind, &data).context("failed to normalize input")?;
        write_document(writer, &output)?;
        return Ok(1);
    }

    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_number}"))?;
        let Some(document) = stream_document(&line) else {
            continue;
        };

        let output = normalize_document(codec, kind, document.as_bytes())
            .with_context(|| format!("failed to normalize line {line_number}"))?;
        write_document(writer, &output)?;
        count += 1;
    }

    Ok(count)
}

/// Decodes one document as `kind` and re-encodes it.
pub fn normalize_document(
    codec: &TolerantCodec,
    kind: PayloadKind,
    data: &[u8],
) -> flexjson_core::Result<Vec<u8>> {
    match kind {
        PayloadKind::Completion => {
            let response: ChatCompletionResponse = codec.decode_from_bytes(data)?;
            tracing::debug!(
                target: TRACING_TARGET_NORMALIZE,
                id = %response.id,
                created = response.created.as_i64(),
                choices = response.choices.len(),
                "decoded completion"
            );
            codec.encode(&response)
        }
        PayloadKind::Chunk => {
            let chunk: ChatCompletionChunk = codec.decode_from_bytes(data)?;
            tracing::debug!(
                target: TRACING_TARGET_NORMALIZE,
                id = %chunk.id,
                created = chunk.created.as_i64(),
                "decoded chunk"
            );
            codec.encode(&chunk)
        }
    }
}

/// Extracts the JSON document from one stream line, if it carries one.
fn stream_document(line: &str) -> Option<&str> {
    let line = line.trim();
    let line = line
        .strip_prefix(SSE_DATA_PREFIX)
        .map_or(line, str::trim_start);

    if line.is_empty() || line == SSE_DONE_MARKER {
        None
    } else {
        Some(line)
    }
}

fn write_document<W: Write>(writer: &mut W, document: &[u8]) -> anyhow::Result<()> {
    writer
        .write_all(document)
        .and_then(|()| writer.write_all(b"\n"))
        .context("failed to write output")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use flexjson_core::{CodecConfig, ErrorKind};

    use super::*;

    const COMPLETION: &str = r#"{
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1748682323.3797884,
        "model": "Meta-Llama-3.1-8B-Instruct",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi"}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18},
        "provider_extra": {"ignored": true}
    }"#;

    fn run(codec: &TolerantCodec, kind: PayloadKind, lines: bool, input: &str) -> (usize, String) {
        let mut out = Vec::new();
        let count = normalize(codec, kind, lines, Cursor::new(input), &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_single_document() {
        let (count, output) = run(
            &TolerantCodec::default(),
            PayloadKind::Completion,
            false,
            COMPLETION,
        );

        assert_eq!(count, 1);
        assert_eq!(
            output,
            concat!(
                r#"{"id":"chatcmpl-test","object":"chat.completion","created":1748682323,"#,
                r#""model":"Meta-Llama-3.1-8B-Instruct","choices":[{"index":0,"#,
                r#""message":{"role":"assistant","content":"Hi"},"finish_reason":"stop"}],"#,
                r#""usage":{"prompt_tokens":10,"completion_tokens":8,"total_tokens":18}}"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_stream_lines() {
        let input = concat!(
            "data: {\"id\":\"c\",\"created\":\"1748682323.5\",\"model\":\"m\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"He\"}}]}\n",
            "\n",
            "data: {\"id\":\"c\",\"created\":1748682323.5,\"model\":\"m\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"llo\"},\"finish_reason\":\"stop\"}]}\n",
            "data: [DONE]\n",
        );

        let (count, output) = run(&TolerantCodec::default(), PayloadKind::Chunk, true, input);

        assert_eq!(count, 2);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.contains(r#""created":1748682323,"#)));
        assert!(lines[1].contains(r#""finish_reason":"stop""#));
    }

    #[test]
    fn test_codec_config_is_applied() {
        let codec = TolerantCodec::new(CodecConfig::new().with_sort_map_keys(true));
        let (_, output) = run(
            &codec,
            PayloadKind::Chunk,
            false,
            r#"{"model":"m","id":"c","created":1,"choices":[]}"#,
        );
        assert_eq!(
            output,
            "{\"choices\":[],\"created\":1,\"id\":\"c\",\"model\":\"m\",\"object\":\"\"}\n"
        );
    }

    #[test]
    fn test_failing_line_is_reported() {
        let input = concat!(
            "{\"id\":\"c\",\"created\":1,\"model\":\"m\"}\n",
            "{\"id\":\"c\",\"created\":\"later\",\"model\":\"m\"}\n",
        );

        let mut out = Vec::new();
        let error = normalize(
            &TolerantCodec::default(),
            PayloadKind::Chunk,
            true,
            Cursor::new(input),
            &mut out,
        )
        .unwrap_err();

        assert!(format!("{error:#}").contains("line 2"));
        let source = error.downcast_ref::<flexjson_core::Error>().unwrap();
        assert_eq!(source.kind(), ErrorKind::InvalidNumericFormat);
    }

    #[test]
    fn test_stream_document_extraction() {
        assert_eq!(stream_document("data: {}"), Some("{}"));
        assert_eq!(stream_document("data:{}"), Some("{}"));
        assert_eq!(stream_document("  {\"a\":1}  "), Some("{\"a\":1}"));
        assert_eq!(stream_document("data: [DONE]"), None);
        assert_eq!(stream_document("   "), None);
    }
}
