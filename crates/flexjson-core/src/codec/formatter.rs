//! Output formatter that escapes HTML-significant characters.

use std::io;

use serde_json::ser::Formatter;

/// Wraps another [`Formatter`] and rewrites `<`, `>` and `&` inside string
/// contents to `\u003c`, `\u003e` and `\u0026`.
///
/// Layout (compact or pretty) is delegated to the inner formatter.
#[derive(Debug, Clone)]
pub(crate) struct HtmlSafeFormatter<F> {
    inner: F,
}

impl<F> HtmlSafeFormatter<F> {
    pub(crate) fn new(inner: F) -> Self {
        Self { inner }
    }
}

fn html_escape(byte: u8) -> Option<&'static [u8]> {
    match byte {
        b'<' => Some(b"\\u003c"),
        b'>' => Some(b"\\u003e"),
        b'&' => Some(b"\\u0026"),
        _ => None,
    }
}

/// Writes `fragment` with HTML-significant bytes escaped, passing the
/// unescaped runs to `write_plain`.
fn write_html_escaped<W, P>(writer: &mut W, fragment: &str, mut write_plain: P) -> io::Result<()>
where
    W: ?Sized + io::Write,
    P: FnMut(&mut W, &str) -> io::Result<()>,
{
    let bytes = fragment.as_bytes();
    let mut start = 0;

    for (index, byte) in bytes.iter().enumerate() {
        let Some(escaped) = html_escape(*byte) else {
            continue;
        };
        if start < index {
            write_plain(writer, &fragment[start..index])?;
        }
        writer.write_all(escaped)?;
        start = index + 1;
    }

    if start < bytes.len() {
        write_plain(writer, &fragment[start..])?;
    }
    Ok(())
}

impl<F: Formatter> Formatter for HtmlSafeFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let inner = &mut self.inner;
        write_html_escaped(writer, fragment, |writer, plain| {
            inner.write_string_fragment(writer, plain)
        })
    }

    /// Raw JSON can only hold `<`, `>` and `&` inside string literals, where
    /// the `\u` escapes are valid.
    fn write_raw_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let inner = &mut self.inner;
        write_html_escaped(writer, fragment, |writer, plain| {
            inner.write_raw_fragment(writer, plain)
        })
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}
