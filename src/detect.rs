//! Source loading and character encoding detection.
//!
//! Encoding is resolved in this order: explicit override, byte order mark,
//! `<meta charset>` in the first kilobyte, valid UTF-8, Windows-1251, and
//! finally Windows-1252 (which decodes any byte sequence).

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1251, WINDOWS_1252};
use regex::bytes::Regex;

use crate::error::{Error, Result};

/// How far into the document `<meta charset>` is looked for.
const META_SNIFF_LIMIT: usize = 1024;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("charset pattern is valid")
});

/// Where the source encoding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    /// Caller-provided label
    Override,
    /// Byte order mark
    Bom,
    /// `<meta charset>` or `http-equiv` declaration
    Meta,
    /// Input was valid UTF-8
    Utf8,
    /// A legacy single-byte fallback
    Fallback,
}

/// Decoded HTML text plus how it was decoded.
#[derive(Debug, Clone)]
pub struct DecodedSource {
    /// Document text
    pub text: String,
    /// Encoding used
    pub encoding: &'static Encoding,
    /// How the encoding was chosen
    pub detected_by: EncodingSource,
}

/// Read and decode an HTML file.
pub fn read_source<P: AsRef<Path>>(path: P, encoding: Option<&str>) -> Result<DecodedSource> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_source(&bytes, encoding)
}

/// Read and decode an HTML file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn read_source_async<P: AsRef<Path>>(
    path: P,
    encoding: Option<&str>,
) -> Result<DecodedSource> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    decode_source(&bytes, encoding)
}

/// Decode raw bytes into HTML text.
pub fn decode_source(bytes: &[u8], encoding: Option<&str>) -> Result<DecodedSource> {
    if let Some(label) = encoding {
        let enc = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| Error::Encoding(format!("Unknown encoding label: {}", label)))?;
        let (text, _, had_errors) = enc.decode(bytes);
        if had_errors {
            log::warn!("Input is not valid {}; invalid bytes were replaced", enc.name());
        }
        return Ok(decoded(text, enc, EncodingSource::Override));
    }

    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = enc.decode_without_bom_handling(&bytes[bom_len..]);
        return Ok(decoded(text, enc, EncodingSource::Bom));
    }

    if let Some(enc) = sniff_meta_charset(bytes) {
        let (text, _, had_errors) = enc.decode(bytes);
        if had_errors {
            log::warn!(
                "Document declares {} but contains invalid bytes; they were replaced",
                enc.name()
            );
        }
        return Ok(decoded(text, enc, EncodingSource::Meta));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(decoded(Cow::Borrowed(text), UTF_8, EncodingSource::Utf8));
    }

    if let Some(text) = WINDOWS_1251.decode_without_bom_handling_and_without_replacement(bytes) {
        log::debug!("Input is not UTF-8, decoded as windows-1251");
        return Ok(decoded(text, WINDOWS_1251, EncodingSource::Fallback));
    }

    log::debug!("Input is not UTF-8, decoded as windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    Ok(decoded(text, WINDOWS_1252, EncodingSource::Fallback))
}

fn decoded(text: Cow<'_, str>, encoding: &'static Encoding, by: EncodingSource) -> DecodedSource {
    DecodedSource {
        text: text.into_owned(),
        encoding,
        detected_by: by,
    }
}

/// Find a charset declared in a `<meta>` tag near the top of the document.
///
/// UTF-16 declarations are read as UTF-8, since a document that parses as
/// ASCII cannot actually be UTF-16.
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let caps = META_CHARSET_RE.captures(head)?;
    let enc = Encoding::for_label(caps.get(1)?.as_bytes())?;
    if enc == encoding_rs::UTF_16LE || enc == encoding_rs::UTF_16BE {
        Some(UTF_8)
    } else {
        Some(enc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_input() {
        let decoded = decode_source("<p>Привет</p>".as_bytes(), None).unwrap();
        assert_eq!(decoded.text, "<p>Привет</p>");
        assert_eq!(decoded.encoding, UTF_8);
        assert_eq!(decoded.detected_by, EncodingSource::Utf8);
    }

    #[test]
    fn test_bom_is_stripped() {
        let decoded = decode_source(b"\xEF\xBB\xBF<p>x</p>", None).unwrap();
        assert_eq!(decoded.text, "<p>x</p>");
        assert_eq!(decoded.detected_by, EncodingSource::Bom);
    }

    #[test]
    fn test_meta_charset() {
        let (bytes, _, _) =
            WINDOWS_1251.encode("<meta charset=\"windows-1251\"><td>Привет</td>");
        let decoded = decode_source(&bytes, None).unwrap();
        assert!(decoded.text.contains("Привет"));
        assert_eq!(decoded.detected_by, EncodingSource::Meta);
    }

    #[test]
    fn test_http_equiv_charset() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        assert_eq!(sniff_meta_charset(html), Some(WINDOWS_1252));
    }

    #[test]
    fn test_cyrillic_fallback() {
        let (bytes, _, _) = WINDOWS_1251.encode("<td>Таблица</td>");
        let decoded = decode_source(&bytes, None).unwrap();
        assert_eq!(decoded.text, "<td>Таблица</td>");
        assert_eq!(decoded.encoding, WINDOWS_1251);
        assert_eq!(decoded.detected_by, EncodingSource::Fallback);
    }

    #[test]
    fn test_override() {
        let decoded = decode_source(b"caf\xE9", Some("latin1")).unwrap();
        assert_eq!(decoded.text, "café");
        assert_eq!(decoded.detected_by, EncodingSource::Override);
    }

    #[test]
    fn test_unknown_override_label() {
        let err = decode_source(b"x", Some("klingon")).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source("definitely/not/here.html", None).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
