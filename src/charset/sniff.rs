//! Charset signal extraction from bytes and header values.

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::Regex;

use crate::config::CHARSET_SNIFF_WINDOW;

// Matches <meta charset="..."> and the charset attribute spelling inside
// <meta http-equiv="Content-Type" content="text/html; charset=...">.
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#)
        .expect("charset meta regex should compile")
});

// Matches the charset parameter of a Content-Type header value.
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#)
        .expect("content-type charset regex should compile")
});

/// Resolves a charset label to an encoding, if the label names one.
pub(crate) fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Reads a byte-order mark, if the payload starts with one.
pub(crate) fn charset_from_bom(bytes: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(bytes).map(|(encoding, _)| encoding)
}

/// Extracts the charset parameter from a Content-Type header value.
pub(crate) fn charset_from_content_type(value: &str) -> Option<&'static Encoding> {
    CONTENT_TYPE_CHARSET_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|label| encoding_for_label(label.as_str()))
}

/// Scans the head of the payload for a `<meta>` charset declaration.
///
/// Only the first `CHARSET_SNIFF_WINDOW` bytes are considered, the window
/// real user agents pre-scan. The window is decoded as if ASCII-compatible,
/// which every declarable encoding is in the region a meta tag occupies.
pub(crate) fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let window = &bytes[..bytes.len().min(CHARSET_SNIFF_WINDOW)];
    let head = String::from_utf8_lossy(window);
    CHARSET_META_RE
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| encoding_for_label(label.as_str()))
}
