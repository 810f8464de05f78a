//! HTTP header name constants.
//!
//! This module defines constants for the headers the reconciler strips,
//! rewrites, or injects when correcting a capture's original framing.

// Framing headers
// These describe the transfer of the original body and are invalidated by
// decoding and re-encoding it.
/// Content-Length header (recomputed against the rewritten body)
pub const HEADER_CONTENT_LENGTH: &str = "Content-Length";
/// Transfer-Encoding header (body is no longer chunked/streamed)
pub const HEADER_TRANSFER_ENCODING: &str = "Transfer-Encoding";
/// Content-Encoding header (body is no longer compressed)
pub const HEADER_CONTENT_ENCODING: &str = "Content-Encoding";

/// Headers stripped from every reconciled response.
/// All of them describe the original byte framing, which the rewrite
/// invalidates; `Content-Length` is re-added with the corrected value.
pub const STRIPPED_FRAMING_HEADERS: &[&str] = &[
    HEADER_CONTENT_LENGTH,
    HEADER_TRANSFER_ENCODING,
    HEADER_CONTENT_ENCODING,
];

// URL-bearing headers
// Their values point at the live web and must go through the same resolver
// as in-document references.
/// Location header (redirect target)
pub const HEADER_LOCATION: &str = "Location";
/// Content-Location header (alternate representation URL)
pub const HEADER_CONTENT_LOCATION: &str = "Content-Location";
/// Content-Base header (obsolete but still present in old captures)
pub const HEADER_CONTENT_BASE: &str = "Content-Base";

/// Headers whose values are rewritten through the URL resolver in place.
pub const URL_HEADERS: &[&str] = &[
    HEADER_LOCATION,
    HEADER_CONTENT_LOCATION,
    HEADER_CONTENT_BASE,
];

// Content type
/// Content-Type header (charset parameter is rewritten to the output charset)
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

// Diagnostic headers
/// Response header carrying the charset label the classifier detected.
pub const HEADER_GUESSED_CHARSET: &str = "X-Replay-Guessed-Charset";

/// Request header a client can send to force a source charset, bypassing
/// detection.
pub const HEADER_CHARSET_OVERRIDE: &str = "X-Replay-Charset";
