//! Configuration constants.
//!
//! This module defines the fixed pipeline parameters: the canonical output
//! encoding, charset detection limits, timestamp format, and the default
//! shape of replay URLs.

// Canonical output encoding
/// Charset label all rewritten output is encoded in.
///
/// Every rendered body is re-encoded to this charset regardless of the
/// capture's original encoding, and the reconciled `Content-Type` header
/// declares it.
pub const OUTPUT_CHARSET: &str = "utf-8";

/// Fallback charset label used when detection finds no usable signal.
///
/// Reaching this fallback marks the detection as ambiguous; the label still
/// appears in the diagnostic charset header so clients can see what was
/// assumed.
pub const DEFAULT_CHARSET_LABEL: &str = "utf-8";

// Charset detection limits
/// Number of leading payload bytes scanned for a `<meta>` charset declaration.
///
/// Matches the window browsers use for charset pre-scanning; declarations
/// past this point are ignored by real user agents too.
pub const CHARSET_SNIFF_WINDOW: usize = 1024;

// Capture timestamps
/// `chrono` format string for the 14-digit capture timestamp (YYYYMMDDhhmmss).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Exact length of a well-formed capture timestamp.
pub const TIMESTAMP_LENGTH: usize = 14;

// Replay URL shape
/// Default path prefix for archival replay URLs.
///
/// The standard converter forms `{prefix}{timestamp}/{absolute-url}`, so with
/// this default a capture of `http://example.com/` at `20200101000000` replays
/// from `/web/20200101000000/http://example.com/`.
pub const DEFAULT_REPLAY_PREFIX: &str = "/web/";

// Reference limits
/// Maximum length in characters of an attribute reference we attempt to
/// rewrite.
///
/// Longer values (typically inlined data blobs that escaped the scheme
/// check) pass through unchanged and are counted as unresolvable.
pub const MAX_REFERENCE_LENGTH: usize = 8192;

/// Schemes whose references are never rewritten.
///
/// These do not name an archived resource: they either execute in the page
/// (`javascript:`), carry their payload inline (`data:`, `blob:`) or leave
/// the document entirely (`mailto:`, `tel:`, `about:`). Matched
/// case-insensitively against the start of the reference.
pub const SKIP_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "mailto:",
    "tel:",
    "about:",
    "blob:",
];

// Response defaults
/// Status code assumed when a capture carries no recorded status.
pub const DEFAULT_STATUS_CODE: u16 = 200;

/// Reason phrase assumed when a capture carries no recorded status.
pub const DEFAULT_REASON_PHRASE: &str = "OK";

/// Media type synthesized when a capture has no `Content-Type` header at all.
pub const DEFAULT_MEDIA_TYPE: &str = "text/html";
