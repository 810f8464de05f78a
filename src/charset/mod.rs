//! Character-set classification and decoding.
//!
//! The classifier guesses the source encoding of a captured document. It is a
//! black box to the rest of the pipeline: callers get back a usable encoding
//! and the signal it came from, never an error. The standard implementation
//! checks, in order: a client override header, a byte-order mark, the
//! capture's `Content-Type` header, a `<meta>` declaration in the head of the
//! payload, and finally the configured default.

mod sniff;

use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::config::{DEFAULT_CHARSET_LABEL, HEADER_CHARSET_OVERRIDE};
use crate::models::{CapturedResource, RequestContext};

/// Which rung of the detection ladder produced the charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSource {
    /// The client forced a charset via the override request header.
    OverrideHeader,
    /// The payload starts with a byte-order mark.
    ByteOrderMark,
    /// The capture's Content-Type header carried a charset parameter.
    ContentTypeHeader,
    /// A meta declaration inside the sniff window named the charset.
    MetaTag,
    /// No signal was found; this is the ambiguous-detection fallback.
    Default,
}

/// A charset classification: the encoding to decode with and where the
/// signal came from.
#[derive(Debug, Clone, Copy)]
pub struct CharsetGuess {
    /// Encoding to decode the payload with.
    pub encoding: &'static Encoding,
    /// Signal the encoding was derived from.
    pub source: CharsetSource,
}

impl CharsetGuess {
    /// Canonical label of the guessed encoding, as reported in the
    /// diagnostic response header.
    pub fn label(&self) -> &'static str {
        self.encoding.name()
    }

    /// Whether the guess is the no-signal fallback.
    pub fn is_fallback(&self) -> bool {
        self.source == CharsetSource::Default
    }
}

/// Guesses the source charset of a captured document.
///
/// Implementations must always return a usable guess and be side-effect-free;
/// one detector instance serves many renders concurrently.
pub trait CharsetDetector: Send + Sync {
    /// Classifies the charset of `resource` for the request in `request`.
    fn detect(&self, resource: &CapturedResource, request: &RequestContext) -> CharsetGuess;
}

/// The standard detection ladder (override header, BOM, Content-Type header,
/// meta declaration, default).
///
/// Each rung that yields a label naming no known encoding falls through to
/// the next; only exhausting the ladder produces the fallback guess.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCharsetDetector;

impl CharsetDetector for StandardCharsetDetector {
    fn detect(&self, resource: &CapturedResource, request: &RequestContext) -> CharsetGuess {
        if let Some(encoding) = request
            .headers
            .get(HEADER_CHARSET_OVERRIDE)
            .and_then(sniff::encoding_for_label)
        {
            return CharsetGuess {
                encoding,
                source: CharsetSource::OverrideHeader,
            };
        }

        if let Some(encoding) = sniff::charset_from_bom(&resource.body) {
            return CharsetGuess {
                encoding,
                source: CharsetSource::ByteOrderMark,
            };
        }

        if let Some(encoding) = resource
            .headers
            .get("Content-Type")
            .and_then(sniff::charset_from_content_type)
        {
            return CharsetGuess {
                encoding,
                source: CharsetSource::ContentTypeHeader,
            };
        }

        if let Some(encoding) = sniff::charset_from_meta(&resource.body) {
            return CharsetGuess {
                encoding,
                source: CharsetSource::MetaTag,
            };
        }

        CharsetGuess {
            encoding: sniff::encoding_for_label(DEFAULT_CHARSET_LABEL).unwrap_or(UTF_8),
            source: CharsetSource::Default,
        }
    }
}

/// Decodes a payload with the guessed encoding.
///
/// Malformed sequences become replacement characters rather than failures; a
/// leading byte-order mark is consumed, not carried into the text.
pub fn decode(bytes: &[u8], guess: CharsetGuess) -> String {
    let (text, actual, had_errors) = guess.encoding.decode(bytes);
    if had_errors {
        debug!(
            "payload contained byte sequences malformed for {}; replaced",
            actual.name()
        );
    }
    text.into_owned()
}
