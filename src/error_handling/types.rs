//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the
//! crate.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors that end the lexer's token sequence early.
///
/// All variants describe truncated input: a construct was opened and the
/// document ended before it was closed. Offsets are byte positions into the
/// decoded text.
#[derive(Error, Debug)]
pub enum LexError {
    /// A tag was opened with `<` and the input ended before its `>`.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag {
        /// Byte offset of the `<` that opened the tag.
        offset: usize,
    },

    /// A comment was opened with `<!--` and the input ended before `-->`.
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment {
        /// Byte offset of the `<` that opened the comment.
        offset: usize,
    },

    /// A markup declaration (`<!...>` or `<?...>`) never reached its `>`.
    #[error("unterminated markup declaration starting at byte {offset}")]
    UnterminatedDeclaration {
        /// Byte offset of the `<` that opened the declaration.
        offset: usize,
    },

    /// A raw-text element (`script`, `style`, ...) was never closed.
    #[error("<{element}> element starting at byte {offset} has no closing tag")]
    UnclosedRawText {
        /// Name of the raw-text element left open.
        element: String,
        /// Byte offset where its content began.
        offset: usize,
    },
}

/// Errors that abort a render.
///
/// All variants are document-level failures: they occur before any header or
/// body byte is released, so the caller can still produce an alternative
/// response without protocol corruption.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The captured page's own URL cannot be parsed.
    ///
    /// This indicates upstream data corruption (the capture index handed us a
    /// descriptor it should never have stored), not a user error.
    #[error("capture URL {url:?} is not parseable: {source}")]
    MalformedPageUrl {
        /// The URL string as received.
        url: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },

    /// The capture timestamp is not a valid 14-digit `YYYYMMDDhhmmss` value.
    #[error("capture timestamp {timestamp:?} is not a valid YYYYMMDDhhmmss value")]
    InvalidTimestamp {
        /// The timestamp string as received.
        timestamp: String,
    },

    /// The captured markup could not be consumed to the end.
    #[error("markup tokenization failed: {0}")]
    Tokenize(#[from] LexError),

    /// A write failed while emitting the finalized response.
    #[error("response emission failed: {0}")]
    Emit(#[from] std::io::Error),
}

/// Types of fatal errors counted during rendering.
///
/// This enum categorizes actual error conditions - failures that abort a
/// render before any output reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Page URL in the capture descriptor did not parse
    MalformedPageUrl,
    /// Capture timestamp was not a valid 14-digit value
    InvalidTimestamp,
    /// Lexer hit truncated input and ended the token stream early
    TokenizeFailure,
    /// Sink write failed during the emission phase
    EmitFailure,
}

/// Types of warnings counted during rendering.
///
/// Warnings are degradations the render absorbs: the document still replays,
/// but some part of it was passed through instead of rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// An embedded reference could not be resolved; original value kept
    UnresolvableReference,
    /// Charset detection found no signal and fell back to the default label
    CharsetFallback,
}

/// Types of informational metrics counted during rendering.
///
/// Info metrics track which signal decided the charset and which optional
/// rewrites actually fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// Charset came from the client override header
    CharsetFromOverride,
    /// Charset came from a byte-order mark
    CharsetFromBom,
    /// Charset came from the capture's Content-Type header
    CharsetFromHeader,
    /// Charset came from a meta declaration in the sniff window
    CharsetFromMeta,
    /// A `<base href>` element changed the resolution base mid-document
    BaseUrlUpdated,
    /// A URL-bearing response header (e.g. Location) was rewritten
    LocationRewritten,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MalformedPageUrl => "Malformed page URL",
            ErrorType::InvalidTimestamp => "Invalid capture timestamp",
            ErrorType::TokenizeFailure => "Tokenize failure",
            ErrorType::EmitFailure => "Emit failure",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::UnresolvableReference => "Unresolvable reference",
            WarningType::CharsetFallback => "Charset fallback",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::CharsetFromOverride => "Charset from override header",
            InfoType::CharsetFromBom => "Charset from byte-order mark",
            InfoType::CharsetFromHeader => "Charset from Content-Type header",
            InfoType::CharsetFromMeta => "Charset from meta declaration",
            InfoType::BaseUrlUpdated => "Base URL updated",
            InfoType::LocationRewritten => "URL header rewritten",
        }
    }
}
