//! Context-aware markup tokenizer.
//!
//! Splits a decoded capture into a lazy stream of tags, text runs and
//! comments. Content of raw-text elements (`script`, `style`, `textarea`,
//! `title`) is yielded as opaque text so markup-looking bytes inside it are
//! never mistaken for tags.

mod scan;
mod token;

// Re-export public API
pub use scan::{is_raw_text_element, ContextAwareLexer, RAW_TEXT_ELEMENTS};
pub use token::{serialize_open_tag, Attribute, QuoteStyle, Token};
