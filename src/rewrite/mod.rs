//! Reference rewriting.
//!
//! Everything between tokenization and re-encoding: deciding which
//! attributes carry URLs, resolving each reference against the capture's
//! base, and converting the absolute result into a replay URL.

mod context;
mod dispatch;
mod rules;
mod urls;

// Re-export public API
pub use context::RewriteContext;
pub use dispatch::TokenDispatcher;
pub use urls::{ArchivalUrlConverter, UrlConverter};
