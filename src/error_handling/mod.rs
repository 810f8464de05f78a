//! Error handling and render statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Render statistics tracking (errors, warnings, info metrics)
//!
//! Error types are categorized into:
//! - **Errors**: Failures that abort a render before any output is released
//! - **Warnings**: Degradations absorbed by passing content through unchanged
//! - **Info**: Informational metrics (charset signal source, base updates, etc.)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::update_error_stats;
pub use stats::RenderStats;
pub use types::{ErrorType, InfoType, InitializationError, LexError, RenderError, WarningType};
