//! Error categorization.
//!
//! Maps structured `RenderError` values onto the `ErrorType` taxonomy so the
//! shared statistics tracker can count them.

use super::stats::RenderStats;
use super::types::{ErrorType, RenderError};

/// Returns the taxonomy bucket for a render error.
pub fn categorize_render_error(error: &RenderError) -> ErrorType {
    match error {
        RenderError::MalformedPageUrl { .. } => ErrorType::MalformedPageUrl,
        RenderError::InvalidTimestamp { .. } => ErrorType::InvalidTimestamp,
        RenderError::Tokenize(_) => ErrorType::TokenizeFailure,
        RenderError::Emit(_) => ErrorType::EmitFailure,
    }
}

/// Counts a render error in the shared statistics tracker.
pub fn update_error_stats(stats: &RenderStats, error: &RenderError) {
    stats.increment_error(categorize_render_error(error));
}
