//! Application initialization.
//!
//! This module wires up the pieces the binary needs before the first render:
//! the logger and the renderer with its converter.

mod logger;

use std::sync::Arc;

use crate::render::ReplayRenderer;
use crate::rewrite::ArchivalUrlConverter;

// Re-export public API
pub use logger::init_logger_with;

/// Initializes a renderer that produces replay URLs under `replay_prefix`.
///
/// The renderer is cheap to share; callers that render many captures clone
/// the `Arc` instead of building one renderer per capture.
pub fn init_renderer(replay_prefix: &str) -> Arc<ReplayRenderer> {
    Arc::new(ReplayRenderer::new(Arc::new(ArchivalUrlConverter::new(
        replay_prefix,
    ))))
}
