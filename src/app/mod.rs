//! Main application modules.
//!
//! This module provides the statistics printing used by the main
//! application after a render completes.

pub mod statistics;

// Re-export public API
pub use statistics::{print_render_statistics, print_render_summary};
