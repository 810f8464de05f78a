//! HTTP header handling.
//!
//! This module provides the order-preserving `HeaderSet` map and the
//! reconciliation step that corrects a capture's original framing against the
//! rewritten body.

mod reconcile;
mod set;

// Re-export public API
pub use reconcile::reconcile;
pub use set::HeaderSet;
