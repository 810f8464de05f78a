//! Application configuration and constants.
//!
//! This module provides:
//! - Pipeline constants (output charset, sniff window, replay URL shape)
//! - HTTP header name constants and reconciliation tables
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel};
