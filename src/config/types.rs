//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::DEFAULT_REPLAY_PREFIX;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// CLI configuration for rendering one capture from disk.
///
/// The binary performs no network I/O: the captured bytes come from
/// `--input`, the original framing (status and headers) from the optional
/// `--capture-meta` JSON sidecar, and the rendered HTTP response goes to
/// `--output` or stdout.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "capture_replay",
    version,
    about = "Replays an archived web page, rewriting embedded references to resolve against the archive."
)]
pub struct Config {
    /// File holding the captured raw bytes
    #[arg(long)]
    pub input: PathBuf,

    /// Original URL of the captured page
    #[arg(long)]
    pub url: String,

    /// Capture timestamp (14 digits, YYYYMMDDhhmmss)
    #[arg(long)]
    pub timestamp: String,

    /// Optional JSON sidecar with the capture's original status and headers
    #[arg(long)]
    pub capture_meta: Option<PathBuf>,

    /// Path prefix for generated replay URLs
    #[arg(long, default_value = DEFAULT_REPLAY_PREFIX)]
    pub replay_prefix: String,

    /// Write the rendered response here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("capture.html"),
            url: String::new(),
            timestamp: String::new(),
            capture_meta: None,
            replay_prefix: DEFAULT_REPLAY_PREFIX.to_string(),
            output: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
