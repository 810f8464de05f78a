//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `capture_replay` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use capture_replay::initialization::init_logger_with;
use capture_replay::{render_capture, Config};

fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Render the capture using the library
    match render_capture(config) {
        Ok(report) => {
            // Print user-friendly summary; when the response itself went to
            // stdout the summary moves to stderr to keep the wire bytes clean
            let summary = format!(
                "✅ Rendered {} byte{} (status {}, charset {}{}, {} unresolvable reference{}) in {:.1}s",
                report.bytes_emitted,
                if report.bytes_emitted == 1 { "" } else { "s" },
                report.status_code,
                report.detected_charset,
                if report.charset_was_fallback {
                    " (assumed)"
                } else {
                    ""
                },
                report.unresolvable_references,
                if report.unresolvable_references == 1 {
                    ""
                } else {
                    "s"
                },
                report.elapsed_seconds
            );
            match &report.output {
                Some(path) => {
                    println!("{summary}");
                    println!("Response written to {}", path.display());
                }
                None => eprintln!("{summary}"),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("capture_replay error: {:#}", e);
            process::exit(1);
        }
    }
}
