//! capture_replay library: archived web page replay rendering
//!
//! This library turns stored web captures into replayable HTTP responses:
//! the captured markup is decoded using its detected charset, every embedded
//! reference is rewritten to an archival replay URL, the result is re-encoded,
//! and the response headers are reconciled so the framing matches the
//! rewritten body exactly.
//!
//! # Example
//!
//! ```no_run
//! use capture_replay::{render_capture, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("capture.html"),
//!     url: "http://example.com/page.html".to_string(),
//!     timestamp: "20200101000000".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = render_capture(config)?;
//! println!("Rendered {} bytes (charset {})",
//!          report.bytes_emitted, report.detected_charset);
//! # Ok(())
//! # }
//! ```
//!
//! For programmatic use, build a [`ReplayRenderer`] directly and call
//! [`ReplayRenderer::render`] per capture; one renderer serves any number of
//! captures.

#![warn(missing_docs)]

mod app;
mod charset;
pub mod config;
mod error_handling;
mod headers;
pub mod initialization;
pub mod lexer;
mod models;
mod render;
mod rewrite;

// Re-export public API
pub use charset::{CharsetDetector, CharsetGuess, CharsetSource, StandardCharsetDetector};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    ErrorType, InfoType, InitializationError, LexError, RenderError, RenderStats, WarningType,
};
pub use headers::HeaderSet;
pub use models::{
    CaptureDescriptor, CapturedResource, RenderResult, ReplayResponse, RequestContext,
};
pub use render::{HttpResponseWriter, ReplayRenderer, ResponseSink};
pub use rewrite::{ArchivalUrlConverter, RewriteContext, TokenDispatcher, UrlConverter};
pub use run::{render_capture, RenderReport};

// Internal run module (contains the CLI-facing render workflow)
mod run {
    use std::fs::File;
    use std::io::{self, BufWriter};
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use log::info;
    use serde::Deserialize;

    use crate::app::{print_render_statistics, print_render_summary};
    use crate::config::{Config, DEFAULT_REASON_PHRASE, DEFAULT_STATUS_CODE};
    use crate::headers::HeaderSet;
    use crate::initialization::init_renderer;
    use crate::models::{CaptureDescriptor, CapturedResource, ReplayResponse, RequestContext};
    use crate::render::{HttpResponseWriter, ResponseSink};

    /// Sidecar metadata for a stored capture.
    ///
    /// Optional JSON next to the capture body recording the original status
    /// and headers, e.g. `{"status": 301, "headers": [["Location", "/new"]]}`.
    /// Missing fields fall back to the defaults of a plain 200 HTML response.
    #[derive(Debug, Deserialize)]
    struct CaptureMeta {
        #[serde(default = "default_status")]
        status: u16,
        reason: Option<String>,
        #[serde(default)]
        headers: Vec<(String, String)>,
    }

    fn default_status() -> u16 {
        DEFAULT_STATUS_CODE
    }

    impl CaptureMeta {
        fn load(path: &Path) -> Result<Self> {
            let raw = std::fs::read_to_string(path).with_context(|| {
                format!("Failed to read capture metadata {}", path.display())
            })?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse capture metadata {}", path.display()))
        }

        fn into_resource(self, body: Vec<u8>) -> CapturedResource {
            let reason = self
                .reason
                .unwrap_or_else(|| DEFAULT_REASON_PHRASE.to_string());
            CapturedResource::new(self.status, reason, HeaderSet::from_pairs(self.headers), body)
        }
    }

    /// Results of a completed render.
    ///
    /// Contains summary statistics about the emitted response.
    #[derive(Debug, Clone)]
    pub struct RenderReport {
        /// Size of the emitted body in bytes
        pub bytes_emitted: usize,
        /// Status code of the emitted response
        pub status_code: u16,
        /// Charset label detected for the source capture
        pub detected_charset: String,
        /// Whether the charset label was the no-signal fallback
        pub charset_was_fallback: bool,
        /// Number of references passed through because they could not be resolved
        pub unresolvable_references: usize,
        /// Where the response was written; `None` means stdout
        pub output: Option<PathBuf>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Renders one capture with the provided configuration.
    ///
    /// This is the main entry point for the CLI. It reads the capture body
    /// (and the optional metadata sidecar), renders it, and writes the
    /// finalized HTTP response to the configured output or stdout.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the render (input path, page URL,
    ///   capture timestamp, replay prefix, output)
    ///
    /// # Returns
    ///
    /// Returns a `RenderReport` containing summary statistics, or an error if
    /// the render failed to complete.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file or metadata sidecar cannot be read
    /// - The capture descriptor is unusable (bad page URL or timestamp)
    /// - The captured markup is truncated
    /// - The output cannot be written
    pub fn render_capture(config: Config) -> Result<RenderReport> {
        let start_time = std::time::Instant::now();

        let body = std::fs::read(&config.input)
            .with_context(|| format!("Failed to read capture body {}", config.input.display()))?;
        info!(
            "Loaded {} byte capture from {}",
            body.len(),
            config.input.display()
        );

        let resource = match &config.capture_meta {
            Some(path) => CaptureMeta::load(path)?.into_resource(body),
            None => CapturedResource::new(
                DEFAULT_STATUS_CODE,
                DEFAULT_REASON_PHRASE,
                HeaderSet::new(),
                body,
            ),
        };
        let descriptor = CaptureDescriptor::new(&config.url, &config.timestamp);
        let request = RequestContext::default();

        let renderer = init_renderer(&config.replay_prefix);
        let response = renderer
            .render(&resource, &descriptor, &request)
            .context("Failed to render capture")?;

        match &config.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file {}", path.display()))?;
                let mut sink = HttpResponseWriter::new(BufWriter::new(file));
                send(&mut sink, &response)?;
            }
            None => {
                let stdout = io::stdout();
                let mut sink = HttpResponseWriter::new(stdout.lock());
                send(&mut sink, &response)?;
            }
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_render_statistics(renderer.stats());
        print_render_summary(&response, elapsed_seconds);

        Ok(RenderReport {
            bytes_emitted: response.body.len(),
            status_code: response.status_code,
            charset_was_fallback: response.charset_was_fallback,
            detected_charset: response.detected_charset,
            unresolvable_references: response.unresolvable_references,
            output: config.output.clone(),
            elapsed_seconds,
        })
    }

    fn send<S: ResponseSink>(sink: &mut S, response: &ReplayResponse) -> Result<()> {
        sink.send_headers(response.status_code, &response.reason, &response.headers)
            .context("Failed to emit response headers")?;
        sink.send_body(&response.body)
            .context("Failed to emit response body")?;
        Ok(())
    }
}
