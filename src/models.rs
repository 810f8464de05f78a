//! Core data model for captures and rendered responses.

use crate::headers::HeaderSet;

/// A stored capture as handed over by the retrieval collaborator.
///
/// Read-only to the pipeline: the body is the raw archived payload (already
/// transfer-decoded by the crawler), the status and headers are the framing
/// recorded at capture time.
#[derive(Debug, Clone)]
pub struct CapturedResource {
    /// Original response status code.
    pub status_code: u16,
    /// Original response reason phrase.
    pub reason: String,
    /// Original response headers, in recorded order.
    pub headers: HeaderSet,
    /// Raw payload bytes of the archived document.
    pub body: Vec<u8>,
}

impl CapturedResource {
    /// Creates a resource from its recorded parts.
    pub fn new(
        status_code: u16,
        reason: impl Into<String>,
        headers: HeaderSet,
        body: Vec<u8>,
    ) -> Self {
        Self {
            status_code,
            reason: reason.into(),
            headers,
            body,
        }
    }
}

/// Identity of a capture: where the page lived and when it was archived.
#[derive(Debug, Clone)]
pub struct CaptureDescriptor {
    /// Original URL of the captured page.
    pub original_url: String,
    /// Capture timestamp, 14 digits (`YYYYMMDDhhmmss`).
    pub timestamp: String,
}

impl CaptureDescriptor {
    /// Creates a descriptor for a page URL and capture timestamp.
    pub fn new(original_url: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Per-request client context.
///
/// Carries the client's request headers; the charset classifier consults
/// them for an explicit charset override.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Headers the replaying client sent.
    pub headers: HeaderSet,
}

impl RequestContext {
    /// Creates a request context from client headers.
    pub fn new(headers: HeaderSet) -> Self {
        Self { headers }
    }
}

/// Product of the accumulate phase: the fully rewritten body plus the
/// charset diagnostics that feed header reconciliation.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Rewritten document in the canonical output encoding.
    pub body: Vec<u8>,
    /// Charset label the classifier detected for the source document.
    pub detected_charset: String,
    /// Whether the label came from the fallback rung of the classifier.
    pub charset_was_fallback: bool,
    /// Number of references passed through because they could not be resolved.
    pub unresolvable_references: usize,
}

impl RenderResult {
    /// Exact byte length of the rewritten body.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the rewritten body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A fully finalized replay response, ready for emission.
///
/// Nothing in it changes after construction; emitting it twice produces
/// byte-identical output.
#[derive(Debug, Clone)]
pub struct ReplayResponse {
    /// Status code, copied verbatim from the capture.
    pub status_code: u16,
    /// Reason phrase, copied verbatim from the capture.
    pub reason: String,
    /// Reconciled headers, in emission order.
    pub headers: HeaderSet,
    /// Rewritten body in the canonical output encoding.
    pub body: Vec<u8>,
    /// Charset label the classifier detected for the source document.
    pub detected_charset: String,
    /// Whether the label came from the fallback rung of the classifier.
    pub charset_was_fallback: bool,
    /// Number of references passed through because they could not be resolved.
    pub unresolvable_references: usize,
}
