//! The replay renderer.
//!
//! Orchestrates one render: detect the source charset and decode, tokenize
//! and dispatch every token through the rewriter, re-encode, reconcile the
//! headers against the finished body, then emit. The whole body is
//! accumulated before anything is released, which is what makes the exact
//! `Content-Length` and the all-or-nothing failure behavior possible: an
//! error anywhere leaves the sink untouched.

mod sink;

// Re-export public API
pub use sink::{HttpResponseWriter, ResponseSink};

use std::sync::Arc;

use log::debug;

use crate::charset::{
    decode, CharsetDetector, CharsetGuess, CharsetSource, StandardCharsetDetector,
};
use crate::error_handling::{update_error_stats, InfoType, RenderError, RenderStats, WarningType};
use crate::headers::reconcile;
use crate::lexer::ContextAwareLexer;
use crate::models::{
    CaptureDescriptor, CapturedResource, RenderResult, ReplayResponse, RequestContext,
};
use crate::rewrite::{ArchivalUrlConverter, RewriteContext, TokenDispatcher, UrlConverter};

/// Renders stored captures into replayable responses.
///
/// Stateless across renders apart from the shared stats accumulator; one
/// renderer can serve any number of captures, and rendering the same capture
/// twice produces byte-identical responses.
pub struct ReplayRenderer {
    detector: Arc<dyn CharsetDetector>,
    converter: Arc<dyn UrlConverter>,
    stats: Arc<RenderStats>,
}

impl ReplayRenderer {
    /// Creates a renderer around a URL converter, with the standard charset
    /// detector and a fresh stats accumulator.
    pub fn new(converter: Arc<dyn UrlConverter>) -> Self {
        Self {
            detector: Arc::new(StandardCharsetDetector),
            converter,
            stats: Arc::new(RenderStats::new()),
        }
    }

    /// Replaces the charset detector.
    pub fn with_detector(mut self, detector: Arc<dyn CharsetDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// The stats accumulator this renderer reports into.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Renders a capture into a finalized response.
    ///
    /// Pure with respect to the caller: nothing is emitted, the finished
    /// response is returned whole. Fatal conditions (unusable descriptor,
    /// truncated markup) are returned as errors; per-reference resolution
    /// failures degrade to pass-through and are only counted.
    pub fn render(
        &self,
        resource: &CapturedResource,
        descriptor: &CaptureDescriptor,
        request: &RequestContext,
    ) -> Result<ReplayResponse, RenderError> {
        match self.try_render(resource, descriptor, request) {
            Ok(response) => Ok(response),
            Err(error) => {
                update_error_stats(&self.stats, &error);
                Err(error)
            }
        }
    }

    /// Renders a capture and emits it into `sink`.
    ///
    /// The sink sees either the complete response (headers, then body) or
    /// nothing at all: every fallible step runs before the first sink call.
    pub fn render_to(
        &self,
        resource: &CapturedResource,
        descriptor: &CaptureDescriptor,
        request: &RequestContext,
        sink: &mut dyn ResponseSink,
    ) -> Result<(), RenderError> {
        let response = self.render(resource, descriptor, request)?;
        if let Err(error) = emit(&response, sink) {
            update_error_stats(&self.stats, &error);
            return Err(error);
        }
        Ok(())
    }

    fn try_render(
        &self,
        resource: &CapturedResource,
        descriptor: &CaptureDescriptor,
        request: &RequestContext,
    ) -> Result<ReplayResponse, RenderError> {
        let mut ctx = RewriteContext::new(descriptor, self.converter.as_ref(), &self.stats)?;

        let result = self.accumulate(resource, request, &mut ctx)?;
        let headers = reconcile(
            &resource.headers,
            result.len(),
            &result.detected_charset,
            &mut ctx,
        );

        debug!(
            "rendered {} @ {}: {} bytes, charset {}, {} unresolvable reference(s)",
            descriptor.original_url,
            descriptor.timestamp,
            result.len(),
            result.detected_charset,
            ctx.unresolvable_references()
        );

        Ok(ReplayResponse {
            status_code: resource.status_code,
            reason: resource.reason.clone(),
            headers,
            body: result.body,
            detected_charset: result.detected_charset,
            charset_was_fallback: result.charset_was_fallback,
            // Header reconciliation can add to the count, so read it last
            unresolvable_references: ctx.unresolvable_references(),
        })
    }

    /// The accumulate phase: decode, tokenize, rewrite, re-encode.
    fn accumulate(
        &self,
        resource: &CapturedResource,
        request: &RequestContext,
        ctx: &mut RewriteContext<'_>,
    ) -> Result<RenderResult, RenderError> {
        let guess = self.detector.detect(resource, request);
        self.note_charset(guess);
        let text = decode(&resource.body, guess);

        let mut dispatcher = TokenDispatcher::new();
        for token in ContextAwareLexer::new(&text) {
            dispatcher.dispatch(token?, ctx);
        }

        Ok(RenderResult {
            body: ctx.take_output().into_bytes(),
            detected_charset: guess.label().to_string(),
            charset_was_fallback: guess.is_fallback(),
            unresolvable_references: ctx.unresolvable_references(),
        })
    }

    fn note_charset(&self, guess: CharsetGuess) {
        match guess.source {
            CharsetSource::OverrideHeader => self.stats.increment_info(InfoType::CharsetFromOverride),
            CharsetSource::ByteOrderMark => self.stats.increment_info(InfoType::CharsetFromBom),
            CharsetSource::ContentTypeHeader => {
                self.stats.increment_info(InfoType::CharsetFromHeader)
            }
            CharsetSource::MetaTag => self.stats.increment_info(InfoType::CharsetFromMeta),
            CharsetSource::Default => {
                debug!("no charset signal found, assuming {}", guess.label());
                self.stats.increment_warning(WarningType::CharsetFallback);
            }
        }
    }
}

impl Default for ReplayRenderer {
    fn default() -> Self {
        Self::new(Arc::new(ArchivalUrlConverter::default()))
    }
}

fn emit(response: &ReplayResponse, sink: &mut dyn ResponseSink) -> Result<(), RenderError> {
    sink.send_headers(response.status_code, &response.reason, &response.headers)?;
    sink.send_body(&response.body)?;
    Ok(())
}
