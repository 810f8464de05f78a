//! Per-render rewrite context.
//!
//! One `RewriteContext` lives for the duration of a single render. It owns
//! the resolution base (seeded from the capture's own URL and movable by a
//! `<base href>`), the validated capture timestamp, the output accumulator
//! the dispatcher writes into, and the running count of references that had
//! to be passed through unchanged.

use chrono::NaiveDateTime;
use log::debug;
use url::Url;

use crate::config::{MAX_REFERENCE_LENGTH, SKIP_SCHEMES, TIMESTAMP_FORMAT, TIMESTAMP_LENGTH};
use crate::error_handling::{InfoType, RenderError, RenderStats, WarningType};
use crate::models::CaptureDescriptor;

use super::urls::UrlConverter;

/// Shared state for one render pass.
pub struct RewriteContext<'a> {
    base: Url,
    timestamp: String,
    converter: &'a dyn UrlConverter,
    stats: &'a RenderStats,
    output: String,
    unresolvable: usize,
}

impl<'a> RewriteContext<'a> {
    /// Builds a context from a capture descriptor.
    ///
    /// Fails fast when the descriptor itself is unusable: a page URL that
    /// does not parse or a timestamp that is not a real 14-digit UTC instant.
    /// Both checks run before any output exists, so a failure here leaves
    /// the response untouched.
    pub fn new(
        descriptor: &CaptureDescriptor,
        converter: &'a dyn UrlConverter,
        stats: &'a RenderStats,
    ) -> Result<Self, RenderError> {
        let base =
            Url::parse(&descriptor.original_url).map_err(|source| RenderError::MalformedPageUrl {
                url: descriptor.original_url.clone(),
                source,
            })?;

        if !is_valid_timestamp(&descriptor.timestamp) {
            return Err(RenderError::InvalidTimestamp {
                timestamp: descriptor.timestamp.clone(),
            });
        }

        Ok(Self {
            base,
            timestamp: descriptor.timestamp.clone(),
            converter,
            stats,
            output: String::new(),
            unresolvable: 0,
        })
    }

    /// Resolves one embedded reference to its replay URL.
    ///
    /// Returns `None` when the reference must keep its original text: it is
    /// empty, fragment-only, uses a scheme replay never touches, exceeds the
    /// length limit, or does not resolve against the current base. Only the
    /// last two count as unresolvable; the others are skipped by choice.
    pub fn resolve(&mut self, reference: &str) -> Option<String> {
        let trimmed = reference.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || is_skipped_scheme(trimmed) {
            return None;
        }
        if trimmed.len() > MAX_REFERENCE_LENGTH {
            debug!("keeping oversized reference ({} bytes)", trimmed.len());
            self.note_unresolvable();
            return None;
        }
        match self.base.join(trimmed) {
            Ok(absolute) => Some(self.converter.convert(absolute.as_str(), &self.timestamp)),
            Err(error) => {
                debug!("keeping unresolvable reference {:?}: {}", trimmed, error);
                self.note_unresolvable();
                None
            }
        }
    }

    /// Applies a `<base href>`: moves the resolution base for every
    /// reference after it and returns the replay URL the href attribute
    /// itself should carry. Returns `None` (base unchanged, attribute kept)
    /// when the href does not resolve or is a skipped scheme.
    pub fn set_base(&mut self, href: &str) -> Option<String> {
        let trimmed = href.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || is_skipped_scheme(trimmed) {
            return None;
        }
        match self.base.join(trimmed) {
            Ok(absolute) => {
                debug!("resolution base moved to {}", absolute);
                self.stats.increment_info(InfoType::BaseUrlUpdated);
                let replay = self.converter.convert(absolute.as_str(), &self.timestamp);
                self.base = absolute;
                Some(replay)
            }
            Err(error) => {
                debug!("keeping unresolvable base href {:?}: {}", trimmed, error);
                self.note_unresolvable();
                None
            }
        }
    }

    fn note_unresolvable(&mut self) {
        self.unresolvable += 1;
        self.stats
            .increment_warning(WarningType::UnresolvableReference);
    }

    /// Appends rewritten document text to the output accumulator.
    pub fn write_str(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Takes the accumulated output, leaving the accumulator empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// The current resolution base.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The validated capture timestamp.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The stats accumulator this render reports into.
    pub fn stats(&self) -> &'a RenderStats {
        self.stats
    }

    /// Number of references kept as-is because they did not resolve.
    pub fn unresolvable_references(&self) -> usize {
        self.unresolvable
    }
}

/// A timestamp is valid when it is exactly 14 ASCII digits naming a real
/// calendar instant (no February 30th, no 25th hour).
fn is_valid_timestamp(timestamp: &str) -> bool {
    timestamp.len() == TIMESTAMP_LENGTH
        && timestamp.bytes().all(|b| b.is_ascii_digit())
        && NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok()
}

fn is_skipped_scheme(reference: &str) -> bool {
    SKIP_SCHEMES.iter().any(|scheme| {
        reference
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
