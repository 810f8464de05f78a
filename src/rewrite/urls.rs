//! Conversion of absolute capture URLs into replay URLs.

use crate::config::DEFAULT_REPLAY_PREFIX;

/// Maps an absolute archived URL and its capture timestamp to the URL the
/// rewritten document should reference instead.
///
/// The pipeline resolves every in-document reference to an absolute URL
/// first and hands only absolute URLs to the converter, so implementations
/// never see relative references.
pub trait UrlConverter: Send + Sync {
    /// Returns the replay URL for `absolute_url` as captured at `timestamp`.
    fn convert(&self, absolute_url: &str, timestamp: &str) -> String;
}

/// The standard archival URL shape: `{prefix}{timestamp}/{absolute-url}`.
///
/// With the default prefix, `http://example.com/` captured at
/// `20200101000000` becomes `/web/20200101000000/http://example.com/`.
#[derive(Debug, Clone)]
pub struct ArchivalUrlConverter {
    prefix: String,
}

impl ArchivalUrlConverter {
    /// Creates a converter with the given path prefix. A missing trailing
    /// slash is added so the timestamp always starts its own path segment.
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    /// The configured prefix, always slash-terminated.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for ArchivalUrlConverter {
    fn default() -> Self {
        Self::new(DEFAULT_REPLAY_PREFIX)
    }
}

impl UrlConverter for ArchivalUrlConverter {
    fn convert(&self, absolute_url: &str, timestamp: &str) -> String {
        format!("{}{}/{}", self.prefix, timestamp, absolute_url)
    }
}
