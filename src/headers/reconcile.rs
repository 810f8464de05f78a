//! Header reconciliation.
//!
//! Corrects a capture's original HTTP framing to match the rewritten body:
//! stale framing headers are dropped, the content length is recomputed, the
//! declared charset becomes the canonical output charset, and URL-bearing
//! headers are routed through the same resolver as in-document references.

use log::debug;

use crate::config::{
    DEFAULT_MEDIA_TYPE, HEADER_CONTENT_LENGTH, HEADER_CONTENT_TYPE, HEADER_GUESSED_CHARSET,
    OUTPUT_CHARSET, STRIPPED_FRAMING_HEADERS, URL_HEADERS,
};
use crate::error_handling::InfoType;
use crate::rewrite::RewriteContext;

use super::set::HeaderSet;

/// Builds the final header set for a rendered response.
///
/// Original headers copy through in order and with original casing, except:
///
/// - framing headers (`Content-Length`, `Transfer-Encoding`,
///   `Content-Encoding`) are dropped; the body has been fully decoded and
///   re-encoded so none of them still applies;
/// - URL-bearing headers (`Location` and friends) have their value rewritten
///   through the resolver, keeping their position;
/// - `Content-Type` keeps its media type but declares the canonical output
///   charset.
///
/// The corrected `Content-Length` and the detected-charset diagnostic header
/// are appended at the end. `body_len` must be the exact byte count of the
/// body that will be emitted.
pub fn reconcile(
    original: &HeaderSet,
    body_len: usize,
    detected_charset: &str,
    ctx: &mut RewriteContext<'_>,
) -> HeaderSet {
    let mut headers = HeaderSet::new();

    for (name, value) in original.iter() {
        if is_listed(name, STRIPPED_FRAMING_HEADERS) {
            debug!("dropping stale framing header {}: {}", name, value);
            continue;
        }

        if is_listed(name, URL_HEADERS) {
            match ctx.resolve(value) {
                Some(replay) => {
                    debug!("rewrote {} header to {}", name, replay);
                    ctx.stats().increment_info(InfoType::LocationRewritten);
                    headers.insert(name, replay);
                }
                None => headers.insert(name, value),
            }
            continue;
        }

        if name.eq_ignore_ascii_case(HEADER_CONTENT_TYPE) {
            headers.insert(name, declare_output_charset(value));
            continue;
        }

        headers.insert(name, value);
    }

    if !headers.contains(HEADER_CONTENT_TYPE) {
        headers.insert(
            HEADER_CONTENT_TYPE,
            format!("{}; charset={}", DEFAULT_MEDIA_TYPE, OUTPUT_CHARSET),
        );
    }

    headers.insert(HEADER_CONTENT_LENGTH, body_len.to_string());
    headers.insert(HEADER_GUESSED_CHARSET, detected_charset);

    headers
}

fn is_listed(name: &str, list: &[&str]) -> bool {
    list.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Replaces (or adds) the `charset` parameter of a Content-Type value with
/// the canonical output charset, keeping the media type and any other
/// parameters.
fn declare_output_charset(content_type: &str) -> String {
    let mut parts: Vec<String> = content_type
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.to_ascii_lowercase().starts_with("charset"))
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        parts.push(DEFAULT_MEDIA_TYPE.to_string());
    }
    parts.push(format!("charset={}", OUTPUT_CHARSET));
    parts.join("; ")
}
