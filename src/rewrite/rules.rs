//! Which attributes carry URLs, and the rewriters for composite values.
//!
//! Plain URL attributes are listed in a static table. Composite values
//! (`srcset` lists, CSS text, meta refresh content) get their own scanners
//! that rewrite the embedded references and leave the rest of the value
//! intact.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::context::RewriteContext;

/// URL-carrying attributes by attribute name: which tags the attribute is
/// rewritten on.
const URL_ATTRIBUTE_RULES: &[(&str, &[&str])] = &[
    ("href", &["a", "area", "link", "base"]),
    (
        "src",
        &[
            "img", "script", "iframe", "frame", "embed", "input", "audio", "video", "source",
        ],
    ),
    ("action", &["form"]),
    ("data", &["object"]),
    ("background", &["body", "table", "td", "th"]),
    ("poster", &["video"]),
];

/// Tags whose `srcset` attribute is rewritten.
const SRCSET_TAGS: &[&str] = &["img", "source"];

/// `url(...)` in CSS text, with optional single or double quotes.
static CSS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(?:"([^"]*)"|'([^']*)'|([^"'\s)][^\s)]*))\s*\)"#)
        .expect("css url pattern is valid")
});

/// The string form of `@import`; the `url(...)` form is caught by
/// [`CSS_URL_RE`].
static CSS_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)@import\s+(?:"([^"]+)"|'([^']+)')"#).expect("css import pattern is valid"));

/// Returns whether `attribute` on `tag` holds a single rewritable URL.
pub(crate) fn is_url_attribute(tag: &str, attribute: &str) -> bool {
    URL_ATTRIBUTE_RULES
        .iter()
        .find(|(name, _)| attribute.eq_ignore_ascii_case(name))
        .is_some_and(|(_, tags)| tags.iter().any(|t| tag.eq_ignore_ascii_case(t)))
}

/// Returns whether `attribute` on `tag` is a `srcset` candidate list.
pub(crate) fn is_srcset_attribute(tag: &str, attribute: &str) -> bool {
    attribute.eq_ignore_ascii_case("srcset")
        && SRCSET_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

/// Rewrites the URLs of a `srcset` candidate list.
///
/// Each candidate is a URL optionally followed by a width or density
/// descriptor. Returns `None` when no candidate changed; candidates whose
/// URL does not resolve keep their original text.
pub(crate) fn rewrite_srcset(value: &str, ctx: &mut RewriteContext<'_>) -> Option<String> {
    let mut changed = false;
    let candidates: Vec<String> = split_srcset(value)
        .into_iter()
        .map(|(url, descriptor)| {
            let url = match ctx.resolve(url) {
                Some(replay) => {
                    changed = true;
                    replay
                }
                None => url.to_string(),
            };
            if descriptor.is_empty() {
                url
            } else {
                format!("{url} {descriptor}")
            }
        })
        .collect();
    changed.then(|| candidates.join(", "))
}

/// Splits a `srcset` value into `(url, descriptor)` candidates.
///
/// Candidates cannot be split on bare commas because a data URI holds commas
/// of its own. A URL is a run of non-whitespace; only a comma at the end of
/// that run (or after the descriptor) separates candidates.
fn split_srcset(value: &str) -> Vec<(&str, &str)> {
    let mut candidates = Vec::new();
    let mut rest = value;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == ',');
        if rest.is_empty() {
            break;
        }
        let url_end = rest
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let url = &rest[..url_end];
        rest = &rest[url_end..];
        if url.ends_with(',') {
            candidates.push((url.trim_end_matches(','), ""));
            continue;
        }
        let descriptor_end = rest.find(',').unwrap_or(rest.len());
        candidates.push((url, rest[..descriptor_end].trim()));
        rest = &rest[descriptor_end..];
    }
    candidates
}

/// Rewrites `url(...)` references and string-form `@import`s in CSS text.
///
/// Used for both `style` attributes and the content of `style` elements.
/// Returns `None` when nothing changed.
pub(crate) fn rewrite_css(css: &str, ctx: &mut RewriteContext<'_>) -> Option<String> {
    let mut changed = false;

    let after_urls = CSS_URL_RE.replace_all(css, |caps: &Captures<'_>| {
        let (reference, quote) = css_url_parts(caps);
        match ctx.resolve(reference) {
            Some(replay) => {
                changed = true;
                format!("url({quote}{replay}{quote})")
            }
            None => caps[0].to_string(),
        }
    });

    let after_imports = CSS_IMPORT_RE.replace_all(after_urls.as_ref(), |caps: &Captures<'_>| {
        let (reference, quote) = if let Some(m) = caps.get(1) {
            (m.as_str(), "\"")
        } else {
            (&caps[2], "'")
        };
        match ctx.resolve(reference) {
            Some(replay) => {
                changed = true;
                format!("@import {quote}{replay}{quote}")
            }
            None => caps[0].to_string(),
        }
    });

    changed.then(|| after_imports.into_owned())
}

fn css_url_parts<'c>(caps: &'c Captures<'_>) -> (&'c str, &'static str) {
    if let Some(m) = caps.get(1) {
        (m.as_str(), "\"")
    } else if let Some(m) = caps.get(2) {
        (m.as_str(), "'")
    } else {
        (&caps[3], "")
    }
}

/// Rewrites the URL of a `<meta http-equiv="refresh">` content value.
///
/// The value has the shape `seconds; url=TARGET`, with optional quotes
/// around the target. Returns `None` when there is no url part or the
/// target does not resolve.
pub(crate) fn rewrite_meta_refresh(content: &str, ctx: &mut RewriteContext<'_>) -> Option<String> {
    let (delay, rest) = content.split_once(';')?;
    let rest = rest.trim_start();
    if !rest.get(..3)?.eq_ignore_ascii_case("url") {
        return None;
    }
    let target = rest[3..].trim_start().strip_prefix('=')?.trim();
    let (quote, target) = match target.chars().next() {
        Some('"') if target.len() >= 2 && target.ends_with('"') => {
            ("\"", &target[1..target.len() - 1])
        }
        Some('\'') if target.len() >= 2 && target.ends_with('\'') => {
            ("'", &target[1..target.len() - 1])
        }
        _ => ("", target),
    };
    let replay = ctx.resolve(target)?;
    Some(format!("{}; url={}{}{}", delay.trim(), quote, replay, quote))
}
