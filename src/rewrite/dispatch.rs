//! Token dispatch: routing each token through the right rewriter.

use crate::lexer::{serialize_open_tag, Attribute, Token};

use super::context::RewriteContext;
use super::rules::{
    is_srcset_attribute, is_url_attribute, rewrite_css, rewrite_meta_refresh, rewrite_srcset,
};

/// Consumes tokens in document order and writes their (possibly rewritten)
/// text into the context's output accumulator.
///
/// Tags with no changed attribute are emitted from their raw source slice,
/// so a reference-free document survives byte-for-byte. A changed tag is
/// re-serialized with its attributes in source order and their original
/// quoting. Only the first occurrence of a rewritable attribute name on a
/// tag is rewritten; duplicates keep their text.
#[derive(Debug, Default)]
pub struct TokenDispatcher {
    in_style_element: bool,
}

impl TokenDispatcher {
    /// Creates a dispatcher for one render pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one token.
    pub fn dispatch(&mut self, token: Token, ctx: &mut RewriteContext<'_>) {
        match token {
            Token::Text(text) => {
                if self.in_style_element {
                    match rewrite_css(&text, ctx) {
                        Some(rewritten) => ctx.write_str(&rewritten),
                        None => ctx.write_str(&text),
                    }
                } else {
                    ctx.write_str(&text);
                }
            }
            Token::Comment(interior) => {
                ctx.write_str("<!--");
                ctx.write_str(&interior);
                ctx.write_str("-->");
            }
            Token::CloseTag { name, raw } => {
                if name.eq_ignore_ascii_case("style") {
                    self.in_style_element = false;
                }
                ctx.write_str(&raw);
            }
            Token::OpenTag {
                name,
                mut attributes,
                self_closing,
                raw,
            } => {
                if rewrite_attributes(&name, &mut attributes, ctx) {
                    ctx.write_str(&serialize_open_tag(&name, &attributes, self_closing));
                } else {
                    ctx.write_str(&raw);
                }
                if !self_closing && name.eq_ignore_ascii_case("style") {
                    self.in_style_element = true;
                }
            }
        }
    }
}

/// Rewrites the URL-bearing attributes of one open tag in place. Returns
/// whether any attribute value changed.
fn rewrite_attributes(
    tag: &str,
    attributes: &mut [Attribute],
    ctx: &mut RewriteContext<'_>,
) -> bool {
    let is_base_tag = tag.eq_ignore_ascii_case("base");
    let is_refresh_meta = tag.eq_ignore_ascii_case("meta")
        && attributes.iter().any(|attr| {
            attr.name.eq_ignore_ascii_case("http-equiv")
                && attr
                    .value
                    .as_deref()
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"))
        });

    let mut changed = false;
    let mut handled: Vec<String> = Vec::new();
    for attr in attributes.iter_mut() {
        let Some(value) = attr.value.clone() else {
            continue;
        };

        let lower_name = attr.name.to_ascii_lowercase();
        let kind = if is_base_tag && lower_name == "href" {
            Rewriter::Base
        } else if is_url_attribute(tag, &lower_name) {
            Rewriter::Url
        } else if is_srcset_attribute(tag, &lower_name) {
            Rewriter::SrcSet
        } else if lower_name == "style" {
            Rewriter::Css
        } else if is_refresh_meta && lower_name == "content" {
            Rewriter::Refresh
        } else {
            continue;
        };
        if handled.contains(&lower_name) {
            continue;
        }
        handled.push(lower_name);

        let replacement = match kind {
            Rewriter::Base => ctx.set_base(&value),
            Rewriter::Url => ctx.resolve(&value),
            Rewriter::SrcSet => rewrite_srcset(&value, ctx),
            Rewriter::Css => rewrite_css(&value, ctx),
            Rewriter::Refresh => rewrite_meta_refresh(&value, ctx),
        };
        if let Some(replacement) = replacement {
            attr.value = Some(replacement);
            changed = true;
        }
    }
    changed
}

/// Which rewriter an attribute's value goes through.
enum Rewriter {
    /// `<base href>`: moves the resolution base and rewrites the href.
    Base,
    /// A plain single-URL attribute.
    Url,
    /// A `srcset` candidate list.
    SrcSet,
    /// Inline CSS in a `style` attribute.
    Css,
    /// The content value of a refresh meta.
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::RenderStats;
    use crate::lexer::ContextAwareLexer;
    use crate::models::CaptureDescriptor;
    use crate::rewrite::ArchivalUrlConverter;

    fn rewrite_document(input: &str) -> String {
        let converter = ArchivalUrlConverter::default();
        let stats = RenderStats::new();
        let descriptor = CaptureDescriptor::new("http://example.com/a/b.html", "20200101000000");
        let mut ctx = RewriteContext::new(&descriptor, &converter, &stats).unwrap();
        let mut dispatcher = TokenDispatcher::new();
        for token in ContextAwareLexer::new(input) {
            dispatcher.dispatch(token.unwrap(), &mut ctx);
        }
        ctx.take_output()
    }

    #[test]
    fn test_anchor_href_is_rewritten() {
        assert_eq!(
            rewrite_document(r#"<a href="/img/x.png">x</a>"#),
            r#"<a href="/web/20200101000000/http://example.com/img/x.png">x</a>"#
        );
    }

    #[test]
    fn test_reference_free_markup_is_untouched() {
        let input = "<html>\n<body CLASS='x'><p>hello   world</p><!-- c --></body>\n</html>";
        assert_eq!(rewrite_document(input), input);
    }

    #[test]
    fn test_unrelated_attributes_keep_their_quoting() {
        assert_eq!(
            rewrite_document("<img alt=photo id='i' src=/x.png>"),
            "<img alt=photo id='i' src=/web/20200101000000/http://example.com/x.png>"
        );
    }

    #[test]
    fn test_script_body_is_never_rewritten() {
        let input = r#"<script>location.href = "/img/x.png"; if (1 < 2) { go("<div>"); }</script>"#;
        assert_eq!(rewrite_document(input), input);
    }

    #[test]
    fn test_script_src_is_rewritten() {
        assert_eq!(
            rewrite_document(r#"<script src="app.js"></script>"#),
            r#"<script src="/web/20200101000000/http://example.com/a/app.js"></script>"#
        );
    }

    #[test]
    fn test_style_element_content_is_css_rewritten() {
        assert_eq!(
            rewrite_document("<style>body{background:url(/bg.png)}</style>"),
            "<style>body{background:url(/web/20200101000000/http://example.com/bg.png)}</style>"
        );
    }

    #[test]
    fn test_style_attribute_is_css_rewritten() {
        assert_eq!(
            rewrite_document(r#"<div style="background: url('t.png')">x</div>"#),
            r#"<div style="background: url('/web/20200101000000/http://example.com/a/t.png')">x</div>"#
        );
    }

    #[test]
    fn test_base_href_moves_resolution_base() {
        let output = rewrite_document(
            r#"<base href="http://cdn.example.net/s/"><img src="logo.gif">"#,
        );
        assert_eq!(
            output,
            "<base href=\"/web/20200101000000/http://cdn.example.net/s/\">\
             <img src=\"/web/20200101000000/http://cdn.example.net/s/logo.gif\">"
        );
    }

    #[test]
    fn test_meta_refresh_content() {
        assert_eq!(
            rewrite_document(r#"<meta http-equiv="refresh" content="5; url=/next.html">"#),
            r#"<meta http-equiv="refresh" content="5; url=/web/20200101000000/http://example.com/next.html">"#
        );
    }

    #[test]
    fn test_plain_meta_content_is_untouched() {
        let input = r#"<meta name="description" content="see /img/x.png">"#;
        assert_eq!(rewrite_document(input), input);
    }

    #[test]
    fn test_fragment_and_javascript_hrefs_are_kept() {
        let input = r##"<a href="#top">up</a><a href="javascript:void(0)">noop</a>"##;
        assert_eq!(rewrite_document(input), input);
    }

    #[test]
    fn test_only_first_duplicate_attribute_is_rewritten() {
        assert_eq!(
            rewrite_document(r#"<a href="/one" href="/two">x</a>"#),
            r#"<a href="/web/20200101000000/http://example.com/one" href="/two">x</a>"#
        );
    }

    #[test]
    fn test_srcset_attribute_on_img() {
        assert_eq!(
            rewrite_document(r#"<img srcset="a.png 1x, b.png 2x">"#),
            "<img srcset=\"/web/20200101000000/http://example.com/a/a.png 1x, \
             /web/20200101000000/http://example.com/a/b.png 2x\">"
        );
    }

    #[test]
    fn test_unquoted_rewritten_value_stays_unquoted() {
        // Replay URLs contain no whitespace, so no promotion is needed
        assert_eq!(
            rewrite_document("<img src=x.png>"),
            "<img src=/web/20200101000000/http://example.com/a/x.png>"
        );
    }

    #[test]
    fn test_form_action_and_object_data() {
        assert_eq!(
            rewrite_document(r#"<form action="/search"></form><object data="movie.swf"></object>"#),
            "<form action=\"/web/20200101000000/http://example.com/search\"></form>\
             <object data=\"/web/20200101000000/http://example.com/a/movie.swf\"></object>"
        );
    }
}
