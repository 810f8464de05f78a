//! Property tests for the tokenizer and the pass-through guarantees of the
//! full pipeline.

use capture_replay::lexer::{ContextAwareLexer, Token};
use capture_replay::{
    CaptureDescriptor, CapturedResource, HeaderSet, ReplayRenderer, RequestContext,
};
use proptest::prelude::*;

fn reassemble(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::OpenTag { raw, .. } | Token::CloseTag { raw, .. } => out.push_str(raw),
            Token::Text(text) => out.push_str(text),
            Token::Comment(interior) => {
                out.push_str("<!--");
                out.push_str(interior);
                out.push_str("-->");
            }
        }
    }
    out
}

/// Markup-shaped fragments that lex successfully by construction.
fn markup_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,&;]{0,12}",
        "<[a-z]{1,8}>",
        "</[a-z]{1,8}>",
        "<[a-z]{1,8} [a-z]{1,5}='[a-z0-9/.]{0,10}'>",
        "<[a-z]{1,8} [a-z]{1,5}=\"[a-z0-9/.]{0,10}\">",
        Just("<!-- c -->".to_string()),
        Just("<script>var x = 1 < 2;</script>".to_string()),
        Just("<style>a{}</style>".to_string()),
    ]
}

/// Fragments that both lex successfully and are guaranteed to contain no
/// rewritable attribute: the tag alphabet cannot spell a raw-text element
/// and the attribute alphabet cannot spell a URL-bearing name.
fn inert_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 .,&;]{0,16}",
        "<[dgkmnpqvw]{1,6}>",
        "</[dgkmnpqvw]{1,6}>",
        "<[dgkmnpqvw]{1,6} [xyz]{1,4}='[a-z0-9/. ]{0,12}'>",
        "<[dgkmnpqvw]{1,6} [xyz]{1,4}=\"/[a-z0-9/.]{0,12}\">",
        "<!--[a-z ]{0,10}-->",
        Just("<script>if (a<b) { f(\"<i>\"); }</script>".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_lexer_never_panics_on_arbitrary_input(input in ".*") {
        let _ = ContextAwareLexer::new(&input).collect::<Result<Vec<_>, _>>();
    }

    #[test]
    fn test_successful_lex_preserves_every_byte(input in ".*") {
        if let Ok(tokens) = ContextAwareLexer::new(&input).collect::<Result<Vec<_>, _>>() {
            prop_assert_eq!(reassemble(&tokens), input);
        }
    }

    #[test]
    fn test_generated_markup_preserves_every_byte(
        fragments in prop::collection::vec(markup_fragment(), 0..24)
    ) {
        let input: String = fragments.concat();
        if let Ok(tokens) = ContextAwareLexer::new(&input).collect::<Result<Vec<_>, _>>() {
            prop_assert_eq!(reassemble(&tokens), input);
        }
    }

    #[test]
    fn test_reference_free_markup_renders_byte_identical(
        fragments in prop::collection::vec(inert_fragment(), 0..16)
    ) {
        let input: String = fragments.concat();
        let resource = CapturedResource::new(
            200,
            "OK",
            HeaderSet::from_pairs([("Content-Type", "text/html; charset=utf-8")]),
            input.clone().into_bytes(),
        );
        let renderer = ReplayRenderer::default();
        let response = renderer
            .render(
                &resource,
                &CaptureDescriptor::new("http://example.com/a/b.html", "20200101000000"),
                &RequestContext::default(),
            )
            .unwrap();
        prop_assert_eq!(response.body, input.into_bytes());
    }
}
