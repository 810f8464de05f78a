//! End-to-end tests for the render pipeline: decode, rewrite, re-encode,
//! reconcile, emit.

use std::io;

use capture_replay::{
    CaptureDescriptor, CapturedResource, HeaderSet, HttpResponseWriter, RenderError,
    ReplayRenderer, RequestContext, ResponseSink,
};

fn html_resource(body: &str) -> CapturedResource {
    CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([("Content-Type", "text/html; charset=utf-8")]),
        body.as_bytes().to_vec(),
    )
}

fn descriptor() -> CaptureDescriptor {
    CaptureDescriptor::new("http://example.com/a/b.html", "20200101000000")
}

/// Sink that records which calls were made, for checking the all-or-nothing
/// emission contract.
#[derive(Default)]
struct RecordingSink {
    headers_sent: bool,
    body: Vec<u8>,
}

impl ResponseSink for RecordingSink {
    fn send_headers(&mut self, _: u16, _: &str, _: &HeaderSet) -> io::Result<()> {
        self.headers_sent = true;
        Ok(())
    }

    fn send_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(body);
        Ok(())
    }
}

#[test]
fn test_reference_free_document_is_byte_identical() {
    let input = "<!DOCTYPE html>\n<html>\n<head><title>a < b</title></head>\n\
                 <body class='x'>\n<p>Hello &amp; goodbye</p>\n<!-- note -->\n</body>\n</html>\n";
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(&html_resource(input), &descriptor(), &RequestContext::default())
        .unwrap();
    assert_eq!(response.body, input.as_bytes());
}

#[test]
fn test_relative_image_reference_becomes_replay_url() {
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(
            &html_resource(r#"<img src="/img/x.png">"#),
            &descriptor(),
            &RequestContext::default(),
        )
        .unwrap();
    assert_eq!(
        String::from_utf8(response.body).unwrap(),
        r#"<img src="/web/20200101000000/http://example.com/img/x.png">"#
    );
}

#[test]
fn test_content_length_matches_body_exactly() {
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(
            &html_resource(r#"<a href="page.html">go</a><p>filler</p>"#),
            &descriptor(),
            &RequestContext::default(),
        )
        .unwrap();
    let declared: usize = response
        .headers
        .get("Content-Length")
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(declared, response.body.len());
}

#[test]
fn test_script_content_with_markup_is_untouched() {
    let input = r#"<script>document.write("<div>hi</div>"); var x = 1 < 2;</script>"#;
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(&html_resource(input), &descriptor(), &RequestContext::default())
        .unwrap();
    assert_eq!(response.body, input.as_bytes());
}

#[test]
fn test_empty_page_url_aborts_before_any_output() {
    let renderer = ReplayRenderer::default();
    let mut sink = RecordingSink::default();
    let result = renderer.render_to(
        &html_resource("<p>x</p>"),
        &CaptureDescriptor::new("", "20200101000000"),
        &RequestContext::default(),
        &mut sink,
    );
    assert!(matches!(result, Err(RenderError::MalformedPageUrl { .. })));
    assert!(!sink.headers_sent);
    assert!(sink.body.is_empty());
}

#[test]
fn test_invalid_timestamp_aborts_before_any_output() {
    let renderer = ReplayRenderer::default();
    let mut sink = RecordingSink::default();
    let result = renderer.render_to(
        &html_resource("<p>x</p>"),
        &CaptureDescriptor::new("http://example.com/", "not-a-timestamp"),
        &RequestContext::default(),
        &mut sink,
    );
    assert!(matches!(result, Err(RenderError::InvalidTimestamp { .. })));
    assert!(!sink.headers_sent);
}

#[test]
fn test_truncated_markup_aborts_before_any_output() {
    let renderer = ReplayRenderer::default();
    let mut sink = RecordingSink::default();
    let result = renderer.render_to(
        &html_resource("<p>ok</p><a href='dangling"),
        &descriptor(),
        &RequestContext::default(),
        &mut sink,
    );
    assert!(matches!(result, Err(RenderError::Tokenize(_))));
    assert!(!sink.headers_sent);
    assert!(sink.body.is_empty());
}

#[test]
fn test_double_render_is_byte_identical() {
    let input = r#"<base href="/deep/"><a href="x.html">x</a><img srcset="a.png 1x, b.png 2x">"#;
    let renderer = ReplayRenderer::default();
    let resource = html_resource(input);
    let request = RequestContext::default();

    let mut first = Vec::new();
    let mut second = Vec::new();
    renderer
        .render_to(
            &resource,
            &descriptor(),
            &request,
            &mut HttpResponseWriter::new(&mut first),
        )
        .unwrap();
    renderer
        .render_to(
            &resource,
            &descriptor(),
            &request,
            &mut HttpResponseWriter::new(&mut second),
        )
        .unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_framing_headers_are_stripped_and_recomputed() {
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([
            ("Content-Type", "text/html; charset=iso-8859-1"),
            ("Content-Length", "999999"),
            ("Transfer-Encoding", "chunked"),
            ("Content-Encoding", "gzip"),
            ("Server", "Apache/2.4"),
        ]),
        b"<p>tiny</p>".to_vec(),
    );
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(&resource, &descriptor(), &RequestContext::default())
        .unwrap();

    assert!(response.headers.get("Transfer-Encoding").is_none());
    assert!(response.headers.get("Content-Encoding").is_none());
    assert_eq!(
        response.headers.get("Content-Length"),
        Some(response.body.len().to_string().as_str())
    );
    assert_eq!(
        response.headers.get("Content-Type"),
        Some("text/html; charset=utf-8")
    );
    assert_eq!(response.headers.get("Server"), Some("Apache/2.4"));
}

#[test]
fn test_redirect_location_is_rewritten() {
    let resource = CapturedResource::new(
        301,
        "Moved Permanently",
        HeaderSet::from_pairs([
            ("Location", "/moved/here.html"),
            ("Content-Type", "text/html"),
        ]),
        b"<p>moved</p>".to_vec(),
    );
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(&resource, &descriptor(), &RequestContext::default())
        .unwrap();

    assert_eq!(response.status_code, 301);
    assert_eq!(response.reason, "Moved Permanently");
    assert_eq!(
        response.headers.get("Location"),
        Some("/web/20200101000000/http://example.com/moved/here.html")
    );
}

#[test]
fn test_wire_format_of_emitted_response() {
    let renderer = ReplayRenderer::default();
    let mut wire = Vec::new();
    renderer
        .render_to(
            &html_resource("<p>ok</p>"),
            &descriptor(),
            &RequestContext::default(),
            &mut HttpResponseWriter::new(&mut wire),
        )
        .unwrap();

    let text = String::from_utf8(wire).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    let (head, body) = text.split_once("\r\n\r\n").unwrap();
    assert_eq!(body, "<p>ok</p>");
    assert!(head.contains("Content-Length: 9"));
    assert!(head.contains("X-Replay-Guessed-Charset: UTF-8"));
}

#[test]
fn test_unresolvable_reference_passes_through_and_is_counted() {
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(
            &html_resource(r#"<a href="http://">broken</a><a href="/fine">ok</a>"#),
            &descriptor(),
            &RequestContext::default(),
        )
        .unwrap();
    let body = String::from_utf8(response.body).unwrap();
    assert!(body.contains(r#"href="http://""#));
    assert!(body.contains(r#"href="/web/20200101000000/http://example.com/fine""#));
    assert_eq!(response.unresolvable_references, 1);
}

#[test]
fn test_base_element_changes_resolution_for_following_references() {
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(
            &html_resource(
                r#"<img src="before.png"><base href="http://cdn.example.net/s/"><img src="after.png">"#,
            ),
            &descriptor(),
            &RequestContext::default(),
        )
        .unwrap();
    let body = String::from_utf8(response.body).unwrap();
    assert!(body.contains("/web/20200101000000/http://example.com/a/before.png"));
    assert!(body.contains("/web/20200101000000/http://cdn.example.net/s/after.png"));
}

#[test]
fn test_style_element_and_attribute_are_rewritten() {
    let renderer = ReplayRenderer::default();
    let response = renderer
        .render(
            &html_resource(
                "<style>body{background:url(/bg.png)}</style><div style=\"background:url('t.gif')\">x</div>",
            ),
            &descriptor(),
            &RequestContext::default(),
        )
        .unwrap();
    let body = String::from_utf8(response.body).unwrap();
    assert!(body.contains("url(/web/20200101000000/http://example.com/bg.png)"));
    assert!(body.contains("url('/web/20200101000000/http://example.com/a/t.gif')"));
}

#[test]
fn test_status_line_preserves_capture_status() {
    let resource = CapturedResource::new(
        404,
        "Not Found",
        HeaderSet::from_pairs([("Content-Type", "text/html")]),
        b"<h1>gone</h1>".to_vec(),
    );
    let renderer = ReplayRenderer::default();
    let mut wire = Vec::new();
    renderer
        .render_to(
            &resource,
            &descriptor(),
            &RequestContext::default(),
            &mut HttpResponseWriter::new(&mut wire),
        )
        .unwrap();
    assert!(String::from_utf8(wire).unwrap().starts_with("HTTP/1.1 404 Not Found\r\n"));
}
