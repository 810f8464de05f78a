//! Charset detection and transcoding tests across the full render path.

use capture_replay::{
    CaptureDescriptor, CapturedResource, HeaderSet, ReplayRenderer, RequestContext,
};

fn descriptor() -> CaptureDescriptor {
    CaptureDescriptor::new("http://example.com/", "20200101000000")
}

fn render(resource: CapturedResource, request: RequestContext) -> capture_replay::ReplayResponse {
    ReplayRenderer::default()
        .render(&resource, &descriptor(), &request)
        .unwrap()
}

#[test]
fn test_windows_1252_body_is_transcoded_to_utf8() {
    // 0xE9 is é in windows-1252
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([("Content-Type", "text/html; charset=windows-1252")]),
        b"<p>caf\xe9</p>".to_vec(),
    );
    let response = render(resource, RequestContext::default());

    assert_eq!(response.detected_charset, "windows-1252");
    assert!(!response.charset_was_fallback);
    assert_eq!(response.body, "<p>café</p>".as_bytes());
    assert_eq!(
        response.headers.get("X-Replay-Guessed-Charset"),
        Some("windows-1252")
    );
    assert_eq!(
        response.headers.get("Content-Type"),
        Some("text/html; charset=utf-8")
    );
}

#[test]
fn test_utf16_bom_overrides_content_type_header() {
    // UTF-16LE BOM followed by "<p>hi</p>" in UTF-16LE
    let mut body = vec![0xFF, 0xFE];
    for unit in "<p>hi</p>".encode_utf16() {
        body.extend_from_slice(&unit.to_le_bytes());
    }
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([("Content-Type", "text/html; charset=windows-1252")]),
        body,
    );
    let response = render(resource, RequestContext::default());

    assert_eq!(response.detected_charset, "UTF-16LE");
    // Transcoded to UTF-8 with the BOM consumed
    assert_eq!(response.body, b"<p>hi</p>");
}

#[test]
fn test_meta_declaration_is_used_when_header_has_no_charset() {
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([("Content-Type", "text/html")]),
        b"<meta charset=\"windows-1252\"><p>na\xefve</p>".to_vec(),
    );
    let response = render(resource, RequestContext::default());

    assert_eq!(response.detected_charset, "windows-1252");
    assert_eq!(
        String::from_utf8(response.body).unwrap(),
        "<meta charset=\"windows-1252\"><p>naïve</p>"
    );
}

#[test]
fn test_client_override_header_wins_over_everything() {
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([("Content-Type", "text/html; charset=utf-8")]),
        b"<p>\xe9</p>".to_vec(),
    );
    let request = RequestContext::new(HeaderSet::from_pairs([(
        "X-Replay-Charset",
        "windows-1252",
    )]));
    let response = render(resource, request);

    assert_eq!(response.detected_charset, "windows-1252");
    assert_eq!(response.body, "<p>é</p>".as_bytes());
}

#[test]
fn test_no_signal_falls_back_to_utf8_and_says_so() {
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::new(),
        b"<p>plain ascii</p>".to_vec(),
    );
    let response = render(resource, RequestContext::default());

    assert_eq!(response.detected_charset, "UTF-8");
    assert!(response.charset_was_fallback);
    assert_eq!(
        response.headers.get("X-Replay-Guessed-Charset"),
        Some("UTF-8")
    );
}

#[test]
fn test_unknown_charset_label_falls_through() {
    // The bogus header label is skipped; detection continues to the meta tag
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([("Content-Type", "text/html; charset=martian-9")]),
        b"<meta charset=\"windows-1252\"><p>\xe9</p>".to_vec(),
    );
    let response = render(resource, RequestContext::default());

    assert_eq!(response.detected_charset, "windows-1252");
}

#[test]
fn test_meta_declaration_outside_sniff_window_is_ignored() {
    let mut body = Vec::new();
    body.extend_from_slice(b"<p>");
    body.extend_from_slice(&vec![b'x'; 1100]);
    body.extend_from_slice(b"</p><meta charset=\"windows-1252\">");
    let resource = CapturedResource::new(200, "OK", HeaderSet::new(), body);
    let response = render(resource, RequestContext::default());

    assert_eq!(response.detected_charset, "UTF-8");
}

#[test]
fn test_undecodable_bytes_do_not_abort_the_render() {
    // 0xFF 0xFE mid-document is not valid UTF-8; lossy decoding replaces it
    let resource = CapturedResource::new(
        200,
        "OK",
        HeaderSet::from_pairs([("Content-Type", "text/html; charset=utf-8")]),
        b"<p>a\xff\xfeb</p>".to_vec(),
    );
    let response = render(resource, RequestContext::default());

    let body = String::from_utf8(response.body).unwrap();
    assert!(body.starts_with("<p>a"));
    assert!(body.ends_with("b</p>"));
    assert!(body.contains('\u{FFFD}'));
}
