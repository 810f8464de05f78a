//! Response emission targets.

use std::io::{self, Write};

use crate::headers::HeaderSet;

/// Where a finalized response goes.
///
/// The renderer calls `send_headers` exactly once, after the whole body is
/// known, and `send_body` exactly once after that. A render that fails never
/// calls either, so a sink is never left with headers sent and no body.
pub trait ResponseSink {
    /// Emits the status line and the reconciled headers.
    fn send_headers(
        &mut self,
        status_code: u16,
        reason: &str,
        headers: &HeaderSet,
    ) -> io::Result<()>;

    /// Emits the body bytes.
    fn send_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// Writes the response as an HTTP/1.1 message to any [`Write`] target.
#[derive(Debug)]
pub struct HttpResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> HttpResponseWriter<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwraps the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResponseSink for HttpResponseWriter<W> {
    fn send_headers(
        &mut self,
        status_code: u16,
        reason: &str,
        headers: &HeaderSet,
    ) -> io::Result<()> {
        write!(self.writer, "HTTP/1.1 {} {}\r\n", status_code, reason)?;
        for (name, value) in headers.iter() {
            write!(self.writer, "{}: {}\r\n", name, value)?;
        }
        self.writer.write_all(b"\r\n")
    }

    fn send_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.writer.write_all(body)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_wire_format() {
        let mut sink = HttpResponseWriter::new(Vec::new());
        let headers = HeaderSet::from_pairs([("Content-Type", "text/html"), ("Content-Length", "2")]);
        sink.send_headers(200, "OK", &headers).unwrap();
        sink.send_body(b"ok").unwrap();
        let wire = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            wire,
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 2\r\n\r\nok"
        );
    }
}
