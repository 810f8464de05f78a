//! Context-aware scanner over decoded markup.

use crate::error_handling::LexError;

use super::token::{Attribute, QuoteStyle, Token};

/// Elements whose content is opaque character data until the matching close
/// tag. No tags or comments are recognized inside them.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Returns whether `name` names a raw-text element.
pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|element| name.eq_ignore_ascii_case(element))
}

#[derive(Debug)]
enum LexState {
    /// Normal markup: tags, comments and character data are recognized.
    InMarkup,
    /// Inside a raw-text element; only the appropriate end tag ends it.
    InRawText {
        /// Lowercased name of the open raw-text element.
        element: String,
        /// Byte offset where the raw-text content began.
        content_start: usize,
    },
}

/// Streaming tokenizer for archived markup.
///
/// Yields tokens lazily in document order. The scanner is deliberately
/// lenient about the malformed markup real captures contain; it only fails
/// on constructs truncated by the end of input. After yielding an error the
/// iterator is fused and yields nothing further.
#[derive(Debug)]
pub struct ContextAwareLexer<'a> {
    input: &'a str,
    pos: usize,
    state: LexState,
    done: bool,
}

impl<'a> ContextAwareLexer<'a> {
    /// Creates a lexer over the full decoded document.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            state: LexState::InMarkup,
            done: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn fail(&mut self, error: LexError) -> Option<Result<Token, LexError>> {
        self.done = true;
        Some(Err(error))
    }

    fn next_in_raw_text(&mut self) -> Option<Result<Token, LexError>> {
        let (element, content_start) = match &self.state {
            LexState::InRawText {
                element,
                content_start,
            } => (element.clone(), *content_start),
            LexState::InMarkup => unreachable!("caller checked the state"),
        };

        match find_appropriate_end_tag(self.input, self.pos, &element) {
            Some(end_tag_start) => {
                if end_tag_start > self.pos {
                    let text = self.input[self.pos..end_tag_start].to_string();
                    self.pos = end_tag_start;
                    return Some(Ok(Token::Text(text)));
                }
                // Positioned on `</element`; hand the close tag to the
                // markup scanner and leave raw-text mode.
                self.state = LexState::InMarkup;
                self.next_in_markup()
            }
            None => self.fail(LexError::UnclosedRawText {
                element,
                offset: content_start,
            }),
        }
    }

    fn next_in_markup(&mut self) -> Option<Result<Token, LexError>> {
        let rest = self.rest();
        if !rest.starts_with('<') || !starts_tag_construct(rest) {
            return self.scan_text();
        }

        if rest.starts_with("<!--") {
            return self.scan_comment();
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            return self.scan_declaration();
        }
        if rest.starts_with("</") {
            return self.scan_close_tag();
        }
        self.scan_open_tag()
    }

    /// Consumes character data up to the next `<` that actually begins a tag
    /// construct. A stray `<` (as in `1 < 2`) stays literal text.
    fn scan_text(&mut self) -> Option<Result<Token, LexError>> {
        let rest = self.rest();
        let mut end = rest.len();
        let mut search_from = if rest.starts_with('<') { 1 } else { 0 };
        while let Some(offset) = rest[search_from..].find('<') {
            let candidate = search_from + offset;
            if starts_tag_construct(&rest[candidate..]) {
                end = candidate;
                break;
            }
            search_from = candidate + 1;
        }
        let text = rest[..end].to_string();
        self.pos += end;
        Some(Ok(Token::Text(text)))
    }

    fn scan_comment(&mut self) -> Option<Result<Token, LexError>> {
        let start = self.pos;
        let interior_start = start + "<!--".len();
        match self.input[interior_start..].find("-->") {
            Some(offset) => {
                let interior = self.input[interior_start..interior_start + offset].to_string();
                self.pos = interior_start + offset + "-->".len();
                Some(Ok(Token::Comment(interior)))
            }
            None => self.fail(LexError::UnterminatedComment { offset: start }),
        }
    }

    /// Doctype declarations, CDATA sections and processing instructions pass
    /// through as opaque text.
    fn scan_declaration(&mut self) -> Option<Result<Token, LexError>> {
        let start = self.pos;
        match self.rest().find('>') {
            Some(offset) => {
                let raw = self.input[start..start + offset + 1].to_string();
                self.pos = start + offset + 1;
                Some(Ok(Token::Text(raw)))
            }
            None => self.fail(LexError::UnterminatedDeclaration { offset: start }),
        }
    }

    fn scan_close_tag(&mut self) -> Option<Result<Token, LexError>> {
        let start = self.pos;
        let name_start = start + "</".len();
        let name_len = self.input[name_start..]
            .find(|c: char| !is_tag_name_char(c))
            .unwrap_or(self.input.len() - name_start);
        let name = self.input[name_start..name_start + name_len].to_string();
        // Anything between the name and `>` is discarded, as browsers do.
        match self.input[name_start + name_len..].find('>') {
            Some(offset) => {
                let end = name_start + name_len + offset + 1;
                let raw = self.input[start..end].to_string();
                self.pos = end;
                Some(Ok(Token::CloseTag { name, raw }))
            }
            None => self.fail(LexError::UnterminatedTag { offset: start }),
        }
    }

    fn scan_open_tag(&mut self) -> Option<Result<Token, LexError>> {
        let start = self.pos;
        let mut cursor = start + 1;
        let name_len = self.input[cursor..]
            .find(|c: char| !is_tag_name_char(c))
            .unwrap_or(self.input.len() - cursor);
        let name = self.input[cursor..cursor + name_len].to_string();
        cursor += name_len;

        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            cursor = skip_whitespace(self.input, cursor);
            let Some(c) = self.input[cursor..].chars().next() else {
                return self.fail(LexError::UnterminatedTag { offset: start });
            };
            match c {
                '>' => {
                    cursor += 1;
                    break;
                }
                '/' if self.input[cursor + 1..].starts_with('>') => {
                    self_closing = true;
                    cursor += 2;
                    break;
                }
                '/' => {
                    // Stray slash between attributes; skip it.
                    cursor += 1;
                }
                _ => match self.scan_attribute(cursor) {
                    Some((attribute, next)) => {
                        attributes.push(attribute);
                        cursor = next;
                    }
                    None => return self.fail(LexError::UnterminatedTag { offset: start }),
                },
            }
        }

        let raw = self.input[start..cursor].to_string();
        self.pos = cursor;
        if !self_closing && is_raw_text_element(&name) {
            self.state = LexState::InRawText {
                element: name.to_ascii_lowercase(),
                content_start: cursor,
            };
        }
        Some(Ok(Token::OpenTag {
            name,
            attributes,
            self_closing,
            raw,
        }))
    }

    /// Scans one attribute starting at `cursor` (not whitespace, `>` or a
    /// terminating slash). Returns the attribute and the position after it,
    /// or `None` if the input ended inside the attribute.
    fn scan_attribute(&self, cursor: usize) -> Option<(Attribute, usize)> {
        let name_len = self.input[cursor..]
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '>' || c == '/')
            .unwrap_or(self.input.len() - cursor);
        // Guard against a zero-length name looping forever.
        let name_len = name_len.max(1);
        let name = self.input[cursor..cursor + name_len].to_string();
        let mut pos = skip_whitespace(self.input, cursor + name_len);

        if !self.input[pos..].starts_with('=') {
            return Some((
                Attribute {
                    name,
                    value: None,
                    quote: QuoteStyle::Unquoted,
                },
                pos,
            ));
        }
        pos = skip_whitespace(self.input, pos + 1);

        let (value, quote, after) = match self.input[pos..].chars().next() {
            Some(delimiter @ ('"' | '\'')) => {
                let value_start = pos + 1;
                let value_len = self.input[value_start..].find(delimiter)?;
                let quote = if delimiter == '"' {
                    QuoteStyle::Double
                } else {
                    QuoteStyle::Single
                };
                (
                    self.input[value_start..value_start + value_len].to_string(),
                    quote,
                    value_start + value_len + 1,
                )
            }
            Some(_) => {
                let value_len = self.input[pos..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(self.input.len() - pos);
                (
                    self.input[pos..pos + value_len].to_string(),
                    QuoteStyle::Unquoted,
                    pos + value_len,
                )
            }
            None => return None,
        };

        Some((
            Attribute {
                name,
                value: Some(value),
                quote,
            },
            after,
        ))
    }
}

impl Iterator for ContextAwareLexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.pos >= self.input.len() {
            self.done = true;
            // A raw-text element still open at end of input has no closing
            // tag, even when its content is empty.
            if let LexState::InRawText {
                element,
                content_start,
            } = &self.state
            {
                return Some(Err(LexError::UnclosedRawText {
                    element: element.clone(),
                    offset: *content_start,
                }));
            }
            return None;
        }
        match self.state {
            LexState::InMarkup => self.next_in_markup(),
            LexState::InRawText { .. } => self.next_in_raw_text(),
        }
    }
}

/// A `<` begins a tag construct only when followed by a letter, `/`, `!`
/// or `?`. Everything else, including `<` at the end of input, is text.
fn starts_tag_construct(rest: &str) -> bool {
    debug_assert!(rest.starts_with('<'));
    match rest[1..].chars().next() {
        Some(c) => c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?',
        None => false,
    }
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == ':' || c == '_'
}

fn skip_whitespace(input: &str, mut pos: usize) -> usize {
    while input[pos..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_whitespace())
    {
        pos += 1;
    }
    pos
}

/// Finds the next `</element` (case-insensitive) at or after `from` whose
/// name is followed by whitespace, `/`, `>` or the end of input.
fn find_appropriate_end_tag(input: &str, from: usize, element: &str) -> Option<usize> {
    // Byte-wise comparison: the name region may sit next to multi-byte
    // characters, where a str slice could split a code point.
    let bytes = input.as_bytes();
    for (offset, _) in input[from..].match_indices("</") {
        let candidate = from + offset;
        let name_start = candidate + 2;
        let name_end = name_start + element.len();
        if name_end > bytes.len() {
            return None;
        }
        if !bytes[name_start..name_end].eq_ignore_ascii_case(element.as_bytes()) {
            continue;
        }
        match bytes.get(name_end) {
            Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {
                return Some(candidate)
            }
            None => return Some(candidate),
            Some(_) => continue,
        }
    }
    None
}
