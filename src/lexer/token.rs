//! Markup token types and re-serialization.

/// How an attribute value was delimited in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `name="value"`
    Double,
    /// `name='value'`
    Single,
    /// `name=value`
    Unquoted,
}

/// One attribute of an open tag, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name with its source casing.
    pub name: String,
    /// Attribute value; `None` for valueless attributes like `disabled`.
    pub value: Option<String>,
    /// Delimiter style the value had in the source.
    pub quote: QuoteStyle,
}

impl Attribute {
    /// Creates an attribute with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>, quote: QuoteStyle) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            quote,
        }
    }

    /// Creates a valueless attribute.
    pub fn valueless(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            quote: QuoteStyle::Unquoted,
        }
    }
}

/// A markup token produced by the lexer, mirroring document order.
///
/// Tags keep their exact source slice in `raw` so that tokens the dispatcher
/// does not change can be emitted byte-identically. Doctype declarations,
/// CDATA sections and processing instructions surface as `Text` covering the
/// whole construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening tag, e.g. `<img src="x.png">`.
    OpenTag {
        /// Tag name with its source casing.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
        /// Whether the tag ended in `/>`.
        self_closing: bool,
        /// Exact source slice of the tag, `<` through `>`.
        raw: String,
    },
    /// A closing tag, e.g. `</div>`.
    CloseTag {
        /// Tag name with its source casing.
        name: String,
        /// Exact source slice of the tag.
        raw: String,
    },
    /// A run of character data (also raw-text element content and
    /// declarations).
    Text(String),
    /// A comment; the value is the interior between `<!--` and `-->`.
    Comment(String),
}

impl Token {
    /// The tag name, for tag tokens.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Token::OpenTag { name, .. } | Token::CloseTag { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Rebuilds an open tag from its parts.
///
/// Used for tags whose attributes were rewritten; unchanged tags are emitted
/// from their raw slice instead. Attribute order and quoting style are kept.
/// An unquoted value that now needs delimiting (it contains whitespace or
/// `>`) is promoted to quotes, picking a quote character the value does not
/// contain.
pub fn serialize_open_tag(name: &str, attributes: &[Attribute], self_closing: bool) -> String {
    let mut out = String::with_capacity(name.len() + attributes.len() * 16 + 4);
    out.push('<');
    out.push_str(name);
    for attr in attributes {
        out.push(' ');
        write_attribute(&mut out, attr);
    }
    if self_closing {
        out.push('/');
    }
    out.push('>');
    out
}

fn write_attribute(out: &mut String, attr: &Attribute) {
    out.push_str(&attr.name);
    let Some(value) = &attr.value else {
        return;
    };
    out.push('=');

    let style = match attr.quote {
        QuoteStyle::Double => QuoteStyle::Double,
        QuoteStyle::Single => QuoteStyle::Single,
        QuoteStyle::Unquoted => {
            if value.contains(|c: char| c.is_ascii_whitespace() || c == '>') {
                if value.contains('"') {
                    QuoteStyle::Single
                } else {
                    QuoteStyle::Double
                }
            } else {
                QuoteStyle::Unquoted
            }
        }
    };

    match style {
        QuoteStyle::Double => {
            out.push('"');
            // A double-quoted source value cannot contain a literal quote,
            // but a promoted unquoted one can.
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
        QuoteStyle::Single => {
            out.push('\'');
            out.push_str(&value.replace('\'', "&#39;"));
            out.push('\'');
        }
        QuoteStyle::Unquoted => out.push_str(value),
    }
}
