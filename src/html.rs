//! Lossy HTML tokenizer shared by the sanitizer and the placeholder scanner.
//!
//! This is deliberately not a full HTML5 lexer: it only needs to
//! classify markup well enough to strip dangerous constructs and to find
//! chart placeholders, while never failing on malformed input.

#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    /// Entity-decoded value; `None` for bare boolean attributes.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<Attr>,
    pub self_closing: bool,
}

impl Tag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .and_then(|attr| attr.value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Text,
    Comment,
    Doctype,
    StartTag(Tag),
    EndTag(String),
}

/// One token plus its byte span in the source string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// Content of these elements is raw text up to the matching close tag.
const RAWTEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_rawtext(name: &str) -> bool {
    RAWTEXT_ELEMENTS.contains(&name)
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < len {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }
        let Some(token) = scan_markup(input, pos) else {
            // A lone '<' that opens nothing stays literal text.
            pos += 1;
            continue;
        };
        if text_start < pos {
            tokens.push(Token {
                kind: TokenKind::Text,
                start: text_start,
                end: pos,
            });
        }
        let token_end = token.end;
        let rawtext = match &token.kind {
            TokenKind::StartTag(tag) if !tag.self_closing && is_rawtext(&tag.name) => {
                Some(tag.name.clone())
            }
            _ => None,
        };
        tokens.push(token);
        pos = token_end;
        text_start = pos;

        if let Some(name) = rawtext {
            let (content_end, close) = scan_rawtext(input, pos, &name);
            if content_end > pos {
                tokens.push(Token {
                    kind: TokenKind::Text,
                    start: pos,
                    end: content_end,
                });
            }
            if let Some(close) = close {
                pos = close.end;
                tokens.push(close);
            } else {
                pos = len;
            }
            text_start = pos;
        }
    }

    if text_start < len {
        tokens.push(Token {
            kind: TokenKind::Text,
            start: text_start,
            end: len,
        });
    }

    tokens
}

fn scan_markup(input: &str, pos: usize) -> Option<Token> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let next = *bytes.get(pos + 1)?;

    if next == b'!' {
        if input[pos..].starts_with("<!--") {
            let end = input[pos + 4..]
                .find("-->")
                .map(|idx| pos + 4 + idx + 3)
                .unwrap_or(len);
            return Some(Token {
                kind: TokenKind::Comment,
                start: pos,
                end,
            });
        }
        let end = find_byte(bytes, pos + 2, b'>').map(|i| i + 1).unwrap_or(len);
        return Some(Token {
            kind: TokenKind::Doctype,
            start: pos,
            end,
        });
    }

    if next == b'?' {
        // Processing instructions become bogus comments, as in browsers.
        let end = find_byte(bytes, pos + 2, b'>').map(|i| i + 1).unwrap_or(len);
        return Some(Token {
            kind: TokenKind::Comment,
            start: pos,
            end,
        });
    }

    if next == b'/' {
        let name_start = pos + 2;
        if name_start >= len || !bytes[name_start].is_ascii_alphabetic() {
            return None;
        }
        let mut i = name_start;
        while i < len && is_name_byte(bytes[i]) {
            i += 1;
        }
        let name = input[name_start..i].to_ascii_lowercase();
        let end = find_byte(bytes, i, b'>').map(|idx| idx + 1).unwrap_or(len);
        return Some(Token {
            kind: TokenKind::EndTag(name),
            start: pos,
            end,
        });
    }

    if next.is_ascii_alphabetic() {
        return scan_start_tag(input, pos);
    }

    None
}

fn scan_start_tag(input: &str, pos: usize) -> Option<Token> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = pos + 1;
    let name_start = i;
    while i < len && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = input[name_start..i].to_ascii_lowercase();
    let mut attrs: Vec<Attr> = Vec::new();
    let mut self_closing = false;

    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            // Truncated tag at end of input: swallow it as a bogus comment.
            return Some(Token {
                kind: TokenKind::Comment,
                start: pos,
                end: len,
            });
        }
        match bytes[i] {
            b'>' => {
                i += 1;
                break;
            }
            b'/' => {
                i += 1;
                if i < len && bytes[i] == b'>' {
                    self_closing = true;
                    i += 1;
                    break;
                }
            }
            _ => {
                let attr_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
                    i += 1;
                }
                if i == attr_start {
                    i += 1;
                    continue;
                }
                let attr_name = input[attr_start..i].to_ascii_lowercase();
                while i < len && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                let mut value = None;
                if i < len && bytes[i] == b'=' {
                    i += 1;
                    while i < len && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                        let quote = bytes[i];
                        i += 1;
                        let value_start = i;
                        let Some(value_end) = find_byte(bytes, i, quote) else {
                            return Some(Token {
                                kind: TokenKind::Comment,
                                start: pos,
                                end: len,
                            });
                        };
                        value = Some(decode_entities(&input[value_start..value_end]));
                        i = value_end + 1;
                    } else {
                        let value_start = i;
                        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                            i += 1;
                        }
                        value = Some(decode_entities(&input[value_start..i]));
                    }
                }
                if !attrs.iter().any(|attr| attr.name == attr_name) {
                    attrs.push(Attr {
                        name: attr_name,
                        value,
                    });
                }
            }
        }
    }

    Some(Token {
        kind: TokenKind::StartTag(Tag {
            name,
            attrs,
            self_closing,
        }),
        start: pos,
        end: i,
    })
}

/// Returns (content end, close-tag token) for a rawtext element body.
fn scan_rawtext(input: &str, from: usize, name: &str) -> (usize, Option<Token>) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = from;
    'outer: while i + 1 < len {
        if bytes[i] == b'<' && bytes[i + 1] == b'/' {
            let candidate_start = i + 2;
            let candidate_end = candidate_start + name.len();
            if candidate_end <= len
                && bytes[candidate_start..candidate_end].eq_ignore_ascii_case(name.as_bytes())
            {
                // The close tag name must not continue into a longer name.
                if let Some(&after) = bytes.get(candidate_end) {
                    if is_name_byte(after) {
                        i += 1;
                        continue 'outer;
                    }
                }
                let end = find_byte(bytes, candidate_end, b'>')
                    .map(|idx| idx + 1)
                    .unwrap_or(len);
                return (
                    i,
                    Some(Token {
                        kind: TokenKind::EndTag(name.to_string()),
                        start: i,
                        end,
                    }),
                );
            }
        }
        i += 1;
    }
    (len, None)
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b':'
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|&b| b == needle)
        .map(|idx| from + idx)
}

/// Decodes numeric references and the basic named entities. Anything it does
/// not recognize is left untouched.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match parse_entity(tail) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn parse_entity(input: &str) -> Option<(char, usize)> {
    let bytes = input.as_bytes();
    debug_assert_eq!(bytes[0], b'&');

    if input.len() > 2 && bytes[1] == b'#' {
        let (digits_start, radix) = if bytes[2] == b'x' || bytes[2] == b'X' {
            (3, 16)
        } else {
            (2, 10)
        };
        let mut i = digits_start;
        while i < bytes.len() && i < digits_start + 8 && (bytes[i] as char).is_digit(radix) {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
        let code = u32::from_str_radix(&input[digits_start..i], radix).ok()?;
        let decoded = char::from_u32(code).unwrap_or('\u{FFFD}');
        let consumed = if bytes.get(i) == Some(&b';') { i + 1 } else { i };
        return Some((decoded, consumed));
    }

    let mut i = 1;
    while i < bytes.len() && i < 12 && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if bytes.get(i) != Some(&b';') {
        return None;
    }
    let decoded = match &input[1..i] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        _ => return None,
    };
    Some((decoded, i + 1))
}

pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
