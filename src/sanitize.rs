//! Best-effort sanitizer for generated dashboard HTML.
//!
//! Output is safe for direct DOM insertion: no script elements, no inline
//! event handlers, no script-scheme URLs. Structural markup, classes and the
//! `data-*` attributes used for chart mounting pass through. Sanitizing
//! already-sanitized output is byte-identical.

use crate::html::{self, Tag, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

// Dropped together with everything inside them.
const DROP_WITH_CONTENT: &[&str] = &["script", "iframe", "object", "embed"];

// Dropped tag-only; these are all void so they carry no content.
const DROP_TAG_ONLY: &[&str] = &["link", "meta", "base"];

const URL_ATTRS: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "ftp"];

static SCHEME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9+.\-]*:").unwrap());

/// HTML that has been through [`sanitize`]. The scanner only accepts this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedHtml {
    html: String,
}

impl SanitizedHtml {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

pub fn sanitize(input: &str) -> SanitizedHtml {
    let tokens = html::tokenize(input);
    let mut out = String::with_capacity(input.len());
    // Name and nesting depth of the element currently being dropped.
    let mut dropping: Option<(String, usize)> = None;

    for token in &tokens {
        if let Some((name, depth)) = &mut dropping {
            match &token.kind {
                TokenKind::StartTag(tag)
                    if tag.name == *name && !tag.self_closing && !html::is_void(&tag.name) =>
                {
                    *depth += 1;
                }
                TokenKind::EndTag(end_name) if end_name == name => {
                    if *depth == 0 {
                        dropping = None;
                    } else {
                        *depth -= 1;
                    }
                }
                _ => {}
            }
            continue;
        }

        match &token.kind {
            TokenKind::Text => out.push_str(&input[token.start..token.end]),
            TokenKind::Comment | TokenKind::Doctype => {}
            TokenKind::StartTag(tag) => {
                if DROP_WITH_CONTENT.contains(&tag.name.as_str()) {
                    if !tag.self_closing && !html::is_void(&tag.name) {
                        dropping = Some((tag.name.clone(), 0));
                    }
                    continue;
                }
                if DROP_TAG_ONLY.contains(&tag.name.as_str()) {
                    continue;
                }
                write_start_tag(&mut out, tag);
            }
            TokenKind::EndTag(name) => {
                if DROP_WITH_CONTENT.contains(&name.as_str())
                    || DROP_TAG_ONLY.contains(&name.as_str())
                {
                    continue;
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }

    SanitizedHtml { html: out }
}

fn write_start_tag(out: &mut String, tag: &Tag) {
    out.push('<');
    out.push_str(&tag.name);
    for attr in &tag.attrs {
        if !keep_attr(&attr.name, attr.value.as_deref()) {
            continue;
        }
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            out.push_str(&html::escape_attr(value));
            out.push('"');
        }
    }
    if tag.self_closing {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}

fn keep_attr(name: &str, value: Option<&str>) -> bool {
    if name.starts_with("on") || name == "srcdoc" {
        return false;
    }
    if URL_ATTRS.contains(&name) {
        if let Some(value) = value {
            return url_is_allowed(value);
        }
    }
    true
}

fn url_is_allowed(value: &str) -> bool {
    // Whitespace and control characters are classic scheme-obfuscation
    // vectors; strip them before looking at the scheme.
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let Some(found) = SCHEME_RE.find(&cleaned) else {
        // Relative, fragment or empty URL.
        return true;
    };
    let scheme = &cleaned[..found.end() - 1];
    if ALLOWED_SCHEMES.contains(&scheme) {
        return true;
    }
    scheme == "data" && cleaned.starts_with("data:image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(input: &str) -> String {
        sanitize(input).into_string()
    }

    #[test]
    fn strips_script_tags_and_content() {
        let out = clean("<div>a</div><script>alert(1)</script><p>b</p>");
        assert!(!out.contains("script"));
        assert!(!out.contains("alert"));
        assert!(out.contains("<div>a</div>"));
        assert!(out.contains("<p>b</p>"));
    }

    #[test]
    fn strips_unterminated_script_to_end() {
        let out = clean("<p>x</p><script>steal()");
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn strips_event_handlers() {
        let out = clean("<button onclick=\"evil()\" class=\"cta\">go</button>");
        assert!(!out.contains("onclick"));
        assert!(out.contains("class=\"cta\""));
    }

    #[test]
    fn strips_javascript_urls_including_obfuscated() {
        for url in [
            "javascript:alert(1)",
            "JaVaScRiPt:alert(1)",
            " \t javascript:alert(1)",
            "java\nscript:alert(1)",
            "&#106;avascript:alert(1)",
            "vbscript:msgbox(1)",
            "data:text/html,<script>1</script>",
        ] {
            let out = clean(&format!("<a href=\"{}\">x</a>", url.replace('"', "")));
            assert!(!out.contains("href"), "kept dangerous url: {url} -> {out}");
        }
    }

    #[test]
    fn keeps_safe_urls() {
        for url in [
            "https://example.com/a?b=c",
            "/relative/path",
            "#fragment",
            "mailto:team@example.com",
            "data:image/png;base64,AAAA",
        ] {
            let out = clean(&format!("<a href=\"{url}\">x</a>"));
            assert!(out.contains("href"), "dropped safe url: {url}");
        }
    }

    #[test]
    fn preserves_chart_placeholders() {
        let out = clean("<div data-chart=\"c1\" data-chart-options='{\"fill\":true}'></div>");
        assert!(out.contains("data-chart=\"c1\""));
        assert!(out.contains("data-chart-options"));
    }

    #[test]
    fn strips_comments_and_doctype() {
        let out = clean("<!DOCTYPE html><!-- note --><div>x</div>");
        assert_eq!(out, "<div>x</div>");
    }

    #[test]
    fn drops_iframe_with_content_but_keeps_siblings() {
        let out = clean("<p>a</p><iframe src=\"https://x\"><p>inner</p></iframe><p>b</p>");
        assert_eq!(out, "<p>a</p><p>b</p>");
    }

    #[test]
    fn keeps_style_blocks_verbatim() {
        let input = "<style>.a > .b { color: red; }</style>";
        let out = clean(input);
        assert!(out.contains(".a > .b { color: red; }"));
    }

    #[test]
    fn idempotent_on_messy_input() {
        let inputs = [
            "<DIV CLASS=card data-chart=c1>x &amp; y</DIV>",
            "<p>3 < 4 & 5 > 2</p>",
            "<a href='a&amp;b'>t</a>",
            "<img src=\"x.png\"/><br>",
            "<div class=\"x",
            "<section><div data-chart=\"a\"><span>legacy</span></div></section>",
            "text with a stray < bracket",
        ];
        for input in inputs {
            let once = clean(input);
            let twice = clean(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn sanitizer_never_panics_on_garbage() {
        for input in [
            "",
            "<",
            "<>",
            "</",
            "</>",
            "<!",
            "<div",
            "<div a=",
            "<div a='x",
            "\u{0}<b\u{0}>",
            "<script",
            "<script><div>",
        ] {
            let _ = sanitize(input);
        }
    }
}
