//! A small HTML-to-text reducer.
//!
//! Not a parser: it walks tags left to right, drops `<script>`/`<style>`
//! subtrees, turns line breaks and block boundaries into newlines, and keeps
//! every other text node with entities decoded.

use html_escape::decode_html_entities;

const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "table",
    "blockquote", "pre", "section", "article", "figure", "figcaption", "hr", "dd", "dt",
];

/// Reduce `html` to terminal-safe plain text.
pub fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        push_text(&mut text, &rest[..start]);
        rest = &rest[start..];

        if !looks_like_markup(rest) {
            text.push('<');
            rest = &rest[1..];
            continue;
        }

        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        let Some(end) = tag_end(rest) else {
            // Unterminated tag: nothing after it is text
            rest = "";
            break;
        };
        let tag = Tag::parse(&rest[1..end]);
        rest = &rest[end + 1..];

        if !tag.closing && !tag.self_closing && SKIPPED_ELEMENTS.contains(&tag.name.as_str()) {
            rest = skip_element(rest, &tag.name);
            continue;
        }

        if tag.name == "br" || BLOCK_ELEMENTS.contains(&tag.name.as_str()) {
            text.push('\n');
        }
    }
    push_text(&mut text, rest);

    collapse_blank_lines(&trim_lines(&text))
}

struct Tag {
    name: String,
    closing: bool,
    self_closing: bool,
}

impl Tag {
    fn parse(inner: &str) -> Self {
        let closing = inner.starts_with('/');
        let self_closing = inner.trim_end().ends_with('/');
        let name = inner
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self {
            name,
            closing,
            self_closing,
        }
    }
}

/// `<` followed by a tag name, `/`, `!` or `?` starts markup; anything else
/// (as in "a < b") is literal text.
fn looks_like_markup(s: &str) -> bool {
    s[1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

/// Byte offset of the `>` closing the tag at the start of `s`, ignoring any
/// `>` inside a quoted attribute value.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    let mut after_equals = false;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '>' => return Some(i),
                '"' | '\'' if after_equals => quote = Some(c),
                _ => {}
            },
        }
        if quote.is_none() && !c.is_whitespace() {
            after_equals = c == '=';
        }
    }
    None
}

/// Return what follows the closing tag of `name`, or "" if it never closes.
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    let lowered = rest.to_ascii_lowercase();
    let closing = format!("</{}", name);
    lowered
        .find(&closing)
        .and_then(|start| rest[start..].find('>').map(|end| &rest[start + end + 1..]))
        .unwrap_or("")
}

fn push_text(out: &mut String, raw: &str) {
    let mut rest = raw;
    while let Some(start) = rest.find("&#") {
        push_decoded(out, &rest[..start]);
        rest = &rest[start..];
        match numeric_reference(rest) {
            Some((c, len)) => {
                if let Some(c) = c.filter(|&c| is_printable(c)) {
                    out.push(c);
                }
                rest = &rest[len..];
            }
            None => {
                out.push_str("&#");
                rest = &rest[2..];
            }
        }
    }
    push_decoded(out, rest);
}

fn push_decoded(out: &mut String, raw: &str) {
    if raw.is_empty() {
        return;
    }
    out.extend(decode_html_entities(raw).chars().filter(|&c| is_printable(c)));
}

fn is_printable(c: char) -> bool {
    !c.is_control() || matches!(c, '\n' | '\t')
}

/// Parse `&#NN;` or `&#xHH;` at the start of `s`. Returns the character (if
/// the code point is valid) and the length of the reference.
fn numeric_reference(s: &str) -> Option<(Option<char>, usize)> {
    let body = &s[2..];
    let (digits, radix, prefix) = match body.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 3),
        None => (body, 10, 2),
    };
    let semi = digits.find(';')?;
    let number = &digits[..semi];
    if number.is_empty() || !number.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let c = u32::from_str_radix(number, radix).ok().and_then(char::from_u32);
    Some((c, prefix + semi + 1))
}

fn trim_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Collapse runs of three or more newlines down to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(c);
    }
    out
}
