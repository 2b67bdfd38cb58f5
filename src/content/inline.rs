//! Inline markdown: code spans, emphasis and links

use crate::config::StyleClasses;
use crate::helpers::{html_escape, link_tag, open_tag};

/// An inline token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<'a> {
    Text(&'a str),
    Code(&'a str),
    Strong(Vec<Inline<'a>>),
    Emphasis(Vec<Inline<'a>>),
    Link { text: Vec<Inline<'a>>, url: &'a str },
}

/// Tokenize a run of inline text
///
/// Code spans win over everything, `**` wins over `*`, so a single asterisk
/// never closes on half of a bold marker.
pub fn parse(text: &str) -> Vec<Inline<'_>> {
    let bytes = text.as_bytes();
    let mut nodes = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let double_star = bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'*');
        let parsed = match bytes[i] {
            b'`' => code_span(text, i),
            b'*' if double_star => strong(text, i),
            b'*' => emphasis(text, i),
            b'[' => link(text, i),
            _ => None,
        };

        match parsed {
            Some((node, end)) => {
                if plain_start < i {
                    nodes.push(Inline::Text(&text[plain_start..i]));
                }
                nodes.push(node);
                i = end;
                plain_start = end;
            }
            // An unmatched `**` stays literal as a pair
            None if double_star => i += 2,
            None => i += 1,
        }
    }

    if plain_start < bytes.len() {
        nodes.push(Inline::Text(&text[plain_start..]));
    }

    nodes
}

/// Tokenize and render inline text to HTML
pub fn render_inline(text: &str, classes: &StyleClasses) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    render(&parse(text), classes, &mut out);
    out
}

/// Render inline tokens to HTML
pub fn render(nodes: &[Inline<'_>], classes: &StyleClasses, out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&html_escape(text)),
            Inline::Code(code) => {
                out.push_str(&open_tag("code", &classes.inline_code));
                out.push_str(&html_escape(code));
                out.push_str("</code>");
            }
            Inline::Strong(children) => {
                out.push_str("<strong>");
                render(children, classes, out);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                render(children, classes, out);
                out.push_str("</em>");
            }
            Inline::Link { text, url } => {
                let mut inner = String::new();
                render(text, classes, &mut inner);
                out.push_str(&link_tag(url, &classes.link, &inner));
            }
        }
    }
}

fn code_span(text: &str, start: usize) -> Option<(Inline<'_>, usize)> {
    let open = start + 1;
    let len = text[open..].find('`')?;
    if len == 0 {
        return None;
    }
    Some((Inline::Code(&text[open..open + len]), open + len + 1))
}

fn strong(text: &str, start: usize) -> Option<(Inline<'_>, usize)> {
    let open = start + 2;
    let mut close = find_closing(text, open, true)?;
    // `***x***`: the outer pair closes on the last two stars of the run
    if text.as_bytes().get(open) == Some(&b'*') {
        close += star_run(&text[close..]).saturating_sub(2);
    }
    let inner = &text[open..close];
    if !is_flanked(inner) {
        return None;
    }
    Some((Inline::Strong(parse(inner)), close + 2))
}

fn emphasis(text: &str, start: usize) -> Option<(Inline<'_>, usize)> {
    let open = start + 1;
    let close = find_closing(text, open, false)?;
    let inner = &text[open..close];
    if !is_flanked(inner) {
        return None;
    }
    Some((Inline::Emphasis(parse(inner)), close + 1))
}

fn link(text: &str, start: usize) -> Option<(Inline<'_>, usize)> {
    let label_start = start + 1;
    let label_end = find_label_end(text, label_start)?;
    if text.as_bytes().get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let url_start = label_end + 2;
    let url_end = find_url_end(text, url_start)?;
    let url = text[url_start..url_end].trim();
    if url.is_empty() {
        return None;
    }
    Some((
        Inline::Link {
            text: parse(&text[label_start..label_end]),
            url,
        },
        url_end + 1,
    ))
}

/// The `]` ending a link label; code spans may contain `]`
fn find_label_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'`' => i = skip_code_span(text, i),
            b']' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// The `)` ending a link URL, with nested parentheses balanced
fn find_url_end(text: &str, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(from) {
        match b {
            b'(' => depth += 1,
            b')' if depth == 0 => return Some(i),
            b')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Index just past the code span opening at `i`, or past a lone backtick
fn skip_code_span(text: &str, i: usize) -> usize {
    match text[i + 1..].find('`') {
        Some(len) => i + len + 2,
        None => i + 1,
    }
}

fn star_run(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b'*').count()
}

/// Find the closing `**` (double) or lone `*` (single) after `from`
///
/// Code spans are skipped; when looking for a lone `*`, every `**` pair is
/// skipped as a unit.
fn find_closing(text: &str, from: usize, double: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;

    while i < bytes.len() {
        match bytes[i] {
            b'`' => i = skip_code_span(text, i),
            b'*' => {
                let pair = bytes.get(i + 1) == Some(&b'*');
                match (double, pair) {
                    (true, true) | (false, false) => return Some(i),
                    (false, true) => i += 2,
                    (true, false) => i += 1,
                }
            }
            _ => i += 1,
        }
    }

    None
}

/// Emphasized text may not be empty or start/end with whitespace
fn is_flanked(inner: &str) -> bool {
    !inner.is_empty() && inner.trim() == inner
}
