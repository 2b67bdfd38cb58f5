//! Block-level tokenizer
//!
//! Splits a markdown body into typed blocks in one top-to-bottom pass. Each
//! line is classified by the current scan state; code, list and table regions
//! are explicit states, so their lines never leak into paragraphs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,3}) +(.*?)\s*$").unwrap();
    static ref BULLET_ITEM: Regex = Regex::new(r"^\s*[-*]\s+(.*?)\s*$").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\s*(\d+)\.\s+(.*?)\s*$").unwrap();
}

/// A block-level token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Heading { level: u8, text: &'a str },
    Code { lang: Option<&'a str>, code: String },
    Table { header: Vec<&'a str>, rows: Vec<Vec<&'a str>> },
    List { kind: ListKind, items: Vec<&'a str> },
    Quote(&'a str),
    Rule,
    /// Consecutive lines joined with single spaces
    Paragraph(String),
}

/// Bulleted (`-`, `*`) or numbered (`1.`) list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    /// Carries the number of the first item
    Ordered(u64),
}

impl ListKind {
    /// Whether an item of kind `other` continues a list of this kind
    fn continues(self, other: ListKind) -> bool {
        matches!(
            (self, other),
            (ListKind::Bullet, ListKind::Bullet) | (ListKind::Ordered(_), ListKind::Ordered(_))
        )
    }
}

#[derive(Debug)]
enum ScanState<'a> {
    Normal,
    InCode {
        /// Length of the opening backtick run
        fence_len: usize,
        lang: Option<&'a str>,
        lines: Vec<&'a str>,
    },
    InList {
        kind: ListKind,
        items: Vec<&'a str>,
    },
    InTable {
        lines: Vec<&'a str>,
    },
}

struct Scanner<'a> {
    state: ScanState<'a>,
    paragraph: Vec<&'a str>,
    blocks: Vec<Block<'a>>,
}

/// Tokenize a markdown body into blocks
pub fn parse(markdown: &str) -> Vec<Block<'_>> {
    let mut scanner = Scanner {
        state: ScanState::Normal,
        paragraph: Vec::new(),
        blocks: Vec::new(),
    };
    for line in markdown.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

impl<'a> Scanner<'a> {
    fn feed(&mut self, line: &'a str) {
        match std::mem::replace(&mut self.state, ScanState::Normal) {
            ScanState::InCode {
                fence_len,
                lang,
                mut lines,
            } => {
                if closes_fence(line, fence_len) {
                    self.blocks.push(Block::Code {
                        lang,
                        code: lines.join("\n"),
                    });
                } else {
                    lines.push(line);
                    self.state = ScanState::InCode {
                        fence_len,
                        lang,
                        lines,
                    };
                }
            }
            ScanState::InList { kind, mut items } => match list_item(line) {
                Some((next, text)) if kind.continues(next) => {
                    items.push(text);
                    self.state = ScanState::InList { kind, items };
                }
                _ => {
                    self.blocks.push(Block::List { kind, items });
                    self.feed_normal(line);
                }
            },
            ScanState::InTable { mut lines } => {
                if is_table_row(line) {
                    lines.push(line);
                    self.state = ScanState::InTable { lines };
                } else {
                    self.close_table(lines);
                    self.feed_normal(line);
                }
            }
            ScanState::Normal => self.feed_normal(line),
        }
    }

    fn feed_normal(&mut self, line: &'a str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.flush_paragraph();
            return;
        }

        if let Some((fence_len, lang)) = fence(line) {
            self.flush_paragraph();
            self.state = ScanState::InCode {
                fence_len,
                lang,
                lines: Vec::new(),
            };
        } else if let Some((level, text)) = heading(line) {
            self.flush_paragraph();
            self.blocks.push(Block::Heading { level, text });
        } else if trimmed == "---" {
            self.flush_paragraph();
            self.blocks.push(Block::Rule);
        } else if let Some(text) = line.strip_prefix("> ") {
            self.flush_paragraph();
            self.blocks.push(Block::Quote(text.trim()));
        } else if let Some((kind, text)) = list_item(line) {
            self.flush_paragraph();
            self.state = ScanState::InList {
                kind,
                items: vec![text],
            };
        } else if is_table_row(line) {
            self.flush_paragraph();
            self.state = ScanState::InTable { lines: vec![line] };
        } else {
            self.paragraph.push(trimmed);
        }
    }

    fn flush_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let text = self.paragraph.join(" ");
            self.paragraph.clear();
            self.blocks.push(Block::Paragraph(text));
        }
    }

    /// Emit a table, or the raw lines as a paragraph when malformed
    fn close_table(&mut self, lines: Vec<&'a str>) {
        if lines.len() >= 3 && is_table_separator(lines[1]) {
            let header = split_cells(lines[0]);
            let rows = lines[2..].iter().map(|line| split_cells(line)).collect();
            self.blocks.push(Block::Table { header, rows });
        } else {
            let text = lines
                .iter()
                .map(|line| line.trim())
                .collect::<Vec<_>>()
                .join(" ");
            self.blocks.push(Block::Paragraph(text));
        }
    }

    fn finish(mut self) -> Vec<Block<'a>> {
        match std::mem::replace(&mut self.state, ScanState::Normal) {
            // An unclosed fence runs to the end of the document
            ScanState::InCode { lang, lines, .. } => self.blocks.push(Block::Code {
                lang,
                code: lines.join("\n"),
            }),
            ScanState::InList { kind, items } => self.blocks.push(Block::List { kind, items }),
            ScanState::InTable { lines } => self.close_table(lines),
            ScanState::Normal => {}
        }
        self.flush_paragraph();
        self.blocks
    }
}

/// An opening code fence; yields the backtick run length and language tag
fn fence(line: &str) -> Option<(usize, Option<&str>)> {
    let trimmed = line.trim_start();
    let len = backtick_run(trimmed);
    if len < 3 {
        return None;
    }
    Some((len, trimmed[len..].split_whitespace().next()))
}

/// A closing fence is a bare backtick run at least as long as the opening one
fn closes_fence(line: &str, fence_len: usize) -> bool {
    let trimmed = line.trim();
    let len = backtick_run(trimmed);
    len >= fence_len && len == trimmed.len()
}

fn backtick_run(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b'`').count()
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING.captures(line)?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2)?.as_str();
    Some((level, text))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = BULLET_ITEM.captures(line) {
        return Some((ListKind::Bullet, caps.get(1)?.as_str()));
    }
    let caps = ORDERED_ITEM.captures(line)?;
    let start = caps.get(1)?.as_str().parse().unwrap_or(1);
    Some((ListKind::Ordered(start), caps.get(2)?.as_str()))
}

fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// `|---|:---:|` style line: only pipes, dashes, colons and spaces
fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Split a table row on `|`, dropping the empty edge artifacts
fn split_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(str::trim).collect()
}
