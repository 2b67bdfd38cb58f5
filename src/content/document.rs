//! Cheatsheet models

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A listing entry: everything about a cheatsheet except its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatsheetSummary {
    /// File name without the `.md` extension
    pub slug: String,

    /// Display title
    pub title: String,

    /// One-line description
    pub description: String,

    /// Category used by the listing filter
    pub category: String,
}

/// A fully loaded cheatsheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cheatsheet {
    /// File name without the `.md` extension
    pub slug: String,

    /// Display title
    pub title: String,

    /// One-line description
    pub description: String,

    /// Category used by the listing filter
    pub category: String,

    /// Raw markdown body (front-matter removed)
    pub content: String,

    /// Rendered HTML body
    pub content_html: String,

    /// Source file path
    pub source: PathBuf,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Sort a listing ascending by title, then by slug
pub fn sort_listing(listing: &mut [CheatsheetSummary]) {
    listing.sort_by(|a, b| compare_titles(&a.title, &b.title).then_with(|| a.slug.cmp(&b.slug)));
}

/// Locale-style title comparison
///
/// Accents and case are ignored first; on a tie lowercase sorts before
/// uppercase and the raw strings decide last. Punctuation sorts before digits,
/// digits before letters.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| {
            let class = if c.is_alphabetic() {
                2
            } else if c.is_numeric() {
                1
            } else {
                0
            };
            (class, c)
        })
        .collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
