//! Content module - handles cheatsheet loading and markdown rendering

mod blocks;
mod document;
mod frontmatter;
pub mod highlight;
mod inline;
pub mod loader;
mod markdown;

pub use document::{compare_titles, sort_listing, Cheatsheet, CheatsheetSummary};
pub use frontmatter::FrontMatter;
pub use highlight::{HighlightError, Highlighter, NoHighlighter, SyntectHighlighter};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
