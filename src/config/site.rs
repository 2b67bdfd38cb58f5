//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Metadata fallbacks
    pub default_description: String,
    pub default_category: String,

    // Rendering
    pub cache: bool,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Cheatsheets".to_string(),
            description: "Beginner-friendly cheatsheets with clear examples".to_string(),

            root: "/".to_string(),

            content_dir: "content/cheatsheets".to_string(),
            public_dir: "public".to_string(),

            default_description: "Cheatsheet".to_string(),
            default_category: "Programming Language".to_string(),

            cache: false,
            markdown: MarkdownConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Which markdown engine renders cheatsheet bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownEngine {
    /// The built-in line-oriented renderer
    #[default]
    Builtin,
    /// pulldown-cmark with the same styling hooks
    #[serde(alias = "cmark")]
    Commonmark,
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub engine: MarkdownEngine,
    /// Language assumed for fences without a tag
    pub default_language: String,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub classes: StyleClasses,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            engine: MarkdownEngine::default(),
            default_language: "javascript".to_string(),
            highlight: HighlightConfig::default(),
            classes: StyleClasses::default(),
        }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// CSS classes attached to rendered elements
///
/// An empty string omits the `class` attribute entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleClasses {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    /// Headings deeper than level 3 (CommonMark engine only)
    pub heading: String,
    pub paragraph: String,
    pub link: String,
    pub inline_code: String,
    pub blockquote: String,
    pub rule: String,
    pub bullet_list: String,
    pub ordered_list: String,
    pub table_wrapper: String,
    pub table: String,
    pub table_header: String,
    pub table_cell: String,
    pub code_block: String,
    pub highlighted_code_block: String,
}

impl Default for StyleClasses {
    fn default() -> Self {
        Self {
            h1: "text-3xl font-bold mt-10 mb-5".to_string(),
            h2: "text-2xl font-bold mt-8 mb-4".to_string(),
            h3: "text-xl font-bold mt-6 mb-3".to_string(),
            heading: "font-bold".to_string(),
            paragraph: String::new(),
            link: "text-accent hover:underline".to_string(),
            inline_code: "bg-secondary px-1.5 py-0.5 rounded text-sm".to_string(),
            blockquote: "border-l-4 border-accent pl-4 italic text-gray-400 my-3".to_string(),
            rule: "my-8 border-gray-700".to_string(),
            bullet_list: "list-disc space-y-1 my-3 pl-4".to_string(),
            ordered_list: "list-decimal space-y-1 my-3 pl-4".to_string(),
            table_wrapper: "overflow-x-auto my-6".to_string(),
            table: "w-full border-collapse border border-gray-700".to_string(),
            table_header: "bg-secondary border border-gray-700 px-4 py-2 font-bold text-left"
                .to_string(),
            table_cell: "border border-gray-700 px-4 py-2".to_string(),
            code_block: "bg-secondary rounded-lg p-4 my-4 overflow-x-auto relative group"
                .to_string(),
            highlighted_code_block:
                "bg-secondary rounded-lg p-4 my-4 overflow-x-auto relative group highlighted"
                    .to_string(),
        }
    }
}

impl StyleClasses {
    /// Class for a heading of the given level
    pub fn heading(&self, level: u8) -> &str {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            _ => &self.heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/cheatsheets");
        assert_eq!(config.default_category, "Programming Language");
        assert_eq!(config.markdown.engine, MarkdownEngine::Builtin);
        assert_eq!(config.markdown.default_language, "javascript");
        assert!(!config.cache);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Sheets
content_dir: sheets
default_category: Misc
cache: true
markdown:
  engine: commonmark
  highlight:
    enable: false
  classes:
    h1: title
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Sheets");
        assert_eq!(config.content_dir, "sheets");
        assert_eq!(config.default_category, "Misc");
        assert_eq!(config.default_description, "Cheatsheet");
        assert!(config.cache);
        assert_eq!(config.markdown.engine, MarkdownEngine::Commonmark);
        assert!(!config.markdown.highlight.enable);
        assert_eq!(config.markdown.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.markdown.classes.h1, "title");
        assert_eq!(config.markdown.classes.h2, "text-2xl font-bold mt-8 mb-4");
    }

    #[test]
    fn test_heading_classes() {
        let classes = StyleClasses::default();
        assert_eq!(classes.heading(1), classes.h1);
        assert_eq!(classes.heading(3), classes.h3);
        assert_eq!(classes.heading(5), "font-bold");
    }
}
