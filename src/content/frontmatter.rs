//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that accepts any YAML scalar as text
///
/// `title: 2024` or `category: true` are kept as their textual form,
/// a null value (`title:`) counts as absent.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from a cheatsheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub category: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Never fails: anything that is not a well-formed `---` block yields
    /// default front-matter and the whole input as body.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some((header, body)) = split_header(content) else {
            return (FrontMatter::default(), content);
        };

        if header.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        if !has_yaml_structure(header) {
            // Prose between two rules, not a metadata block
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(header) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// Title, unless missing or blank
    pub fn title(&self) -> Option<&str> {
        non_blank(&self.title)
    }

    /// Description, unless missing or blank
    pub fn description(&self) -> Option<&str> {
        non_blank(&self.description)
    }

    /// Category, unless missing or blank
    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Split a leading `---` fenced block from the rest of the content
fn split_header(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == "---" {
            let header = &content[header_start..offset];
            let body = &content[offset + line.len()..];
            return Some((header, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }

    None
}

/// Whether a fenced block has at least one `key: value` line
fn has_yaml_structure(header: &str) -> bool {
    header.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        if !is_valid_key {
            return false;
        }
        let after_colon = &trimmed[colon_pos + 1..];
        after_colon.is_empty() || after_colon.starts_with(' ')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Python
description: Syntax, data types and the standard library
category: Programming Language
---

# Python

Body text.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Python"));
        assert_eq!(
            fm.description(),
            Some("Syntax, data types and the standard library")
        );
        assert_eq!(fm.category(), Some("Programming Language"));
        assert!(body.starts_with("# Python"));
        assert!(!body.contains("title:"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let content = "---\ntitle: Go\n---\nbody\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Go"));
        assert_eq!(fm.description(), None);
        assert_eq!(fm.category(), None);
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_blank_values_are_none() {
        let content = "---\ntitle: \"  \"\ndescription:\ncategory: Web\n---\nbody";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(fm.description(), None);
        assert_eq!(fm.category(), Some("Web"));
    }

    #[test]
    fn test_scalar_values_become_text() {
        let content = "---\ntitle: 2024\ndescription: true\ncategory: 1.5\nauthor: me\n---\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("2024"));
        assert_eq!(fm.description(), Some("true"));
        assert_eq!(fm.category(), Some("1.5"));
        assert_eq!(
            fm.extra.get("author"),
            Some(&serde_yaml::Value::String("me".to_string()))
        );
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo header here.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let content = "---\ntitle: Broken\n\n# Heading";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_invalid_yaml_degrades_to_defaults() {
        let content = "---\ntitle: [unclosed\ncategory: Web\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(fm.category(), None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_nested_value_for_known_field_degrades() {
        let content = "---\ntitle:\n  - a\n  - b\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let content = "---\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Windows"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert!(body.contains("Some random text"));
        assert!(body.starts_with("---"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = r#"---
Check out https://example.com/path and http://test.com
---
More content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title(), None);
        assert!(body.contains("https://example.com"));
    }
}
