//! Built-in site templates using Tera template engine
//!
//! The templates are embedded in the binary. Autoescaping is off; user text is
//! escaped explicitly with the `html` filter and rendered cheatsheet bodies are
//! inserted as-is.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Cheatsheet, CheatsheetSummary};
use crate::helpers::{cheatsheet_url, html_escape};
use crate::query::{categories, ListingQuery, ALL_CATEGORIES};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("cheatsheet.html", include_str!("site/cheatsheet.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        tera.register_filter("html", html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Listing page, filtered by `query`
    pub fn render_listing(
        &self,
        config: &SiteConfig,
        listing: &[CheatsheetSummary],
        query: &ListingQuery,
    ) -> Result<String> {
        let sheets: Vec<SheetData> = query
            .filter(listing)
            .into_iter()
            .map(|summary| SheetData::new(config, summary))
            .collect();

        let mut context = Context::new();
        context.insert("config", &ConfigData::from(config));
        context.insert("cheatsheets", &sheets);
        context.insert("categories", &categories(listing));
        context.insert("query", query);
        context.insert("selected_category", &selected_category(query));
        context.insert("narrowed", &(sheets.len() < listing.len()));
        self.render("index.html", &context)
    }

    /// Page for one cheatsheet
    pub fn render_cheatsheet(&self, config: &SiteConfig, sheet: &Cheatsheet) -> Result<String> {
        let mut context = Context::new();
        context.insert("config", &ConfigData::from(config));
        context.insert("sheet", sheet);
        self.render("cheatsheet.html", &context)
    }

    /// Page for a slug with no cheatsheet
    pub fn render_not_found(&self, config: &SiteConfig, slug: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("config", &ConfigData::from(config));
        context.insert("slug", slug);
        self.render("not_found.html", &context)
    }
}

/// The active category, `All` when the filter is off
fn selected_category(query: &ListingQuery) -> &str {
    match query.category.as_deref() {
        Some(category) if !category.is_empty() => category,
        _ => ALL_CATEGORIES,
    }
}

/// Tera filter: escape HTML special characters
fn html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("html", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 120,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub root: String,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            root: config.root.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetData {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub url: String,
}

impl SheetData {
    fn new(config: &SiteConfig, summary: &CheatsheetSummary) -> Self {
        Self {
            slug: summary.slug.clone(),
            title: summary.title.clone(),
            description: summary.description.clone(),
            category: summary.category.clone(),
            url: cheatsheet_url(config, &summary.slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn summary(slug: &str, title: &str, category: &str) -> CheatsheetSummary {
        CheatsheetSummary {
            slug: slug.to_string(),
            title: title.to_string(),
            description: format!("{} basics", title),
            category: category.to_string(),
        }
    }

    fn listing() -> Vec<CheatsheetSummary> {
        vec![
            summary("docker", "Docker", "Tools"),
            summary("rust", "Rust <3", "Programming Language"),
        ]
    }

    #[test]
    fn test_render_listing() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_listing(&SiteConfig::default(), &listing(), &ListingQuery::default())
            .unwrap();

        assert!(html.contains(r#"href="/cheatsheet/docker/""#));
        assert!(html.contains("Rust &lt;3"));
        assert!(!html.contains("Rust <3"));
        assert!(html.contains(r#"data-category="Programming Language""#));
        assert!(html.contains("?category=All"));
        assert!(html.contains(r#"data-selected="All" data-narrowed="false""#));
        assert!(!html.contains("No cheatsheets found."));
    }

    #[test]
    fn test_render_listing_filtered() {
        let renderer = TemplateRenderer::new().unwrap();
        let query = ListingQuery::new("", Some("Tools".to_string()));
        let html = renderer
            .render_listing(&SiteConfig::default(), &listing(), &query)
            .unwrap();

        assert!(html.contains("/cheatsheet/docker/"));
        assert!(!html.contains("/cheatsheet/rust/"));
        assert!(html.contains(r#"data-selected="Tools" data-narrowed="true""#));
        // Every category link stays, so `All` can restore the full listing
        assert!(html.contains(r#"href="/?category=All""#));
        assert!(html.contains(r#"href="/?category=Programming%20Language""#));

        let none = ListingQuery::new("nothing matches", None);
        let html = renderer
            .render_listing(&SiteConfig::default(), &listing(), &none)
            .unwrap();
        assert!(html.contains("No cheatsheets found."));
        assert!(html.contains(r#"value="nothing matches""#));
    }

    #[test]
    fn test_render_cheatsheet() {
        let renderer = TemplateRenderer::new().unwrap();
        let sheet = Cheatsheet {
            slug: "rust".to_string(),
            title: "Rust".to_string(),
            description: "Ownership & borrowing".to_string(),
            category: "Programming Language".to_string(),
            content: "**hi**".to_string(),
            content_html: "<p><strong>hi</strong></p>".to_string(),
            source: PathBuf::from("rust.md"),
            extra: HashMap::new(),
        };
        let html = renderer
            .render_cheatsheet(&SiteConfig::default(), &sheet)
            .unwrap();

        assert!(html.contains("<title>Rust - Cheatsheets</title>"));
        assert!(html.contains("Ownership &amp; borrowing"));
        assert!(html.contains("<p><strong>hi</strong></p>"));
    }

    #[test]
    fn test_render_not_found_escapes_slug() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_not_found(&SiteConfig::default(), "<b>nope</b>")
            .unwrap();
        assert!(html.contains("Cheatsheet not found"));
        assert!(html.contains("&lt;b&gt;nope&lt;/b&gt;"));
    }

    #[test]
    fn test_truncate_chars_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let out = truncate_chars_filter(&tera::Value::from("héllo world"), &args).unwrap();
        assert_eq!(out, tera::Value::from("héllo..."));

        let short = truncate_chars_filter(&tera::Value::from("hi"), &args).unwrap();
        assert_eq!(short, tera::Value::from("hi"));
    }
}
