//! Generator module - writes the static site using the built-in templates

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{CheatsheetSummary, ContentLoader};
use crate::helpers::cheatsheet_url;
use crate::query::{categories, ListingQuery};
use crate::templates::TemplateRenderer;
use crate::Cheatsheets;

/// Search index written to `index.json` for client-side filtering
#[derive(Debug, Serialize)]
struct SearchIndex<'a> {
    generated_at: String,
    categories: Vec<String>,
    cheatsheets: Vec<IndexEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct IndexEntry<'a> {
    #[serde(flatten)]
    summary: &'a CheatsheetSummary,
    url: String,
}

/// Static site generator
pub struct Generator {
    app: Cheatsheets,
    loader: ContentLoader,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Cheatsheets) -> Result<Self> {
        Ok(Self {
            app: app.clone(),
            loader: ContentLoader::new(app),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Use a custom loader (e.g. with a different renderer)
    pub fn with_loader(mut self, loader: ContentLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Generate the entire site, returning the number of cheatsheet pages
    pub fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.app.public_dir)?;

        let listing = self.loader.list_documents();
        tracing::info!("Loaded {} cheatsheets", listing.len());

        self.generate_search_index(&listing)?;
        self.generate_index_page(&listing)?;
        let pages = self.generate_cheatsheet_pages(&listing)?;

        Ok(pages)
    }

    /// Generate search index (JSON)
    fn generate_search_index(&self, listing: &[CheatsheetSummary]) -> Result<()> {
        let index = SearchIndex {
            generated_at: Local::now().to_rfc3339(),
            categories: categories(listing),
            cheatsheets: listing
                .iter()
                .map(|summary| IndexEntry {
                    summary,
                    url: cheatsheet_url(&self.app.config, &summary.slug),
                })
                .collect(),
        };

        let output_path = self.app.public_dir.join("index.json");
        let json = serde_json::to_string_pretty(&index)?;
        write_file(&output_path, &json)?;
        tracing::info!("Generated index.json");

        Ok(())
    }

    fn generate_index_page(&self, listing: &[CheatsheetSummary]) -> Result<()> {
        let html =
            self.renderer
                .render_listing(&self.app.config, listing, &ListingQuery::default())?;
        write_file(&self.app.public_dir.join("index.html"), &html)?;
        tracing::info!("Generated index.html");
        Ok(())
    }

    fn generate_cheatsheet_pages(&self, listing: &[CheatsheetSummary]) -> Result<usize> {
        let mut count = 0;

        for summary in listing {
            // Listed files can still vanish or become unreadable before this point
            let Some(sheet) = self.loader.load_document(&summary.slug) else {
                tracing::warn!("Skipping {}: could not be loaded", summary.slug);
                continue;
            };

            let html = self.renderer.render_cheatsheet(&self.app.config, &sheet)?;
            let output_path = self
                .app
                .public_dir
                .join("cheatsheet")
                .join(&sheet.slug)
                .join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated {:?}", output_path);
            count += 1;
        }

        Ok(count)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MarkdownRenderer, NoHighlighter};
    use tempfile::TempDir;

    fn generator(app: &Cheatsheets) -> Generator {
        let loader = ContentLoader::new(app).with_renderer(
            MarkdownRenderer::from_config(&app.config.markdown).with_highlighter(NoHighlighter),
        );
        Generator::new(app).unwrap().with_loader(loader)
    }

    #[test]
    fn test_generate_site() {
        let tmp = TempDir::new().unwrap();
        let app = Cheatsheets::new(tmp.path()).unwrap();
        fs::create_dir_all(&app.content_dir).unwrap();
        fs::write(
            app.content_dir.join("rust.md"),
            "---\ntitle: Rust\ncategory: Systems\n---\n# Rust\n\n**fast**\n",
        )
        .unwrap();
        fs::write(app.content_dir.join("go.md"), "Go body\n").unwrap();

        let pages = generator(&app).generate().unwrap();
        assert_eq!(pages, 2);

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(app.public_dir.join("index.json")).unwrap())
                .unwrap();
        let sheets = index["cheatsheets"].as_array().unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0]["slug"], "go");
        assert_eq!(sheets[0]["category"], "Programming Language");
        assert_eq!(sheets[1]["title"], "Rust");
        assert_eq!(sheets[1]["url"], "/cheatsheet/rust/");
        assert_eq!(
            index["categories"],
            serde_json::json!(["All", "Programming Language", "Systems"])
        );
        assert!(index["generated_at"].is_string());

        let listing_page = fs::read_to_string(app.public_dir.join("index.html")).unwrap();
        assert!(listing_page.contains("/cheatsheet/rust/"));

        let page =
            fs::read_to_string(app.public_dir.join("cheatsheet/rust/index.html")).unwrap();
        assert!(page.contains("<strong>fast</strong>"));
        assert!(app.public_dir.join("cheatsheet/go/index.html").exists());
    }

    #[test]
    fn test_generate_empty_corpus() {
        let tmp = TempDir::new().unwrap();
        let app = Cheatsheets::new(tmp.path()).unwrap();

        let pages = generator(&app).generate().unwrap();
        assert_eq!(pages, 0);
        assert!(app.public_dir.join("index.json").exists());
        assert!(app.public_dir.join("index.html").exists());
    }
}
