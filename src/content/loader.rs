//! Content loader - loads cheatsheets from the content directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{sort_listing, Cheatsheet, CheatsheetSummary, FrontMatter, MarkdownRenderer};
use crate::cache::RenderCache;
use crate::error::Error;
use crate::Cheatsheets;

/// Loads cheatsheets from the content directory
pub struct ContentLoader {
    content_dir: PathBuf,
    default_description: String,
    default_category: String,
    renderer: MarkdownRenderer,
    cache: Option<RenderCache>,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(app: &Cheatsheets) -> Self {
        let config = &app.config;
        Self {
            content_dir: app.content_dir.clone(),
            default_description: config.default_description.clone(),
            default_category: config.default_category.clone(),
            renderer: MarkdownRenderer::from_config(&config.markdown),
            cache: config.cache.then(RenderCache::new),
        }
    }

    /// Replace the markdown renderer
    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// All cheatsheets in the content directory, sorted by title
    ///
    /// Best effort: a missing or unreadable directory gives an empty listing
    /// and unreadable files are skipped.
    pub fn list_documents(&self) -> Vec<CheatsheetSummary> {
        let mut listing = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read content directory {:?}: {}", self.content_dir, e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping file with non UTF-8 name: {:?}", path);
                continue;
            };

            match fs::read_to_string(path) {
                Ok(raw) => {
                    let (fm, _) = FrontMatter::parse(&raw);
                    listing.push(self.summary(slug, &fm));
                }
                Err(e) => {
                    tracing::warn!("Failed to read cheatsheet {:?}: {}", path, e);
                }
            }
        }

        sort_listing(&mut listing);
        if let Some(cache) = &self.cache {
            cache.retain(listing.iter().map(|s| s.slug.as_str()));
        }
        tracing::debug!("Listed {} cheatsheets", listing.len());
        listing
    }

    /// Load and render one cheatsheet, or `None` when it cannot be found or read
    pub fn load_document(&self, slug: &str) -> Option<Cheatsheet> {
        match self.read_document(slug) {
            Ok(document) => Some(document),
            Err(e) if e.is_not_found() => {
                tracing::debug!("{}", e);
                None
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    /// Load and render one cheatsheet, reporting why it failed
    pub fn read_document(&self, slug: &str) -> Result<Cheatsheet, Error> {
        validate_slug(slug)?;

        let path = self.content_dir.join(format!("{}.md", slug));
        let raw = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                Error::NotFound(slug.to_string())
            } else {
                Error::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let document = match &self.cache {
            Some(cache) => cache.get_or_render(slug, &raw, || self.build(slug, &path, &raw)),
            None => self.build(slug, &path, &raw),
        };
        Ok(document)
    }

    fn build(&self, slug: &str, path: &Path, raw: &str) -> Cheatsheet {
        let (fm, body) = FrontMatter::parse(raw);
        let summary = self.summary(slug, &fm);
        let content_html = self.renderer.render(body);

        Cheatsheet {
            slug: summary.slug,
            title: summary.title,
            description: summary.description,
            category: summary.category,
            content: body.to_string(),
            content_html,
            source: path.to_path_buf(),
            extra: fm.extra,
        }
    }

    /// Listing entry with per-field fallbacks applied
    fn summary(&self, slug: &str, fm: &FrontMatter) -> CheatsheetSummary {
        CheatsheetSummary {
            slug: slug.to_string(),
            title: fm.title().unwrap_or(slug).to_string(),
            description: fm
                .description()
                .unwrap_or(&self.default_description)
                .to_string(),
            category: fm.category().unwrap_or(&self.default_category).to_string(),
        }
    }
}

/// A slug must name a file directly inside the content directory
fn validate_slug(slug: &str) -> Result<(), Error> {
    let invalid = slug.trim().is_empty()
        || slug.contains(['/', '\\', '\0'])
        || slug.contains("..");
    if invalid {
        return Err(Error::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
