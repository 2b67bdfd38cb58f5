//! In-memory render cache
//!
//! Keeps rendered cheatsheets keyed by slug. An entry is reused only while the
//! hash of the raw source file is unchanged, so edits on disk show up on the
//! next load without any explicit invalidation. Entries for deleted files are
//! dropped whenever the directory is listed.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::content::Cheatsheet;

/// A rendered cheatsheet and the hash of the source it came from
#[derive(Debug, Clone)]
struct CacheEntry {
    content_hash: u64,
    document: Cheatsheet,
}

/// Rendered documents shared between concurrent loads
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached document for `slug` if `raw` is unchanged,
    /// otherwise render it and replace the entry
    ///
    /// A poisoned lock only disables caching; the document is still rendered.
    pub fn get_or_render<F>(&self, slug: &str, raw: &str, render: F) -> Cheatsheet
    where
        F: FnOnce() -> Cheatsheet,
    {
        let content_hash = hash_content(raw);

        if let Ok(entries) = self.entries.read() {
            if let Some(entry) = entries.get(slug) {
                if entry.content_hash == content_hash {
                    tracing::debug!("Render cache hit: {}", slug);
                    return entry.document.clone();
                }
            }
        }

        tracing::debug!("Render cache miss: {}", slug);
        let document = render();
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                slug.to_string(),
                CacheEntry {
                    content_hash,
                    document: document.clone(),
                },
            );
        }
        document
    }

    /// Keep only the entries for `slugs`
    pub fn retain<'a>(&self, slugs: impl IntoIterator<Item = &'a str>) {
        let keep: HashSet<&str> = slugs.into_iter().collect();
        if let Ok(mut entries) = self.entries.write() {
            let before = entries.len();
            entries.retain(|slug, _| keep.contains(slug.as_str()));
            if entries.len() < before {
                tracing::debug!("Dropped {} stale cache entries", before - entries.len());
            }
        }
    }
}

/// Calculate a hash for file content
pub fn hash_content(content: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap as Map;
    use std::path::PathBuf;

    fn document(slug: &str, html: &str) -> Cheatsheet {
        Cheatsheet {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: "Cheatsheet".to_string(),
            category: "Programming Language".to_string(),
            content: String::new(),
            content_html: html.to_string(),
            source: PathBuf::from(format!("{}.md", slug)),
            extra: Map::new(),
        }
    }

    fn cached_slugs(cache: &RenderCache) -> Vec<String> {
        let mut slugs: Vec<_> = cache.entries.read().unwrap().keys().cloned().collect();
        slugs.sort();
        slugs
    }

    #[test]
    fn test_hash_content_is_stable() {
        assert_eq!(hash_content("abc"), hash_content("abc"));
        assert_ne!(hash_content("abc"), hash_content("abd"));
    }

    #[test]
    fn test_reuses_entry_until_source_changes() {
        let cache = RenderCache::new();
        let renders = Cell::new(0);
        let render = |html: &str| {
            renders.set(renders.get() + 1);
            document("rust", html)
        };

        let first = cache.get_or_render("rust", "v1", || render("one"));
        let second = cache.get_or_render("rust", "v1", || render("two"));
        assert_eq!(first.content_html, "one");
        assert_eq!(second.content_html, "one");
        assert_eq!(renders.get(), 1);

        let third = cache.get_or_render("rust", "v2", || render("three"));
        assert_eq!(third.content_html, "three");
        assert_eq!(renders.get(), 2);
        assert_eq!(cached_slugs(&cache), vec!["rust"]);
    }

    #[test]
    fn test_entries_are_per_slug() {
        let cache = RenderCache::new();
        cache.get_or_render("a", "same", || document("a", "A"));
        let b = cache.get_or_render("b", "same", || document("b", "B"));
        assert_eq!(b.content_html, "B");
        assert_eq!(cached_slugs(&cache), vec!["a", "b"]);
    }

    #[test]
    fn test_retain_drops_unlisted_slugs() {
        let cache = RenderCache::new();
        cache.get_or_render("a", "x", || document("a", "A"));
        cache.get_or_render("b", "x", || document("b", "B"));

        cache.retain(["b", "missing"]);
        assert_eq!(cached_slugs(&cache), vec!["b"]);

        let a = cache.get_or_render("a", "x", || document("a", "A2"));
        assert_eq!(a.content_html, "A2");

        cache.retain(Vec::<&str>::new());
        assert!(cached_slugs(&cache).is_empty());
    }
}
