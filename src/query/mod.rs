//! Listing search and category filter

use serde::{Deserialize, Serialize};

use crate::content::CheatsheetSummary;

/// Category value that disables the category filter
pub const ALL_CATEGORIES: &str = "All";

/// Search text plus category filter over the listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Case-insensitive substring of title or description
    #[serde(default, alias = "q")]
    pub search: String,

    /// Exact category, `None` or `"All"` for every category
    #[serde(default)]
    pub category: Option<String>,
}

impl ListingQuery {
    pub fn new(search: impl Into<String>, category: Option<String>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Whether one listing entry passes both filters
    pub fn matches(&self, summary: &CheatsheetSummary) -> bool {
        self.matches_search(summary) && self.matches_category(summary)
    }

    /// Entries passing both filters, in listing order
    pub fn filter<'a>(&self, listing: &'a [CheatsheetSummary]) -> Vec<&'a CheatsheetSummary> {
        listing.iter().filter(|s| self.matches(s)).collect()
    }

    fn matches_search(&self, summary: &CheatsheetSummary) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || summary.title.to_lowercase().contains(&needle)
            || summary.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, summary: &CheatsheetSummary) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) | Some("") => true,
            Some(category) => summary.category == category,
        }
    }
}

/// `"All"` followed by every distinct category, sorted
pub fn categories(listing: &[CheatsheetSummary]) -> Vec<String> {
    let mut distinct: Vec<String> = listing.iter().map(|s| s.category.clone()).collect();
    distinct.sort();
    distinct.dedup();

    let mut categories = Vec::with_capacity(distinct.len() + 1);
    categories.push(ALL_CATEGORIES.to_string());
    categories.extend(distinct);
    categories
}
