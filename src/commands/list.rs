//! List cheatsheets and categories

use anyhow::Result;

use crate::content::CheatsheetSummary;
use crate::query::{categories, ListingQuery};
use crate::Cheatsheets;

/// Print the listing, filtered by `query`
pub fn run(app: &Cheatsheets, query: &ListingQuery) -> Result<()> {
    let listing = app.loader().list_documents();
    let matches = query.filter(&listing);

    println!("Cheatsheets ({}):", matches.len());
    for summary in matches {
        println!("{}", format_entry(summary));
    }

    Ok(())
}

/// Print every category, starting with `All`
pub fn run_categories(app: &Cheatsheets) -> Result<()> {
    let listing = app.loader().list_documents();
    let categories = categories(&listing);

    println!("Categories ({}):", categories.len());
    for category in categories {
        println!("  {}", category);
    }

    Ok(())
}

fn format_entry(summary: &CheatsheetSummary) -> String {
    format!(
        "  {} - {} [{}] ({})",
        summary.slug, summary.title, summary.category, summary.description
    )
}
