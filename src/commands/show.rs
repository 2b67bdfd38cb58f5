//! Print one rendered cheatsheet

use anyhow::Result;

use crate::Cheatsheets;

/// Print the rendered HTML body for `slug`
pub fn run(app: &Cheatsheets, slug: &str) -> Result<()> {
    let Some(sheet) = app.loader().load_document(slug) else {
        anyhow::bail!("Cheatsheet not found: {}", slug);
    };

    tracing::debug!("Rendered {} from {:?}", sheet.slug, sheet.source);
    println!("{}", sheet.content_html);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_slug_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let app = Cheatsheets::new(tmp.path()).unwrap();
        let err = run(&app, "does-not-exist").unwrap_err();
        assert_eq!(err.to_string(), "Cheatsheet not found: does-not-exist");
    }
}
