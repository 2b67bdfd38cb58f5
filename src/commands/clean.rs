//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Cheatsheets;

/// Remove the generated site
pub fn run(app: &Cheatsheets) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", app.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let tmp = TempDir::new().unwrap();
        let app = Cheatsheets::new(tmp.path()).unwrap();
        fs::create_dir_all(app.public_dir.join("cheatsheet/rust")).unwrap();
        fs::write(app.public_dir.join("index.html"), "x").unwrap();

        run(&app).unwrap();
        assert!(!app.public_dir.exists());

        // Cleaning twice is fine
        run(&app).unwrap();
    }
}
