//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Cheatsheets;

/// Generate the static site
pub fn run(app: &Cheatsheets) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(app)?;
    let pages = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} cheatsheet pages in {:.2}s",
        pages,
        duration.as_secs_f64()
    );

    Ok(())
}
