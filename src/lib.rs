//! cheatsheet-rs: renders a folder of markdown cheatsheets into a website
//!
//! Cheatsheets are `<slug>.md` files with a small YAML header. They can be
//! listed, searched, rendered to HTML, written out as a static site or
//! served directly over HTTP.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod query;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

pub use error::Error;

/// The main application
#[derive(Clone)]
pub struct Cheatsheets {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the `.md` cheatsheets
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Cheatsheets {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        })
    }

    /// A content loader configured from the site config
    pub fn loader(&self) -> content::ContentLoader {
        content::ContentLoader::new(self)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
