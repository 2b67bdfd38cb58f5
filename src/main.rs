//! CLI entry point for cheatsheet-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cheatsheet_rs::query::ListingQuery;

#[derive(Parser)]
#[command(name = "cheatsheet-rs")]
#[command(version)]
#[command(about = "Render a folder of markdown cheatsheets into a website", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cheatsheets
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text matched against title and description
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this category ("All" shows every category)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// List categories
    Categories,

    /// Print the rendered HTML of one cheatsheet
    Show {
        /// File name of the cheatsheet without `.md`
        slug: String,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "cheatsheet_rs=debug,info"
    } else {
        "cheatsheet_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { search, category } => {
            let app = cheatsheet_rs::Cheatsheets::new(&base_dir)?;
            let query = ListingQuery::new(search.unwrap_or_default(), category);
            cheatsheet_rs::commands::list::run(&app, &query)?;
        }

        Commands::Categories => {
            let app = cheatsheet_rs::Cheatsheets::new(&base_dir)?;
            cheatsheet_rs::commands::list::run_categories(&app)?;
        }

        Commands::Show { slug } => {
            let app = cheatsheet_rs::Cheatsheets::new(&base_dir)?;
            cheatsheet_rs::commands::show::run(&app, &slug)?;
        }

        Commands::Generate => {
            let app = cheatsheet_rs::Cheatsheets::new(&base_dir)?;
            tracing::info!("Generating static files from {:?}", app.content_dir);
            app.generate()?;
        }

        Commands::Server { port, ip, open } => {
            let app = cheatsheet_rs::Cheatsheets::new(&base_dir)?;
            cheatsheet_rs::server::start(&app, &ip, port, open).await?;
        }

        Commands::Clean => {
            let app = cheatsheet_rs::Cheatsheets::new(&base_dir)?;
            app.clean()?;
            tracing::info!("Cleaned public folder");
        }

        Commands::Version => {
            println!("cheatsheet-rs {}", env!("CARGO_PKG_VERSION"));
            println!("A static site generator for markdown cheatsheets");
        }
    }

    Ok(())
}
