// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gpk_appstream::{load_config, ComponentIndex, Config, SearchNamePolicy};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use tracing::info;

#[derive(Parser)]
#[command(name = "gpk-appstream")]
#[command(author, version, about = "Look up AppStream metadata by package name", long_about = None)]
struct Cli {
    /// Configuration file (default: /etc/gpk-appstream/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog directory to read instead of the configured sources (repeatable)
    #[arg(short, long = "source", global = true)]
    sources: Vec<PathBuf>,

    /// Report every package name of each search hit, not just the first
    #[arg(long, global = true)]
    all_names: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the AppStream component for one or more packages
    Lookup {
        /// Package names
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// List package names matching a free-text query
    Search {
        /// Search terms
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Show how many components and package names were indexed
    Stats,
}

/// Merge command-line overrides into the loaded configuration
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if !cli.sources.is_empty() {
        config.pool.sources = cli.sources.clone();
    }
    if cli.all_names {
        config.index.search_names = SearchNamePolicy::All;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = &cli.command else {
        println!("gpk-appstream v{}", env!("CARGO_PKG_VERSION"));
        println!("Run 'gpk-appstream --help' for usage information");
        return Ok(());
    };

    let config = build_config(&cli)?;
    let mut index = ComponentIndex::from_config(&config);
    let cancel_token = AtomicBool::new(false);
    index
        .load(Some(&cancel_token))
        .context("failed to load AppStream metadata")?;

    match command {
        Commands::Lookup { packages } => {
            for package in packages {
                match index.lookup(package) {
                    Some(component) => {
                        println!("{}", package);
                        println!("  ID: {}", component.id);
                        println!("  Type: {}", component.kind);
                        println!("  Name: {}", component.display_name());
                        if let Some(summary) = &component.summary {
                            println!("  Summary: {}", summary);
                        }
                        if let Some(origin) = &component.origin {
                            println!("  Origin: {}", origin);
                        }
                        if let Some(homepage) = &component.url_homepage {
                            println!("  Homepage: {}", homepage);
                        }
                    }
                    None => println!("{}: not found", package),
                }
            }
        }
        Commands::Search { terms } => {
            let query = terms.join(" ");
            info!("Searching AppStream metadata for '{}'", query);
            for name in index.search_package_names(&query) {
                println!("{}", name);
            }
        }
        Commands::Stats => {
            println!("Components: {}", index.component_count());
            println!("Package names: {}", index.package_count());
            println!("Catalogs: {}", index.pool().catalogs_read());
        }
    }

    Ok(())
}
