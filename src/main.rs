//! Build the directory taxonomy from raw CSV tables
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --locations <PATH>   Location table (default: data/locations.csv)
//!   --categories <PATH>  Category table (optional)
//!   --businesses <PATH>  Business table feeding aggregates (optional)
//!   --json <PATH>        Write the taxonomy as JSON
//!   --paths              Print every canonical location path
//!   --category <SLUG>    With --paths, print category page routes instead
//!
//! A bad jurisdiction anywhere in the location table aborts before anything is written.

use anyhow::{bail, Context, Result};
use clap::Parser;
use directory_taxonomy::resolver::category_location_path;
use directory_taxonomy::config::DEFAULT_LOCATIONS;
use directory_taxonomy::{Directory, SourceConfig};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "directory_taxonomy")]
#[command(about = "Build the state/city taxonomy from raw location and category tables")]
struct Args {
    /// Location table
    #[arg(long, default_value = DEFAULT_LOCATIONS)]
    locations: PathBuf,

    /// Category table
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Business table used for counts and ratings
    #[arg(long)]
    businesses: Option<PathBuf>,

    /// Write the taxonomy as pretty-printed JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print every canonical location path
    #[arg(long)]
    paths: bool,

    /// Category slug to prefix printed paths with
    #[arg(long, requires = "paths")]
    category: Option<String>,
}

impl Args {
    fn source_config(&self) -> SourceConfig {
        SourceConfig::new(&self.locations)
            .with_optional(self.categories.clone(), self.businesses.clone())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();
    let config = args.source_config();

    let directory = Directory::load(&config).context("Failed to build directory")?;
    let taxonomy = &directory.taxonomy;

    info!(
        "Taxonomy ready: {} states, {} cities, {} categories",
        taxonomy.states().len(),
        taxonomy.city_count(),
        directory.categories.len()
    );
    if !taxonomy.collisions().is_empty() {
        info!("{} slug collisions merged", taxonomy.collisions().len());
    }

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, taxonomy)?;
        writer.flush()?;
        info!("Wrote taxonomy to {:?}", path);
    }

    if args.paths {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match &args.category {
            Some(slug) => {
                if !directory.categories.is_empty() && directory.categories.get(slug).is_none() {
                    bail!("Unknown category: {}", slug);
                }
                for state in taxonomy.sorted_states() {
                    writeln!(out, "{}", category_location_path(slug, &state.abbr, None)?)?;
                    for city in state.sorted_cities() {
                        let path = category_location_path(slug, &state.abbr, Some(&city.slug))?;
                        writeln!(out, "{}", path)?;
                    }
                }
            }
            None => {
                for path in taxonomy.location_paths() {
                    writeln!(out, "{}", path)?;
                }
            }
        }
    }

    Ok(())
}
