//! Directory Statistics Demo
//! Run: ./target/release/demo_stats --locations data/locations.csv

use anyhow::{Context, Result};
use clap::Parser;
use directory_taxonomy::config::DEFAULT_LOCATIONS;
use directory_taxonomy::resolver::page_heading;
use directory_taxonomy::{Directory, SourceConfig, StateNode};

#[derive(Parser, Debug)]
#[command(name = "demo_stats")]
#[command(about = "Print taxonomy statistics for the directory sources")]
struct Args {
    #[arg(long, default_value = DEFAULT_LOCATIONS)]
    locations: std::path::PathBuf,

    #[arg(long)]
    categories: Option<std::path::PathBuf>,

    #[arg(long)]
    businesses: Option<std::path::PathBuf>,

    /// Number of states to list
    #[arg(long, default_value = "10")]
    top: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .init();

    let args = Args::parse();
    let config = SourceConfig::new(args.locations).with_optional(args.categories, args.businesses);
    let directory = Directory::load(&config).context("Failed to load directory sources")?;
    let taxonomy = &directory.taxonomy;

    println!("\n{}", "=".repeat(60));
    println!("         LOCAL DIRECTORY TAXONOMY STATISTICS");
    println!("{}\n", "=".repeat(60));

    println!("ENTITY COUNTS");
    println!("{}", "-".repeat(40));
    println!("  Jurisdictions: {:>10}", taxonomy.states().len());
    println!("  Cities:        {:>10}", taxonomy.city_count());
    println!("  Categories:    {:>10}", directory.categories.len());
    println!(
        "  Businesses:    {:>10}",
        taxonomy.states().values().map(|s| s.total_businesses).sum::<u64>()
    );
    println!("  Unmatched:     {:>10}", taxonomy.unmatched_businesses());
    println!("  Built at:      {}", taxonomy.built_at().format("%Y-%m-%d %H:%M:%S UTC"));

    let mut by_size: Vec<&StateNode> = taxonomy.states().values().collect();
    by_size.sort_by(|a, b| b.cities.len().cmp(&a.cities.len()).then_with(|| a.abbr.cmp(&b.abbr)));

    println!("\nCITIES PER JURISDICTION (top {})", args.top);
    println!("{}", "-".repeat(60));
    println!("  {:<4} {:<26} {:>8} {:>9} {:>8}", "Abbr", "Name", "Cities", "Business", "Rating");
    for state in by_size.iter().take(args.top) {
        println!(
            "  {:<4} {:<26} {:>8} {:>9} {:>8.2}",
            state.abbr,
            state.name,
            state.cities.len(),
            state.total_businesses,
            state.average_rating
        );
    }

    if !taxonomy.collisions().is_empty() {
        println!("\nSLUG COLLISIONS ({})", taxonomy.collisions().len());
        println!("{}", "-".repeat(60));
        for c in taxonomy.collisions() {
            println!(
                "  {}/{:<24} kept {:?}, merged {:?} (record {})",
                c.state_abbr.to_lowercase(),
                c.slug,
                c.kept_name,
                c.merged_name,
                c.record_id
            );
        }
    }

    let roots = directory.categories.roots();
    if !roots.is_empty() {
        println!("\nCATEGORIES");
        println!("{}", "-".repeat(60));
        for root in roots {
            println!("  {} ({})", root.name, root.slug);
            for child in directory.categories.children(&root.slug) {
                println!("    - {} ({})", child.name, child.slug);
            }
        }

        // Sample heading from the largest jurisdiction
        if let (Some(state), Some(category)) = (by_size.first(), directory.categories.sorted().first()) {
            let city = state.sorted_cities().first().map(|c| c.name.clone());
            println!(
                "\n  Sample heading: {}",
                page_heading(&category.name, &state.abbr, city.as_deref())?
            );
        }
    }

    println!();
    Ok(())
}
