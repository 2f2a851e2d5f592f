//! ersatz CLI: substitute product recommendations from a JSON catalog.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use ersatz::graph::{build, BuildReport, NodeKey};
use ersatz::record::ProductRecord;
use ersatz::recommend::{fulfill, Fulfillment, Request};

#[derive(Parser)]
#[command(name = "ersatz", version, about = "Substitute product recommender")]
struct Cli {
    /// Path to a JSON array of product records.
    #[arg(long, global = true, default_value = "data/products.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend in-stock substitutes for a product.
    Recommend {
        /// Requested product id.
        #[arg(long)]
        product: String,

        /// Price ceiling for substitutes.
        #[arg(long)]
        max_price: f64,

        /// Tags every substitute must carry, separated by ';'.
        #[arg(long, default_value = "")]
        required_tags: String,

        /// Preferred brand (advisory, never filters).
        #[arg(long)]
        preferred_brand: Option<String>,

        /// BFS depth bound.
        #[arg(long, default_value = "2")]
        max_hops: usize,

        /// Number of substitutes to return.
        #[arg(long, default_value = "3")]
        top_n: usize,

        /// Emit results as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show a product's attributes and its direct graph neighbors.
    Show {
        /// Product id.
        #[arg(long)]
        product: String,
    },

    /// Show catalog and graph statistics.
    Info,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let BuildReport { graph, rejected } = load_catalog(&cli.file)?;

    match cli.command {
        Commands::Recommend {
            product,
            max_price,
            required_tags,
            preferred_brand,
            max_hops,
            top_n,
            json,
        } => {
            let mut request = Request::new(product, max_price)
                .with_required_tags(split_tags(&required_tags))
                .with_max_hops(max_hops)
                .with_top_n(top_n);
            if let Some(brand) = preferred_brand {
                request = request.with_preferred_brand(brand);
            }

            let outcome = fulfill(&graph, &request).into_diagnostic()?;

            if json {
                let out = serde_json::to_string_pretty(&outcome).into_diagnostic()?;
                println!("{out}");
                return Ok(());
            }

            match outcome {
                Fulfillment::InStock(product) => {
                    println!("\"{}\" is in stock — no substitute needed.", product.id);
                    println!("  brand:    {}", product.brand);
                    println!("  category: {}", product.category);
                    println!("  price:    {}", product.price);
                }
                Fulfillment::Substitutes(results) if results.is_empty() => {
                    println!("No suitable substitutes found with the given constraints.");
                }
                Fulfillment::Substitutes(results) => {
                    println!("Substitutes ({}):", results.len());
                    for (i, rec) in results.iter().enumerate() {
                        let why: Vec<String> =
                            rec.explanations.iter().map(|e| e.to_string()).collect();
                        println!(
                            "  {}. \"{}\" ({}, {}) price {} — score {} [{}]",
                            i + 1,
                            rec.product.id,
                            rec.product.brand,
                            rec.product.category,
                            rec.product.price,
                            rec.score,
                            why.join(", ")
                        );
                    }
                }
            }
        }

        Commands::Show { product } => {
            let key = NodeKey::product(&product);
            let attrs = graph.get_product(&product).ok_or_else(|| {
                miette::miette!("product {product:?} not found in {}", cli.file.display())
            })?;
            println!("Product: \"{}\"", attrs.id);
            println!("  brand:    {}", attrs.brand);
            println!("  category: {}", attrs.category);
            println!("  price:    {}", attrs.price);
            println!("  in stock: {}", attrs.in_stock);
            let tags: Vec<&str> = attrs.tags.iter().map(String::as_str).collect();
            println!("  tags:     {}", tags.join(", "));

            let neighbors = graph.neighbors(&key).into_diagnostic()?;
            println!("  neighbors ({}):", neighbors.len());
            for neighbor in &neighbors {
                println!("    {neighbor}");
            }
        }

        Commands::Info => {
            println!("Catalog: {}", cli.file.display());
            println!("  products: {}", graph.product_count());
            println!("  nodes:    {}", graph.node_count());
            println!("  edges:    {}", graph.edge_count());
            println!("  rejected: {}", rejected.len());
        }
    }

    Ok(())
}

/// Load and build the catalog, keeping the rejected-record report.
fn load_catalog(path: &Path) -> Result<BuildReport> {
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    let records: Vec<ProductRecord> = serde_json::from_str(&content).into_diagnostic()?;
    Ok(build(records))
}

/// Split a raw `;`-delimited tags field into tokens.
///
/// Delimiter handling lives here, in the collaborator, so the core only ever
/// sees already-split tag sets.
fn split_tags(raw: &str) -> BTreeSet<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
