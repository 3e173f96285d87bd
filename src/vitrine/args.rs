use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(version = VERSION)]
#[command(about = "Faceted catalog browsing from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the catalog JSON file
    #[arg(short, long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the catalog with filters applied
    #[command(alias = "b")]
    Browse(BrowseArgs),

    /// Show the facet catalog for a scope
    Facets {
        /// Restrict to a category
        #[arg(long)]
        category: Option<String>,

        /// Restrict to a subcategory
        #[arg(long)]
        subcategory: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., page-size, debounce-ms, visible-options)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Restrict to a category
    #[arg(long)]
    pub category: Option<String>,

    /// Restrict to a subcategory
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Free-text search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Sort order: featured, price-asc, price-desc, rating, newest
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Page to show (1-based)
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Filter by color (repeatable)
    #[arg(long)]
    pub color: Vec<String>,

    /// Filter by brand (repeatable)
    #[arg(long)]
    pub brand: Vec<String>,

    /// Filter by storage variant (repeatable)
    #[arg(long)]
    pub storage: Vec<String>,

    /// Minimum star rating (repeatable; the lowest wins)
    #[arg(long)]
    pub rating: Vec<String>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Exclude out-of-stock items
    #[arg(long)]
    pub in_stock: bool,

    /// Dynamic attribute filter as key=value (repeatable)
    #[arg(long = "attr")]
    pub attrs: Vec<String>,

    /// A shared filter query string (e.g. "color=Red&maxPrice=1000")
    #[arg(long)]
    pub params: Option<String>,
}
