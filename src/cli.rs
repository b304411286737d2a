//! CLI mode implementation
//!
//! Provides the command-line interface for searching a substation catalog

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Substation component search CLI
#[derive(Parser, Debug)]
#[command(name = "substation-search")]
#[command(about = "Fuzzy search over substation components", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank catalog components against a query
    Search(SearchArgs),
    /// Print every component in the catalog
    List(ListArgs),
    /// Read one query per line from stdin and print results for each
    Interactive(InteractiveArgs),
    /// Print the JSON Schema of the catalog file format
    Schema,
}

/// Output rendering
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Catalog selection shared by every command
#[derive(Args, Clone, Debug, Default)]
pub struct CatalogArgs {
    /// JSON catalog file (defaults to the built-in substation catalog)
    #[arg(short = 'c', long, env = "SUBSTATION_CATALOG")]
    pub catalog: Option<PathBuf>,
}

/// Search command arguments
#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Search terms (case-insensitive, typo-tolerant)
    #[arg(short = 'q', long)]
    pub query: String,

    /// Maximum number of results (default 8)
    #[arg(short = 'l', long, env = "SUBSTATION_SEARCH_LIMIT")]
    pub limit: Option<usize>,

    /// Show match scores
    #[arg(long)]
    pub scores: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// List command arguments
#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Interactive command arguments
#[derive(Args, Clone, Debug)]
pub struct InteractiveArgs {
    /// Maximum number of results per query (default 8)
    #[arg(short = 'l', long, env = "SUBSTATION_SEARCH_LIMIT")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}
