//! substation-search CLI
//!
//! Commands:
//! - `search` - rank catalog components against a query
//! - `list` - print the catalog
//! - `interactive` - answer one query per stdin line
//! - `schema` - print the catalog file JSON Schema

use anyhow::Result;
use clap::Parser;
use substation_search::cli::Cli;
use substation_search::tools;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags; RUST_LOG takes precedence
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let Some(command) = cli.command else {
        eprintln!("Error: No command specified. Use --help for usage information.");
        std::process::exit(1);
    };

    match tools::execute(command).await {
        Ok(output) => tools::write_output(std::io::stdout().lock(), &output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
