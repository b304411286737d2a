//! Catalog tools: `list` and `schema`

use crate::catalog::{catalog_schema, Entity};
use crate::cli::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::AppError;

/// Markdown table of the catalog in insertion order
pub fn format_catalog(entities: &[Entity]) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Catalog · {} components\n\n", entities.len()));
    md.push_str("| ID | Name | Type |\n");
    md.push_str("|----|------|------|\n");

    for entity in entities {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            entity.id, entity.name, entity.kind
        ));
    }

    md
}

/// Shared implementation for the list command
pub fn execute_list(args: ListArgs) -> Result<String, AppError> {
    let config = Config::resolve(&args.catalog, None)?;
    let index = config.load_index()?;

    match args.format {
        OutputFormat::Markdown => Ok(format_catalog(index.entities())),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(index.entities())?),
    }
}

/// Shared implementation for the schema command
pub fn execute_schema() -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&catalog_schema()?)?)
}
