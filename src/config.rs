//! Catalog and limit resolution
//!
//! Catalog path precedence: `--catalog` / `SUBSTATION_CATALOG` (both handled
//! by clap), then `<config_dir>/substation-search/catalog.json` when it
//! exists, then the built-in substation catalog.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::catalog::{load_catalog, substation_catalog};
use crate::cli::CatalogArgs;
use crate::error::{validate_limit, AppError};
use crate::search::{SearchIndex, DEFAULT_LIMIT};

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    BuiltIn,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog: CatalogSource,
    pub limit: usize,
}

/// Path of the per-user catalog file
pub fn default_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("substation-search").join("catalog.json"))
}

impl Config {
    /// Resolve from command-line arguments and the user config directory
    pub fn resolve(catalog: &CatalogArgs, limit: Option<usize>) -> Result<Self, AppError> {
        Self::resolve_with_default(catalog, limit, default_catalog_path())
    }

    /// Resolve with an explicit fallback catalog path
    pub fn resolve_with_default(
        catalog: &CatalogArgs,
        limit: Option<usize>,
        default_path: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        let limit = validate_limit(limit.unwrap_or(DEFAULT_LIMIT))?;

        let catalog = match (&catalog.catalog, default_path) {
            (Some(path), _) => CatalogSource::File(path.clone()),
            (None, Some(path)) if path.is_file() => CatalogSource::File(path),
            _ => CatalogSource::BuiltIn,
        };

        debug!("Resolved config: catalog={:?}, limit={}", catalog, limit);
        Ok(Self { catalog, limit })
    }

    /// Load the catalog and build its search index
    pub fn load_index(&self) -> Result<SearchIndex, AppError> {
        let entities = match &self.catalog {
            CatalogSource::File(path) => {
                info!("Loading catalog from {}", path.display());
                load_catalog(path)?
            }
            CatalogSource::BuiltIn => substation_catalog(),
        };

        Ok(SearchIndex::build(entities)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn no_flag() -> CatalogArgs {
        CatalogArgs { catalog: None }
    }

    #[test]
    fn test_builtin_when_nothing_configured() {
        let config = Config::resolve_with_default(&no_flag(), None, None).unwrap();
        assert_eq!(config.catalog, CatalogSource::BuiltIn);
        assert_eq!(config.limit, DEFAULT_LIMIT);
        assert_eq!(config.load_index().unwrap().len(), 85);
    }

    #[test]
    fn test_missing_default_path_falls_back() {
        let dir = TempDir::new().unwrap();
        let config =
            Config::resolve_with_default(&no_flag(), Some(3), Some(dir.path().join("catalog.json")))
                .unwrap();
        assert_eq!(config.catalog, CatalogSource::BuiltIn);
        assert_eq!(config.limit, 3);
    }

    #[test]
    fn test_default_path_used_when_present() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"id":"ISO-1","name":"Line Isolator","type":"isolator"}]"#).unwrap();

        let config = Config::resolve_with_default(&no_flag(), None, Some(path.clone())).unwrap();
        assert_eq!(config.catalog, CatalogSource::File(path));
        assert_eq!(config.load_index().unwrap().len(), 1);
    }

    #[test]
    fn test_flag_wins() {
        let dir = TempDir::new().unwrap();
        let flag = CatalogArgs {
            catalog: Some(dir.path().join("explicit.json")),
        };
        let config =
            Config::resolve_with_default(&flag, None, Some(dir.path().join("default.json"))).unwrap();
        assert_eq!(
            config.catalog,
            CatalogSource::File(dir.path().join("explicit.json"))
        );

        // The flag is honoured even when the file is missing
        let err = config.load_index().unwrap_err();
        assert_eq!(err.error_code(), "not_found");
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = Config::resolve_with_default(&no_flag(), Some(0), None).unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
    }

    #[test]
    fn test_duplicate_ids_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(
            &path,
            r#"[
                {"id":"T-1","name":"Transformer A","type":"transformer"},
                {"id":"T-1","name":"Transformer B","type":"transformer"}
            ]"#,
        )
        .unwrap();

        let config = Config::resolve_with_default(
            &CatalogArgs {
                catalog: Some(path),
            },
            None,
            None,
        )
        .unwrap();
        let err = config.load_index().unwrap_err();
        assert_eq!(err.error_code(), "invalid_catalog");
    }
}
