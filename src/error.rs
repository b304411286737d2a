//! Error types and handling for the substation search CLI

use crate::catalog::CatalogError;
use serde::Serialize;
use std::fmt;

/// Application error types
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    InvalidCatalog(String),
    NotFound(String),
    Io(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::InvalidCatalog(msg) => write!(f, "Invalid catalog: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::InvalidCatalog(_) => "invalid_catalog",
            AppError::NotFound(_) => "not_found",
            AppError::Io(_) => "io_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code for CLI mode
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 2,
            AppError::InvalidCatalog(_) => 3,
            AppError::NotFound(_) => 4,
            AppError::Io(_) => 5,
            AppError::Internal(_) => 1,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert CatalogError to AppError
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                AppError::NotFound(e.to_string())
            }
            CatalogError::Io(e) => AppError::Io(e.to_string()),
            other => AppError::InvalidCatalog(other.to_string()),
        }
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert std::io::Error to AppError
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Validate a result limit
pub fn validate_limit(limit: usize) -> Result<usize, AppError> {
    if limit == 0 {
        return Err(AppError::InvalidInput(
            "Limit must be at least 1".to_string(),
        ));
    }
    Ok(limit)
}
