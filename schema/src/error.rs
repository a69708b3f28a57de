//! Crate error type
//!
//! Only run-level failures live here. Per-entry problems (unmappable shapes,
//! failed probes, unreadable descriptors) are classification outcomes and never
//! surface as an `Error`.

use std::path::Path;

use error_stack::Report;
use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";

/// Result type for the `component_schema` library
pub type Result<T> = std::result::Result<T, Report<Error>>;

/// Run-level error categories
#[derive(Error)]
pub enum Error {
    /// Reading or publishing a file failed
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// The registry dump could not be understood at all
    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),

    /// Producing the JSON output failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileOperation(s) => f.debug_tuple("FileOperation").field(s).finish(),
            Self::InvalidRegistry(s) => f.debug_tuple("InvalidRegistry").field(s).finish(),
            Self::Serialization(s) => f.debug_tuple("Serialization").field(s).finish(),
        }
    }
}

impl Error {
    /// Create an "Invalid X" registry error
    pub fn invalid_registry(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidRegistry(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create error for IO operations
    pub fn io_failed(operation: &str, path: &Path, error: impl std::fmt::Display) -> Self {
        Self::FileOperation(format!(
            "{MSG_FAILED_TO_PREFIX} {operation} {}: {error}",
            path.display()
        ))
    }

    /// Create error for serialization of a named output
    pub fn serialization_failed(what: &str, error: impl std::fmt::Display) -> Self {
        Self::Serialization(format!("{MSG_FAILED_TO_PREFIX} serialize {what}: {error}"))
    }
}
