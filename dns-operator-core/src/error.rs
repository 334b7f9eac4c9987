//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dns_operator_registry::RegistryError;

/// Registry mutation performed on behalf of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistryAction {
    /// `append_record`
    Append,
    /// `delete_record`
    Delete,
    /// `delete_all_records_with_name`
    DeleteAll,
}

impl std::fmt::Display for RegistryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Append => write!(f, "appending record"),
            Self::Delete => write!(f, "deleting record"),
            Self::DeleteAll => write!(f, "deleting all records with domain"),
        }
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A domain or subdomain label is not a valid internationalized name
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The role may not act on the name, or no registry serves it
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Registry name unknown to the catalog
    #[error("Registry not found: {0}")]
    RegistryNotFound(String),

    /// Builder identifier missing from the builder table
    #[error("Registry [{registry}] builder [{builder}] is not builtin")]
    UnsupportedBuilder { registry: String, builder: String },

    /// Builder failed to construct the registry
    #[error("Registry [{registry}] builder [{builder}] failed: {source}")]
    Builder {
        registry: String,
        builder: String,
        source: RegistryError,
    },

    /// A registry mutation failed at the backend
    #[error("{action} [{name}] on registry [{registry}] failed: {source}")]
    RegistryOperation {
        registry: String,
        action: RegistryAction,
        name: String,
        source: RegistryError,
    },

    /// Operation used before validation resolved its registry
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Catalog configuration is malformed or inconsistent
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidName { .. }
            | Self::Authorization(_)
            | Self::RegistryNotFound(_)
            | Self::UnsupportedBuilder { .. }
            | Self::ValidationError(_) => true,
            Self::Builder { source, .. } | Self::RegistryOperation { source, .. } => {
                source.is_expected()
            }
            Self::ConfigError(_) | Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
