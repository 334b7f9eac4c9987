use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all registry operations.
///
/// Each variant names the registry backend (`backend`) that produced it so
/// failures stay attributable once they are bubbled up through a batch.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RegistryError {
    /// Builder parameters could not be interpreted by the backend.
    #[error("[{backend}] Invalid builder parameters: {detail}")]
    InvalidParams {
        /// Backend that rejected the parameters.
        backend: String,
        /// What is wrong with them.
        detail: String,
    },

    /// No record matching the requested identity exists.
    #[error("[{backend}] Record '{name}' not found")]
    RecordNotFound {
        /// Backend that produced the error.
        backend: String,
        /// Canonical name of the record that was looked up.
        name: String,
    },

    /// The backing store could not be read or written.
    #[error("[{backend}] Storage error: {detail}")]
    StorageError {
        /// Backend that produced the error.
        backend: String,
        /// Error details.
        detail: String,
    },

    /// Stored data could not be (de)serialized.
    #[error("[{backend}] Serialization error: {detail}")]
    SerializationError {
        /// Backend that produced the error.
        backend: String,
        /// Details about the failure.
        detail: String,
    },

    /// Catch-all for backend-specific failures.
    #[error("[{backend}] {message}")]
    Backend {
        /// Backend that produced the error.
        backend: String,
        /// Raw message from the backend.
        message: String,
    },
}

impl RegistryError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidParams { .. } | Self::RecordNotFound { .. }
        )
    }

    /// Backend identifier carried by every variant.
    pub fn backend(&self) -> &str {
        match self {
            Self::InvalidParams { backend, .. }
            | Self::RecordNotFound { backend, .. }
            | Self::StorageError { backend, .. }
            | Self::SerializationError { backend, .. }
            | Self::Backend { backend, .. } => backend,
        }
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
