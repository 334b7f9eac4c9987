//! Record operation type definitions

use serde::{Deserialize, Serialize};

use crate::error::RegistryAction;
use crate::types::{Record, RecordData};

/// What an operation does to its canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Replace every record under the name with the operation's record
    Update,
    /// Delete the operation's record
    Delete,
}

/// A single requested record mutation.
///
/// Callers fill in `kind`, `domain`, `subdomain` and `record`. Validation
/// rewrites `domain` / `subdomain` to their ASCII forms, stores the
/// canonical name on `record.name` and sets `registry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "op")]
    pub kind: OperationKind,
    pub domain: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(flatten)]
    pub record: Record,
    /// Target registry, resolved during validation
    #[serde(skip)]
    pub registry: Option<String>,
}

impl Operation {
    pub fn new(
        kind: OperationKind,
        domain: impl Into<String>,
        subdomain: impl Into<String>,
        data: RecordData,
    ) -> Self {
        Self {
            kind,
            domain: domain.into(),
            subdomain: subdomain.into(),
            record: Record::new(String::new(), data),
            registry: None,
        }
    }

    pub fn update(domain: impl Into<String>, subdomain: impl Into<String>, data: RecordData) -> Self {
        Self::new(OperationKind::Update, domain, subdomain, data)
    }

    pub fn delete(domain: impl Into<String>, subdomain: impl Into<String>, data: RecordData) -> Self {
        Self::new(OperationKind::Delete, domain, subdomain, data)
    }

    /// Set the record TTL.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.record.ttl = ttl;
        self
    }

    /// Canonical name, empty until validated.
    pub fn canonical_name(&self) -> &str {
        &self.record.name
    }
}

/// Aggregate outcome of one batch execution
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchExecutionResult {
    /// Append/delete dispatches that succeeded
    pub success_count: usize,
    /// Number of reported failures
    pub failed_count: usize,
    /// Every failure reported through the callback, delete-all failures included
    pub failures: Vec<BatchOperationFailure>,
}

/// One failed registry call within a batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOperationFailure {
    /// Position of the operation in the submitted batch
    pub index: usize,
    pub canonical_name: String,
    pub registry: String,
    pub action: RegistryAction,
    /// Failure reason
    pub reason: String,
}
