//! In-memory registry backend
//!
//! Handles built from the same `namespace` share one record set for the
//! lifetime of the process, so consecutive batches observe each other's
//! writes.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::{RegistryError, Result};
use crate::traits::Registry;
use crate::types::{BuilderParams, Record};

pub(crate) const BUILDER_ID: &str = "memory";

const DEFAULT_NAMESPACE: &str = "default";

static NAMESPACES: LazyLock<Mutex<HashMap<String, Arc<MemoryRegistry>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

#[derive(Debug, Deserialize)]
struct MemoryParams {
    #[serde(default = "default_namespace")]
    namespace: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// In-memory record store
#[derive(Default)]
pub struct MemoryRegistry {
    records: RwLock<Vec<Record>>,
}

impl MemoryRegistry {
    /// Create a standalone, empty registry not attached to any namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the registry shared under `namespace`.
    pub fn shared(namespace: &str) -> Arc<Self> {
        let mut namespaces = NAMESPACES.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            namespaces
                .entry(namespace.to_string())
                .or_insert_with(|| Arc::new(Self::new())),
        )
    }

    /// Snapshot of every stored record, in insertion order.
    pub async fn records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    pub(crate) fn build(params: &BuilderParams) -> Result<Arc<dyn Registry>> {
        let params = if params.is_null() {
            MemoryParams {
                namespace: default_namespace(),
            }
        } else {
            MemoryParams::deserialize(params).map_err(|e| RegistryError::InvalidParams {
                backend: BUILDER_ID.to_string(),
                detail: e.to_string(),
            })?
        };
        log::debug!("Attaching memory registry namespace '{}'", params.namespace);
        Ok(Self::shared(&params.namespace))
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    fn id(&self) -> &'static str {
        BUILDER_ID
    }

    async fn append_record(&self, record: &Record) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn delete_record(&self, record: &Record) -> Result<()> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|r| r.same_identity(record)) else {
            return Err(RegistryError::RecordNotFound {
                backend: BUILDER_ID.to_string(),
                name: record.name.clone(),
            });
        };
        records.remove(index);
        Ok(())
    }

    async fn delete_all_records_with_name(&self, name: &str) -> Result<()> {
        self.records.write().await.retain(|r| r.name != name);
        Ok(())
    }

    async fn list_records_with_name(&self, name: &str) -> Result<Vec<Record>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.name == name)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordData;

    fn txt(name: &str, text: &str) -> Record {
        Record::new(
            name,
            RecordData::TXT {
                text: text.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn delete_all_only_touches_exact_name() {
        let registry = MemoryRegistry::new();
        registry.append_record(&txt("example.com", "a")).await.unwrap();
        registry.append_record(&txt("www.example.com", "b")).await.unwrap();
        registry.append_record(&txt("example.com", "c")).await.unwrap();

        registry
            .delete_all_records_with_name("example.com")
            .await
            .unwrap();

        let remaining = registry.records().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "www.example.com");
    }

    #[tokio::test]
    async fn delete_record_matches_identity() {
        let registry = MemoryRegistry::new();
        registry.append_record(&txt("example.com", "a")).await.unwrap();
        registry.append_record(&txt("example.com", "b")).await.unwrap();

        registry.delete_record(&txt("example.com", "b")).await.unwrap();

        let remaining = registry.list_records_with_name("example.com").await.unwrap();
        assert_eq!(remaining, vec![txt("example.com", "a")]);
    }

    #[tokio::test]
    async fn delete_missing_record_is_not_found() {
        let registry = MemoryRegistry::new();
        let err = registry
            .delete_record(&txt("example.com", "missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::RecordNotFound { .. }));
        assert!(err.is_expected());
    }

    #[tokio::test]
    async fn shared_namespace_is_reused() {
        let first = MemoryRegistry::build(&serde_json::json!({ "namespace": "memory-test-shared" }))
            .unwrap();
        first.append_record(&txt("example.org", "x")).await.unwrap();

        let second = MemoryRegistry::build(&serde_json::json!({ "namespace": "memory-test-shared" }))
            .unwrap();
        let records = second.list_records_with_name("example.org").await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn rejects_malformed_params() {
        let result = MemoryRegistry::build(&serde_json::json!({ "namespace": 42 }));
        assert!(matches!(result, Err(RegistryError::InvalidParams { .. })));
    }
}
