//! Registry catalog abstract Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::{CatalogConfig, RegistryDef};

/// Registry Catalog Trait
///
/// Resolves a registry name to the [`RegistryDef`] describing how to build it.
/// Provides a default memory implementation of `InMemoryRegistryCatalog`.
#[async_trait]
pub trait RegistryCatalog: Send + Sync {
    /// Get a registry definition by name
    ///
    /// # Returns
    /// * `Some(def)` - Registry is defined
    /// * `None` - Registry is unknown
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<RegistryDef>>;

    /// List all defined registry names
    async fn list_names(&self) -> CoreResult<Vec<String>>;
}

/// In-memory registry catalog
///
/// Default implementation, available on all platforms.
#[derive(Clone, Default)]
pub struct InMemoryRegistryCatalog {
    definitions: Arc<RwLock<HashMap<String, RegistryDef>>>,
}

impl InMemoryRegistryCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding every registry of `config`
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        let definitions = config
            .registries
            .iter()
            .map(|(name, def)| (name.clone(), def.clone()))
            .collect();
        Self {
            definitions: Arc::new(RwLock::new(definitions)),
        }
    }

    /// Define (or redefine) a registry
    pub async fn insert(&self, name: impl Into<String>, def: RegistryDef) {
        self.definitions.write().await.insert(name.into(), def);
    }

    /// Remove a registry definition
    pub async fn remove(&self, name: &str) {
        self.definitions.write().await.remove(name);
    }
}

#[async_trait]
impl RegistryCatalog for InMemoryRegistryCatalog {
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<RegistryDef>> {
        Ok(self.definitions.read().await.get(name).cloned())
    }

    async fn list_names(&self) -> CoreResult<Vec<String>> {
        let mut names: Vec<String> = self.definitions.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
