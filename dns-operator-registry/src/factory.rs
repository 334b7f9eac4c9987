//! Registry builder table.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::error::Result;
use crate::traits::Registry;
use crate::types::BuilderParams;

#[cfg(feature = "json-file")]
use crate::backends::{JsonFileRegistry, json_file};
#[cfg(feature = "memory")]
use crate::backends::{MemoryRegistry, memory};

/// Factory turning builder parameters into a live [`Registry`] handle.
pub type RegistryBuilder =
    Box<dyn Fn(&BuilderParams) -> Result<Arc<dyn Registry>> + Send + Sync>;

static BUILTIN: LazyLock<Arc<BuilderTable>> = LazyLock::new(|| {
    let entries: Vec<(&str, RegistryBuilder)> = vec![
        #[cfg(feature = "memory")]
        (memory::BUILDER_ID, Box::new(MemoryRegistry::build)),
        #[cfg(feature = "json-file")]
        (json_file::BUILDER_ID, Box::new(JsonFileRegistry::build)),
    ];
    Arc::new(entries.into_iter().collect())
});

/// Mapping from builder identifier to [`RegistryBuilder`].
///
/// A table is immutable once constructed. [`BuilderTable::builtin()`] is
/// populated on first access with every backend enabled via feature flags;
/// embedders that need additional backends collect their own table from an
/// iterator of `(id, builder)` pairs.
///
/// # Examples
///
/// ```rust
/// use dns_operator_registry::BuilderTable;
///
/// let table = BuilderTable::builtin();
/// assert!(table.get("memory").is_some());
/// assert!(table.get("carrier-pigeon").is_none());
/// ```
pub struct BuilderTable {
    builders: HashMap<String, RegistryBuilder>,
}

impl BuilderTable {
    /// The process-wide table of built-in backends.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Look up a builder by identifier.
    pub fn get(&self, id: &str) -> Option<&RegistryBuilder> {
        self.builders.get(id)
    }

    /// Registered builder identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<S: Into<String>> FromIterator<(S, RegistryBuilder)> for BuilderTable {
    fn from_iter<I: IntoIterator<Item = (S, RegistryBuilder)>>(iter: I) -> Self {
        Self {
            builders: iter.into_iter().map(|(id, b)| (id.into(), b)).collect(),
        }
    }
}

impl std::fmt::Debug for BuilderTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderTable")
            .field("builders", &self.ids())
            .finish()
    }
}
