//! Catalog configuration

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{RegistryDef, RoleDef};

/// Registry definitions and role definitions, as loaded from a JSON document.
///
/// ```json
/// {
///   "registries": {
///     "edge": { "builder": "memory", "builderParams": { "namespace": "edge" } }
///   },
///   "roles": {
///     "ops": { "grants": [ { "domain": "example.com", "registry": "edge" } ] }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    #[serde(default)]
    pub registries: BTreeMap<String, RegistryDef>,
    #[serde(default)]
    pub roles: BTreeMap<String, RoleDef>,
}

impl CatalogConfig {
    /// Parse and check a JSON document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let mut config: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::ConfigError(format!("invalid catalog document: {e}")))?;
        for (name, role) in &mut config.roles {
            if role.name.is_empty() {
                role.name.clone_from(name);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON document from disk.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoreError::StorageError(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded catalog config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Every grant must point at a defined registry.
    pub fn validate(&self) -> CoreResult<()> {
        for (role_name, role) in &self.roles {
            for grant in &role.grants {
                if !self.registries.contains_key(&grant.registry) {
                    return Err(CoreError::ConfigError(format!(
                        "role '{role_name}' grants domain '{}' on undefined registry '{}'",
                        grant.domain, grant.registry
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up a role by name.
    pub fn role(&self, name: &str) -> CoreResult<&RoleDef> {
        self.roles
            .get(name)
            .ok_or_else(|| CoreError::ConfigError(format!("role '{name}' is not defined")))
    }
}
