//! Registry 解析服务

use std::collections::HashMap;
use std::sync::Arc;

use dns_operator_registry::Registry;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// Live registry handles keyed by registry name
pub type RegistrySet = HashMap<String, Arc<dyn Registry>>;

/// Turns registry names into live handles through the catalog and the builder table
pub struct RegistryResolver {
    ctx: Arc<ServiceContext>,
}

impl RegistryResolver {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Build one registry handle.
    pub async fn resolve_one(&self, name: &str) -> CoreResult<Arc<dyn Registry>> {
        let def = self
            .ctx
            .registry_catalog
            .find_by_name(name)
            .await?
            .ok_or_else(|| CoreError::RegistryNotFound(name.to_string()))?;

        let builder =
            self.ctx
                .builders
                .get(&def.builder)
                .ok_or_else(|| CoreError::UnsupportedBuilder {
                    registry: name.to_string(),
                    builder: def.builder.clone(),
                })?;

        let registry = builder(&def.builder_params).map_err(|source| CoreError::Builder {
            registry: name.to_string(),
            builder: def.builder.clone(),
            source,
        })?;
        log::debug!("Built registry [{name}] with builder [{}]", def.builder);
        Ok(registry)
    }

    /// Build a handle for every distinct name, in first-seen order.
    ///
    /// Each builder runs once per distinct name; the first failure aborts.
    pub async fn resolve<'a, I>(&self, names: I) -> CoreResult<RegistrySet>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut registries = RegistrySet::new();
        for name in names {
            if registries.contains_key(name) {
                continue;
            }
            let registry = self.resolve_one(name).await?;
            registries.insert(name.to_string(), registry);
        }
        Ok(registries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_harness, HarnessBuilder};
    use crate::types::RegistryDef;

    #[tokio::test]
    async fn resolves_each_name_once() {
        let harness = create_test_harness(&["r1", "r2"]);
        let resolver = RegistryResolver::new(Arc::clone(&harness.ctx));

        let set = resolver.resolve(["r1", "r2", "r1", "r1"]).await.unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(harness.registries.build_count("r1"), 1);
        assert_eq!(harness.registries.build_count("r2"), 1);
    }

    #[tokio::test]
    async fn unknown_registry_is_not_found() {
        let harness = create_test_harness(&["r1"]);
        let resolver = RegistryResolver::new(Arc::clone(&harness.ctx));

        let err = resolver.resolve_one("missing").await.err().unwrap();
        assert!(matches!(err, CoreError::RegistryNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn unknown_builder_is_unsupported() {
        let harness = HarnessBuilder::new(&["r1"])
            .with_definition("legacy", RegistryDef::new("bind9", serde_json::Value::Null))
            .build();
        let resolver = RegistryResolver::new(Arc::clone(&harness.ctx));

        let err = resolver.resolve(["r1", "legacy"]).await.err().unwrap();
        match err {
            CoreError::UnsupportedBuilder { registry, builder } => {
                assert_eq!(registry, "legacy");
                assert_eq!(builder, "bind9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn builder_failure_is_wrapped() {
        let harness = HarnessBuilder::new(&["r1"])
            .with_definition(
                "broken",
                RegistryDef::new("recording", serde_json::json!({ "fail": true })),
            )
            .build();
        let resolver = RegistryResolver::new(Arc::clone(&harness.ctx));

        let err = resolver.resolve_one("broken").await.err().unwrap();
        assert!(matches!(
            err,
            CoreError::Builder { ref registry, ref builder, .. }
                if registry == "broken" && builder == "recording"
        ));
        assert!(err.to_string().contains("Registry [broken] builder [recording] failed"));
    }
}
