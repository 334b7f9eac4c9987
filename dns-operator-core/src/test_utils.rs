//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dns_operator_registry::{BuilderTable, Registry, RegistryBuilder, RegistryError};

use crate::error::RegistryAction;
use crate::services::{OperationService, ServiceContext};
use crate::traits::{InMemoryRegistryCatalog, RoleDefAuthorizer};
use crate::types::{BuilderParams, CatalogConfig, Grant, Record, RecordData, RegistryDef, RoleDef};

const RECORDING_BUILDER: &str = "recording";

// ===== RecordingRegistry =====

/// A registry call as observed by [`RecordingRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    Append(Record),
    Delete(Record),
    DeleteAll(String),
}

/// Registry that records every call, with optional failure and delay injection
#[derive(Default)]
pub struct RecordingRegistry {
    calls: Mutex<Vec<RegistryCall>>,
    failing: Mutex<HashSet<RegistryAction>>,
    delay: Mutex<Option<Duration>>,
}

impl RecordingRegistry {
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn delete_all_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RegistryCall::DeleteAll(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// 让指定操作始终失败
    pub fn fail_on(&self, action: RegistryAction) {
        self.failing.lock().unwrap().insert(action);
    }

    /// 每次调用前等待
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    async fn record(&self, action: RegistryAction, call: RegistryCall) -> Result<(), RegistryError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&action) {
            return Err(RegistryError::Backend {
                backend: RECORDING_BUILDER.to_string(),
                message: format!("injected {action} failure"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Registry for RecordingRegistry {
    fn id(&self) -> &'static str {
        RECORDING_BUILDER
    }

    async fn append_record(&self, record: &Record) -> Result<(), RegistryError> {
        self.record(RegistryAction::Append, RegistryCall::Append(record.clone()))
            .await
    }

    async fn delete_record(&self, record: &Record) -> Result<(), RegistryError> {
        self.record(RegistryAction::Delete, RegistryCall::Delete(record.clone()))
            .await
    }

    async fn delete_all_records_with_name(&self, name: &str) -> Result<(), RegistryError> {
        self.record(
            RegistryAction::DeleteAll,
            RegistryCall::DeleteAll(name.to_string()),
        )
        .await
    }

    async fn list_records_with_name(&self, _name: &str) -> Result<Vec<Record>, RegistryError> {
        Ok(Vec::new())
    }
}

// ===== TestRegistries =====

/// Recording registries keyed by the `name` builder parameter, plus build counters
#[derive(Default)]
pub struct TestRegistries {
    registries: Mutex<HashMap<String, Arc<RecordingRegistry>>>,
    build_counts: Mutex<HashMap<String, usize>>,
}

impl TestRegistries {
    /// 获取（或创建）指定名称的 registry
    pub fn get(&self, name: &str) -> Arc<RecordingRegistry> {
        Arc::clone(
            self.registries
                .lock()
                .unwrap()
                .entry(name.to_string())
                .or_default(),
        )
    }

    /// 构建器被调用的次数
    pub fn build_count(&self, name: &str) -> usize {
        self.build_counts
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// 所有 registry 上的调用总数
    pub fn total_calls(&self) -> usize {
        self.registries
            .lock()
            .unwrap()
            .values()
            .map(|r| r.calls().len())
            .sum()
    }

    fn build(&self, params: &BuilderParams) -> Result<Arc<dyn Registry>, RegistryError> {
        let name = params["name"].as_str().unwrap_or_default().to_string();
        *self.build_counts.lock().unwrap().entry(name.clone()).or_default() += 1;
        if params["fail"].as_bool().unwrap_or(false) {
            return Err(RegistryError::Backend {
                backend: RECORDING_BUILDER.to_string(),
                message: "injected builder failure".to_string(),
            });
        }
        Ok(self.get(&name))
    }
}

// ===== 工厂方法 =====

pub struct TestHarness {
    pub ctx: Arc<ServiceContext>,
    pub registries: Arc<TestRegistries>,
}

pub struct HarnessBuilder {
    config: CatalogConfig,
}

impl HarnessBuilder {
    /// 每个名称对应一个 recording registry
    pub fn new(names: &[&str]) -> Self {
        let registries = names
            .iter()
            .map(|name| {
                (
                    (*name).to_string(),
                    RegistryDef::new(RECORDING_BUILDER, serde_json::json!({ "name": name })),
                )
            })
            .collect();
        Self {
            config: CatalogConfig {
                registries,
                roles: Default::default(),
            },
        }
    }

    pub fn with_definition(mut self, name: &str, def: RegistryDef) -> Self {
        self.config.registries.insert(name.to_string(), def);
        self
    }

    pub fn build(self) -> TestHarness {
        let registries = Arc::new(TestRegistries::default());
        let builder_registries = Arc::clone(&registries);
        let builder: RegistryBuilder =
            Box::new(move |params: &BuilderParams| builder_registries.build(params));
        let builders: BuilderTable = vec![(RECORDING_BUILDER, builder)].into_iter().collect();

        let ctx = Arc::new(ServiceContext::with_builders(
            Arc::new(RoleDefAuthorizer::new()),
            Arc::new(InMemoryRegistryCatalog::from_config(&self.config)),
            Arc::new(builders),
        ));
        TestHarness { ctx, registries }
    }
}

/// 创建测试用 harness
pub fn create_test_harness(names: &[&str]) -> TestHarness {
    HarnessBuilder::new(names).build()
}

/// 创建测试用 `OperationService`
pub fn create_test_service(names: &[&str]) -> (OperationService, TestHarness) {
    let harness = create_test_harness(names);
    (OperationService::new(Arc::clone(&harness.ctx)), harness)
}

/// 创建一个角色：每个 `(domain, registry)` 授予该域名下全部子域名
pub fn role_for(grants: &[(&str, &str)]) -> RoleDef {
    RoleDef::new(
        "test",
        grants
            .iter()
            .map(|(domain, registry)| Grant::domain(*domain, *registry))
            .collect(),
    )
}

pub fn a_record(address: &str) -> RecordData {
    RecordData::A {
        address: address.to_string(),
    }
}
