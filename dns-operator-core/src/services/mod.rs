//! 业务逻辑服务层

mod operation_service;
mod registry_resolver;

pub use operation_service::OperationService;
pub use registry_resolver::{RegistryResolver, RegistrySet};

use std::sync::Arc;

use dns_operator_registry::BuilderTable;

use crate::traits::{Authorizer, RegistryCatalog};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的实现。
pub struct ServiceContext {
    /// 授权器
    pub authorizer: Arc<dyn Authorizer>,
    /// Registry 定义目录
    pub registry_catalog: Arc<dyn RegistryCatalog>,
    /// Registry 构建表（构建后只读）
    pub builders: Arc<BuilderTable>,
}

impl ServiceContext {
    /// 创建服务上下文，使用内置的 Registry 构建表
    #[must_use]
    pub fn new(
        authorizer: Arc<dyn Authorizer>,
        registry_catalog: Arc<dyn RegistryCatalog>,
    ) -> Self {
        Self::with_builders(authorizer, registry_catalog, BuilderTable::builtin())
    }

    /// 创建服务上下文，使用自定义构建表
    #[must_use]
    pub fn with_builders(
        authorizer: Arc<dyn Authorizer>,
        registry_catalog: Arc<dyn RegistryCatalog>,
        builders: Arc<BuilderTable>,
    ) -> Self {
        Self {
            authorizer,
            registry_catalog,
            builders,
        }
    }
}
