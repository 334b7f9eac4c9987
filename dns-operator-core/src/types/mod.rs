//! 类型定义模块

mod config;
mod operation;
mod role;

pub use config::CatalogConfig;
pub use operation::{BatchExecutionResult, BatchOperationFailure, Operation, OperationKind};
pub use role::{Authorization, Grant, RoleDef, ANY_SUBDOMAIN, APEX};

// Re-export registry 库的公共类型
pub use dns_operator_registry::{
    BuilderParams, DnsRecordType, Record, RecordData, RegistryDef, DEFAULT_TTL,
};
