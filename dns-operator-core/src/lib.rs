//! DNS Operator Core Library
//!
//! Executes batches of DNS record operations on behalf of a role:
//! - 授权与名称规范化 (`OperationService::validate_operation`)
//! - Registry 解析 (catalog + builder table)
//! - 批量执行 (`OperationService::execute_all`): delete-all dedup phase,
//!   then concurrent append/delete, each outcome reported through a callback
//!
//! Catalog lookup and authorization sit behind traits so that hosts can
//! supply their own implementations.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dns_operator_core::services::{OperationService, ServiceContext};
//! use dns_operator_core::traits::{InMemoryRegistryCatalog, RoleDefAuthorizer};
//! use dns_operator_core::types::{CatalogConfig, Operation, RecordData};
//!
//! # async fn run() -> dns_operator_core::CoreResult<()> {
//! let config = CatalogConfig::load("catalog.json")?;
//! let ctx = Arc::new(ServiceContext::new(
//!     Arc::new(RoleDefAuthorizer::new()),
//!     Arc::new(InMemoryRegistryCatalog::from_config(&config)),
//! ));
//! let service = OperationService::new(ctx);
//!
//! let mut ops = vec![Operation::update(
//!     "example.com",
//!     "www",
//!     RecordData::A { address: "192.0.2.1".to_string() },
//! )];
//! let result = service
//!     .execute_all(config.role("deployer")?, &mut ops, |op, outcome| {
//!         println!("{}: {:?}", op.canonical_name(), outcome.map_err(ToString::to_string));
//!     })
//!     .await?;
//! println!("{} succeeded, {} failed", result.success_count, result.failed_count);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, RegistryAction};
pub use services::{OperationService, RegistryResolver, ServiceContext};
pub use traits::{Authorizer, InMemoryRegistryCatalog, RegistryCatalog, RoleDefAuthorizer};
