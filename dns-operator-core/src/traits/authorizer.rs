//! Authorization abstract Trait

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::types::{Authorization, RoleDef};

/// Authorizer Trait
///
/// Decides whether a role may act on a `domain` / `subdomain` pair and, if
/// so, which registry serves it. Called with the labels exactly as the
/// caller supplied them, before normalization.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Authorize one name
    ///
    /// # Arguments
    /// * `role` - Role definition for the whole batch
    /// * `domain` - Domain as supplied by the caller
    /// * `subdomain` - Subdomain as supplied by the caller, empty for the apex
    async fn authorize(
        &self,
        role: &RoleDef,
        domain: &str,
        subdomain: &str,
    ) -> CoreResult<Authorization>;
}

/// Grant-based authorizer
///
/// Default implementation: the first [`Grant`](crate::types::Grant) of the
/// role that permits the name decides the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleDefAuthorizer;

impl RoleDefAuthorizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authorizer for RoleDefAuthorizer {
    async fn authorize(
        &self,
        role: &RoleDef,
        domain: &str,
        subdomain: &str,
    ) -> CoreResult<Authorization> {
        role.find_grant(domain, subdomain)
            .map(|grant| Authorization {
                registry: grant.registry.clone(),
            })
            .ok_or_else(|| {
                let name = if subdomain.is_empty() {
                    domain.to_string()
                } else {
                    format!("{subdomain}.{domain}")
                };
                CoreError::Authorization(format!(
                    "role '{}' may not manage '{name}'",
                    role.name
                ))
            })
    }
}
