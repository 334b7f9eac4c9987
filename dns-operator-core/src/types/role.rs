//! Role definition type definitions

use serde::{Deserialize, Serialize};

/// Subdomain pattern matching any subdomain, apex included.
pub const ANY_SUBDOMAIN: &str = "*";

/// Subdomain pattern matching only the apex.
pub const APEX: &str = "@";

fn any_subdomain() -> Vec<String> {
    vec![ANY_SUBDOMAIN.to_string()]
}

/// Authorization context for a batch.
///
/// The executor never inspects a role; it only hands it to the configured
/// [`Authorizer`](crate::traits::Authorizer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDef {
    /// Role name, filled from the config key when omitted
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grants: Vec<Grant>,
}

impl RoleDef {
    pub fn new(name: impl Into<String>, grants: Vec<Grant>) -> Self {
        Self {
            name: name.into(),
            grants,
        }
    }

    /// First grant permitting `domain` / `subdomain`.
    pub fn find_grant(&self, domain: &str, subdomain: &str) -> Option<&Grant> {
        self.grants.iter().find(|g| g.permits(domain, subdomain))
    }
}

/// Permission to manage names under one domain through one registry.
///
/// Subdomain patterns:
/// - `"*"` any subdomain, apex included
/// - `"@"` or `""` the apex only
/// - `"*.x"` any name strictly below `x`
/// - anything else must match exactly
///
/// Matching ignores case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub domain: String,
    #[serde(default = "any_subdomain")]
    pub subdomains: Vec<String>,
    /// Registry serving the granted names
    pub registry: String,
}

impl Grant {
    /// Grant every subdomain of `domain`.
    pub fn domain(domain: impl Into<String>, registry: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomains: any_subdomain(),
            registry: registry.into(),
        }
    }

    #[must_use]
    pub fn with_subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    pub fn permits(&self, domain: &str, subdomain: &str) -> bool {
        if self.domain.to_lowercase() != domain.to_lowercase() {
            return false;
        }
        let subdomain = subdomain.to_lowercase();
        self.subdomains
            .iter()
            .any(|pattern| subdomain_matches(&pattern.to_lowercase(), &subdomain))
    }
}

fn subdomain_matches(pattern: &str, subdomain: &str) -> bool {
    match pattern {
        ANY_SUBDOMAIN => true,
        APEX | "" => subdomain.is_empty(),
        _ => match pattern.strip_prefix("*.") {
            Some(parent) => subdomain
                .strip_suffix(parent)
                .is_some_and(|rest| rest.len() > 1 && rest.ends_with('.')),
            None => pattern == subdomain,
        },
    }
}

/// Successful authorization result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// Registry the operation must target
    pub registry: String,
}
