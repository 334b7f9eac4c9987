//! Collaborator abstraction trait definition

mod authorizer;
mod registry_catalog;

pub use authorizer::{Authorizer, RoleDefAuthorizer};
pub use registry_catalog::{InMemoryRegistryCatalog, RegistryCatalog};
