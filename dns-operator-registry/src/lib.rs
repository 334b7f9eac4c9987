//! # dns-operator-registry
//!
//! Record registry abstraction for DNS Operator.
//!
//! A *registry* is a named backend that stores DNS records. This crate
//! defines the [`Registry`] capability trait, the record payload types, and
//! the static [`BuilderTable`] that turns a [`RegistryDef`] into a live
//! registry handle.
//!
//! ## Built-in Backends
//!
//! | Builder | Feature Flag | Parameters |
//! |---------|-------------|------------|
//! | `memory` | `memory` | `{ "namespace": string }` (optional) |
//! | `json-file` | `json-file` | `{ "path": string }` |
//!
//! - **`all-backends`** *(default)*: enable every backend listed above.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_operator_registry::{BuilderTable, Record, RecordData, RegistryDef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let def = RegistryDef::new("memory", serde_json::json!({ "namespace": "edge" }));
//!     let table = BuilderTable::builtin();
//!     let builder = table.get(&def.builder).ok_or("unknown builder")?;
//!     let registry = builder(&def.builder_params)?;
//!
//!     let record = Record::new(
//!         "www.example.com",
//!         RecordData::A { address: "1.2.3.4".to_string() },
//!     );
//!     registry.delete_all_records_with_name(&record.name).await?;
//!     registry.append_record(&record).await?;
//!     Ok(())
//! }
//! ```

mod backends;
mod error;
mod factory;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{RegistryError, Result};

// Re-export the builder table
pub use factory::{BuilderTable, RegistryBuilder};

// Re-export core trait
pub use traits::Registry;

// Re-export types
pub use types::{BuilderParams, DEFAULT_TTL, DnsRecordType, Record, RecordData, RegistryDef};

// Re-export utils module
pub use utils::log_sanitizer;

// Re-export concrete backends (behind feature flags)
#[cfg(feature = "json-file")]
pub use backends::JsonFileRegistry;

#[cfg(feature = "memory")]
pub use backends::MemoryRegistry;
