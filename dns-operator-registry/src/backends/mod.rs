//! Built-in registry backends

#[cfg(feature = "json-file")]
pub(crate) mod json_file;
#[cfg(feature = "memory")]
pub(crate) mod memory;

#[cfg(feature = "json-file")]
pub use json_file::JsonFileRegistry;
#[cfg(feature = "memory")]
pub use memory::MemoryRegistry;
