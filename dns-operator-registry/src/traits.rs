use async_trait::async_trait;

use crate::error::Result;
use crate::types::Record;

/// Record registry capability.
///
/// A registry is a named backend that stores DNS records. Handles are shared
/// across concurrent tasks (`Arc<dyn Registry>`), so every implementation is
/// responsible for its own internal synchronization.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Builder identifier of the backend (e.g. `"memory"`).
    fn id(&self) -> &'static str;

    /// Append one record.
    async fn append_record(&self, record: &Record) -> Result<()>;

    /// Delete the single record matching `record`'s identity (name + data).
    async fn delete_record(&self, record: &Record) -> Result<()>;

    /// Delete every record stored under `name`.
    ///
    /// Deleting a name that has no records is not an error.
    async fn delete_all_records_with_name(&self, name: &str) -> Result<()>;

    /// List every record stored under `name`.
    async fn list_records_with_name(&self, name: &str) -> Result<Vec<Record>>;
}
