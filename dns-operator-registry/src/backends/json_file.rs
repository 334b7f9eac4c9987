//! JSON file registry backend
//!
//! Records are kept as a single JSON array. Every mutation is a
//! read-modify-write of the whole file under a lock shared by all handles on
//! the same path, and the new contents replace the old file through a rename.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{RegistryError, Result};
use crate::traits::Registry;
use crate::types::{BuilderParams, Record};

pub(crate) const BUILDER_ID: &str = "json-file";

/// One lock per file path, shared by every handle in the process
static FILE_LOCKS: LazyLock<std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(|| std::sync::Mutex::new(HashMap::new()));

fn file_lock(path: &Path) -> Arc<Mutex<()>> {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = FILE_LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

#[derive(Debug, Deserialize)]
struct JsonFileParams {
    path: PathBuf,
}

/// File-backed record store
pub struct JsonFileRegistry {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            lock: file_lock(&path),
            path,
        }
    }

    pub(crate) fn build(params: &BuilderParams) -> Result<Arc<dyn Registry>> {
        let params = JsonFileParams::deserialize(params).map_err(|e| {
            RegistryError::InvalidParams {
                backend: BUILDER_ID.to_string(),
                detail: e.to_string(),
            }
        })?;
        Ok(Arc::new(Self::new(params.path)))
    }

    fn storage_error(&self, e: &std::io::Error) -> RegistryError {
        RegistryError::StorageError {
            backend: BUILDER_ID.to_string(),
            detail: format!("{}: {e}", self.path.display()),
        }
    }

    async fn load(&self) -> Result<Vec<Record>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.storage_error(&e)),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| RegistryError::SerializationError {
            backend: BUILDER_ID.to_string(),
            detail: e.to_string(),
        })
    }

    async fn store(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).map_err(|e| {
            RegistryError::SerializationError {
                backend: BUILDER_ID.to_string(),
                detail: e.to_string(),
            }
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(format!(".{}.tmp", uuid::Uuid::new_v4()));
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.storage_error(&e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.storage_error(&e));
        }
        Ok(())
    }
}

#[async_trait]
impl Registry for JsonFileRegistry {
    fn id(&self) -> &'static str {
        BUILDER_ID
    }

    async fn append_record(&self, record: &Record) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.push(record.clone());
        self.store(&records).await
    }

    async fn delete_record(&self, record: &Record) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let Some(index) = records.iter().position(|r| r.same_identity(record)) else {
            return Err(RegistryError::RecordNotFound {
                backend: BUILDER_ID.to_string(),
                name: record.name.clone(),
            });
        };
        records.remove(index);
        self.store(&records).await
    }

    async fn delete_all_records_with_name(&self, name: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.name != name);
        if records.len() == before {
            return Ok(());
        }
        log::debug!(
            "Removed {} record(s) named '{name}' from {}",
            before - records.len(),
            self.path.display()
        );
        self.store(&records).await
    }

    async fn list_records_with_name(&self, name: &str) -> Result<Vec<Record>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|r| r.name == name)
            .collect())
    }
}
