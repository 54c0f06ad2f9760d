use crate::ledger::Ledger;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::{fs, sync::Mutex};
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read ledger from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write ledger to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("stored ledger is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to serialize ledger: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Holds the whole ledger as one serialized blob. Every save replaces it.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Returns an empty ledger when nothing has been stored yet.
    async fn load(&self) -> Result<Ledger, StoreError>;

    async fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    async fn load(&self) -> Result<Ledger, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Malformed),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file yet, starting empty");
                Ok(Ledger::default())
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(ledger).map_err(StoreError::Serialize)?;
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        fs::write(&self.path, payload).await.map_err(write_err)?;
        Ok(())
    }
}

/// Keeps the serialized blob in memory.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    pub async fn blob(&self) -> Option<String> {
        self.blob.lock().await.clone()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> Result<Ledger, StoreError> {
        match self.blob.lock().await.as_deref() {
            Some(raw) => serde_json::from_str(raw).map_err(StoreError::Malformed),
            None => Ok(Ledger::default()),
        }
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let raw = serde_json::to_string(ledger).map_err(StoreError::Serialize)?;
        *self.blob.lock().await = Some(raw);
        Ok(())
    }
}
