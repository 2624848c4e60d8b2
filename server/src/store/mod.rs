//! Single-document JSON store with backup-before-overwrite
//!
//! The document is opaque: whatever JSON the client posts is stored and
//! served back unchanged. Writes are serialized through one async mutex held
//! across "check existing -> backup -> overwrite", and the overwrite itself is
//! a temp-file-plus-rename, so readers never observe a partially written file.

use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::backup::BackupRotator;
use crate::config::Config;
use crate::constants::storage;
use crate::errors::{StoreError, StoreResult};
use crate::events::{StoreEvent, StoreObserver};

pub struct DataStore {
    data_file: PathBuf,
    rotator: BackupRotator,
    observer: Arc<dyn StoreObserver>,
    write_lock: Mutex<()>,
}

impl DataStore {
    pub fn new(config: &Config, observer: Arc<dyn StoreObserver>) -> Self {
        let rotator = BackupRotator::new(
            config.backup_dir(),
            config.retention_count,
            observer.clone(),
        );
        Self::with_rotator(config.data_file(), rotator, observer)
    }

    pub fn with_rotator(
        data_file: PathBuf,
        rotator: BackupRotator,
        observer: Arc<dyn StoreObserver>,
    ) -> Self {
        Self {
            data_file,
            rotator,
            observer,
            write_lock: Mutex::new(()),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn rotator(&self) -> &BackupRotator {
        &self.rotator
    }

    /// Load the current document; `Ok(None)` when nothing has been written yet
    #[instrument(skip(self))]
    pub async fn read(&self) -> StoreResult<Option<Value>> {
        let bytes = match fs::read(&self.data_file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No document at {}", self.data_file.display());
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&self.data_file, "read", e)),
        };

        let document = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::serialization(&self.data_file, e))?;
        Ok(Some(document))
    }

    /// Parse a request body and store it. Malformed JSON leaves disk untouched.
    pub async fn write_bytes(&self, body: &[u8]) -> StoreResult<()> {
        let document: Value = serde_json::from_slice(body).map_err(StoreError::invalid_input)?;
        self.write(&document).await
    }

    /// Replace the stored document, backing up the previous one first
    #[instrument(skip(self, document))]
    pub async fn write(&self, document: &Value) -> StoreResult<()> {
        let result = self.write_locked(document).await;
        match &result {
            Ok(()) => self.observer.record(StoreEvent::DocumentSaved {
                path: self.data_file.clone(),
            }),
            Err(e) => self.observer.record(StoreEvent::WriteFailed {
                reason: e.to_string(),
            }),
        }
        result
    }

    async fn write_locked(&self, document: &Value) -> StoreResult<()> {
        let encoded = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::serialization(&self.data_file, e))?;

        let _guard = self.write_lock.lock().await;

        match fs::read(&self.data_file).await {
            Ok(previous) => {
                self.rotator.rotate(&previous).await?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("First write, no backup taken");
            }
            Err(e) => return Err(StoreError::io(&self.data_file, "read", e)),
        }

        if let Some(parent) = self.data_file.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, "create directory", e))?;
        }

        atomic_write(&self.data_file, &encoded).await
    }
}

/// Write to a sibling temp file, fsync it, then rename over `path`
pub(crate) async fn atomic_write(path: &Path, data: &[u8]) -> StoreResult<()> {
    let temp_path = path.with_extension(storage::TEMP_EXTENSION);

    let written = write_and_rename(&temp_path, path, data).await;
    if written.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    written
}

async fn write_and_rename(temp_path: &Path, path: &Path, data: &[u8]) -> StoreResult<()> {
    let mut file = fs::File::create(temp_path)
        .await
        .map_err(|e| StoreError::io(temp_path, "create", e))?;
    file.write_all(data)
        .await
        .map_err(|e| StoreError::io(temp_path, "write", e))?;
    file.sync_all()
        .await
        .map_err(|e| StoreError::io(temp_path, "sync", e))?;
    fs::rename(temp_path, path)
        .await
        .map_err(|e| StoreError::io(path, "replace", e))
}
