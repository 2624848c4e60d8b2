//! Timestamped backups of the schedule document with count-based retention
//!
//! A rotation writes the outgoing document to `backup_<YYYYMMDD_HHMMSS>.json`
//! and then deletes the oldest backups beyond the retention count. Two
//! rotations within the same second share a file name and the later one
//! overwrites the earlier.

use glob::glob;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, instrument};

use super::{
    backup_filename, parse_backup_filename, BackupEntry, BackupRemover, Clock, FsRemover,
    SystemClock,
};
use crate::constants::storage;
use crate::errors::{StoreError, StoreResult};
use crate::events::{StoreEvent, StoreObserver};
use crate::store::atomic_write;

pub struct BackupRotator {
    backup_dir: PathBuf,
    retention_count: usize,
    clock: Arc<dyn Clock>,
    remover: Arc<dyn BackupRemover>,
    observer: Arc<dyn StoreObserver>,
}

impl BackupRotator {
    pub fn new(
        backup_dir: PathBuf,
        retention_count: usize,
        observer: Arc<dyn StoreObserver>,
    ) -> Self {
        Self::with_clock(backup_dir, retention_count, Arc::new(SystemClock), observer)
    }

    pub fn with_clock(
        backup_dir: PathBuf,
        retention_count: usize,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn StoreObserver>,
    ) -> Self {
        Self {
            backup_dir,
            retention_count: retention_count.max(1),
            clock,
            remover: Arc::new(FsRemover),
            observer,
        }
    }

    pub fn with_remover(mut self, remover: Arc<dyn BackupRemover>) -> Self {
        self.remover = remover;
        self
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn retention_count(&self) -> usize {
        self.retention_count
    }

    /// Snapshot `current` into a new backup file, then prune.
    ///
    /// Errors creating the directory or writing the backup are returned and
    /// must abort the pending overwrite. Pruning errors are only reported.
    #[instrument(skip(self, current), fields(bytes = current.len()))]
    pub async fn rotate(&self, current: &[u8]) -> StoreResult<BackupEntry> {
        fs::create_dir_all(&self.backup_dir)
            .await
            .map_err(|e| StoreError::io(&self.backup_dir, "create backup directory", e))?;

        let timestamp = self
            .clock
            .now()
            .format(storage::BACKUP_TIMESTAMP_FORMAT)
            .to_string();
        let filename = backup_filename(&timestamp);
        let path = self.backup_dir.join(&filename);

        atomic_write(&path, current).await?;

        self.observer
            .record(StoreEvent::BackupCreated { path: path.clone() });

        self.prune().await;

        Ok(BackupEntry {
            filename,
            path,
            timestamp,
        })
    }

    /// All backups in the directory, oldest first
    pub fn list_backups(&self) -> StoreResult<Vec<BackupEntry>> {
        let pattern = format!(
            "{}/{}*.{}",
            glob::Pattern::escape(&self.backup_dir.to_string_lossy()),
            storage::BACKUP_PREFIX,
            storage::BACKUP_EXTENSION
        );

        let paths = glob(&pattern).map_err(|e| {
            StoreError::io(
                &self.backup_dir,
                "list backups in",
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
            )
        })?;

        let mut backups: Vec<BackupEntry> = paths
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let filename = path.file_name()?.to_str()?.to_string();
                let timestamp = parse_backup_filename(&filename)?.to_string();
                Some(BackupEntry {
                    filename,
                    path,
                    timestamp,
                })
            })
            .collect();

        backups.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(backups)
    }

    /// Delete the oldest backups beyond the retention count, one by one
    async fn prune(&self) {
        let backups = match self.list_backups() {
            Ok(backups) => backups,
            Err(e) => {
                self.observer.record(StoreEvent::PruneFailed {
                    path: self.backup_dir.clone(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        if backups.len() <= self.retention_count {
            debug!(
                "{} backups present, retention {}; nothing to prune",
                backups.len(),
                self.retention_count
            );
            return;
        }

        let excess = backups.len() - self.retention_count;
        for old in backups.into_iter().take(excess) {
            match self.remover.remove(&old.path) {
                Ok(()) => self
                    .observer
                    .record(StoreEvent::BackupPruned { path: old.path }),
                Err(e) => self.observer.record(StoreEvent::PruneFailed {
                    path: old.path,
                    reason: e.to_string(),
                }),
            }
        }
    }
}
