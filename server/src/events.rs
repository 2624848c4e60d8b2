//! Store events and the observer they are reported to
//!
//! The data store and backup rotator never log directly; they emit
//! [`StoreEvent`]s into an injected [`StoreObserver`]. Production wiring uses
//! [`TracingObserver`], tests substitute a recording observer.

use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    DocumentSaved { path: PathBuf },
    BackupCreated { path: PathBuf },
    BackupPruned { path: PathBuf },
    PruneFailed { path: PathBuf, reason: String },
    WriteFailed { reason: String },
}

pub trait StoreObserver: Send + Sync {
    fn record(&self, event: StoreEvent);
}

/// Forwards store events to `tracing`
#[derive(Debug, Default, Clone)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn record(&self, event: StoreEvent) {
        match event {
            StoreEvent::DocumentSaved { path } => info!("Data saved: {}", path.display()),
            StoreEvent::BackupCreated { path } => info!("Backup created: {}", file_label(&path)),
            StoreEvent::BackupPruned { path } => {
                info!("Old backup deleted: {}", file_label(&path))
            }
            StoreEvent::PruneFailed { path, reason } => {
                warn!("Could not delete old backup {}: {}", file_label(&path), reason)
            }
            StoreEvent::WriteFailed { reason } => error!("Failed to save data: {}", reason),
        }
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
