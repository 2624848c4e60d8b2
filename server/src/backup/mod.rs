pub mod rotator;

use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};

pub use rotator::BackupRotator;

use crate::constants::storage;

/// Source of backup timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock in the server's local timezone
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Deletes backups that fall outside retention
pub trait BackupRemover: Send + Sync {
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Removes backup files from the local filesystem
#[derive(Debug, Default, Clone)]
pub struct FsRemover;

impl BackupRemover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// A backup file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub filename: String,
    pub path: PathBuf,
    /// YYYYMMDD_HHMMSS, local time
    pub timestamp: String,
}

pub fn backup_filename(timestamp: &str) -> String {
    format!(
        "{}{}.{}",
        storage::BACKUP_PREFIX,
        timestamp,
        storage::BACKUP_EXTENSION
    )
}

/// Extracts the timestamp from a backup file name, rejecting anything that
/// does not follow `backup_YYYYMMDD_HHMMSS.json`
pub fn parse_backup_filename(filename: &str) -> Option<&str> {
    let timestamp = filename
        .strip_prefix(storage::BACKUP_PREFIX)?
        .strip_suffix(storage::BACKUP_EXTENSION)?
        .strip_suffix('.')?;

    let well_formed = timestamp.len() == storage::BACKUP_TIMESTAMP_LEN
        && timestamp.char_indices().all(|(i, c)| {
            if i == 8 {
                c == '_'
            } else {
                c.is_ascii_digit()
            }
        });

    well_formed.then_some(timestamp)
}
