//! Store wired to a temp directory with injectable clock and observer

use chrono::{DateTime, Duration, Local, TimeZone};
use shift_schedule::{BackupRemover, BackupRotator, Clock, Config, DataStore, FsRemover};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use super::RecordingObserver;

/// Advances one second on every call
pub struct StepClock {
    start: DateTime<Local>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            start: Local.with_ymd_and_hms(2025, 11, 19, 6, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Local> {
        self.start + Duration::seconds(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}

/// Fails every delete, like a backup volume mounted read-only after the write
pub struct RefusingRemover;

impl BackupRemover for RefusingRemover {
    fn remove(&self, _path: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"))
    }
}

pub struct TestEnv {
    _temp_dir: TempDir,
    pub config: Arc<Config>,
    pub store: Arc<DataStore>,
    pub observer: Arc<RecordingObserver>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_retention(10)
    }

    pub fn with_retention(retention_count: usize) -> Self {
        Self::with_remover(retention_count, Arc::new(FsRemover))
    }

    pub fn with_remover(retention_count: usize, remover: Arc<dyn BackupRemover>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let web_dir = temp_dir.path().join("web");
        std::fs::create_dir_all(&web_dir).expect("Failed to create web dir");
        std::fs::write(
            web_dir.join("index.html"),
            "<!DOCTYPE html><title>Shift Schedule</title>",
        )
        .expect("Failed to write index.html");
        std::fs::write(web_dir.join("app.js"), "const API_DATA = '/api/data';")
            .expect("Failed to write app.js");

        let config = Config {
            web_dir,
            retention_count,
            ..Config::with_config_dir(temp_dir.path().join("shift_schedule"))
        };

        let observer = Arc::new(RecordingObserver::default());
        let rotator = BackupRotator::with_clock(
            config.backup_dir(),
            config.retention_count,
            Arc::new(StepClock::new()),
            observer.clone(),
        )
        .with_remover(remover);
        let store = DataStore::with_rotator(config.data_file(), rotator, observer.clone());

        Self {
            _temp_dir: temp_dir,
            config: Arc::new(config),
            store: Arc::new(store),
            observer,
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.config.data_file()
    }

    pub fn backup_names(&self) -> Vec<String> {
        self.store
            .rotator()
            .list_backups()
            .expect("Failed to list backups")
            .into_iter()
            .map(|b| b.filename)
            .collect()
    }

    pub fn backup_contents(&self) -> Vec<String> {
        self.store
            .rotator()
            .list_backups()
            .expect("Failed to list backups")
            .into_iter()
            .map(|b| std::fs::read_to_string(b.path).expect("Failed to read backup"))
            .collect()
    }
}
