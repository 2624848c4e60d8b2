use shift_schedule::{StoreEvent, StoreObserver};
use std::path::PathBuf;
use std::sync::Mutex;

/// Observer that keeps every event for later inspection
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<StoreEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn pruned(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                StoreEvent::BackupPruned { path } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn prune_failures(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                StoreEvent::PruneFailed { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn count_created(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, StoreEvent::BackupCreated { .. }))
            .count()
    }
}

impl StoreObserver for RecordingObserver {
    fn record(&self, event: StoreEvent) {
        self.events.lock().unwrap().push(event);
    }
}
