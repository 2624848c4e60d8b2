pub mod backup;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use backup::{BackupEntry, BackupRemover, BackupRotator, Clock, FsRemover, SystemClock};
pub use config::{Config, ConfigManager};
pub use errors::{StoreError, StoreResult};
pub use events::{StoreEvent, StoreObserver, TracingObserver};
pub use store::DataStore;
