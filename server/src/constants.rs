//! Application-wide constants for file layout, defaults and HTTP contract values

/// On-disk layout of the schedule store
pub mod storage {
    /// File name of the live schedule document inside the config directory
    pub const DATA_FILE_NAME: &str = "schedule_data.json";

    /// Sub-directory of the config directory holding backups
    pub const BACKUP_DIR_NAME: &str = "backups";

    /// Backup file name prefix
    pub const BACKUP_PREFIX: &str = "backup_";

    /// Backup file name extension (without the dot)
    pub const BACKUP_EXTENSION: &str = "json";

    /// chrono format for backup timestamps; lexicographic order == chronological order
    pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Length of a formatted backup timestamp (YYYYMMDD_HHMMSS)
    pub const BACKUP_TIMESTAMP_LEN: usize = 15;

    /// Extension used for the temporary file written before the atomic rename
    pub const TEMP_EXTENSION: &str = "json.tmp";
}

/// Default configuration values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";

    pub const PORT: u16 = 8080;

    /// Base directory for the schedule document and its backups
    pub const CONFIG_DIR: &str = "/config/shift_schedule";

    /// Directory holding the static front-end
    pub const WEB_DIR: &str = "/app/web";

    /// Number of backups kept after each rotation
    pub const RETENTION_COUNT: usize = 10;

    /// Directory searched for main.toml when the binary starts
    pub const SETTINGS_DIR: &str = "config";
}

/// HTTP contract values shared by handlers and middleware
pub mod http {
    pub const DATA_ROUTE: &str = "/api/data";

    pub const ALLOW_ORIGIN: &str = "*";

    pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

    pub const ALLOW_HEADERS: &str = "Content-Type";

    /// Body returned by GET /api/data before the first write
    pub const NO_DATA_MESSAGE: &str = "No data found";
}

/// Limits and constraints
pub mod limits {
    /// Largest accepted POST body
    pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
}
