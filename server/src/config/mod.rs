pub mod manager;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
pub use manager::ConfigManager;

use crate::constants::{defaults, storage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
    // Falls back to <config_dir>/backups
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,
    #[serde(default = "default_retention_count")]
    pub retention_count: usize,
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_config_dir() -> PathBuf {
    PathBuf::from(defaults::CONFIG_DIR)
}

fn default_web_dir() -> PathBuf {
    PathBuf::from(defaults::WEB_DIR)
}

fn default_retention_count() -> usize {
    defaults::RETENTION_COUNT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            config_dir: default_config_dir(),
            backup_dir: None,
            web_dir: default_web_dir(),
            retention_count: default_retention_count(),
        }
    }
}

impl Config {
    /// Config rooted at `config_dir` with every other field at its default
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            ..Self::default()
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.config_dir.join(storage::DATA_FILE_NAME)
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| self.config_dir.join(storage::BACKUP_DIR_NAME))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.retention_count == 0 {
            anyhow::bail!("retention_count must be at least 1");
        }
        if self.port == 0 {
            anyhow::bail!("port must be non-zero");
        }
        Ok(())
    }
}
