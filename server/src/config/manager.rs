use super::Config;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(settings_dir: impl AsRef<Path>) -> Result<Self> {
        let config = Self::load_configuration(settings_dir.as_ref()).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(settings_dir: &Path) -> Result<Config> {
        let main_config_path: PathBuf = settings_dir.join("main.toml");

        let exists = fs::try_exists(&main_config_path).await.map_err(|e| {
            anyhow!(
                "Failed to check main config {}: {}",
                main_config_path.display(),
                e
            )
        })?;

        let config = if exists {
            debug!("Loading config: {}", main_config_path.display());
            let content = fs::read_to_string(&main_config_path).await.map_err(|e| {
                anyhow!(
                    "Failed to read main config {}: {}",
                    main_config_path.display(),
                    e
                )
            })?;
            toml::from_str::<Config>(&content).map_err(|e| {
                anyhow!(
                    "Failed to parse main config {}: {}",
                    main_config_path.display(),
                    e
                )
            })?
        } else {
            warn!(
                "No config file at {}, using built-in defaults",
                main_config_path.display()
            );
            Config::default()
        };

        config.validate()?;

        info!(
            "Configuration loaded: data file {}, backups in {} (keeping {})",
            config.data_file().display(),
            config.backup_dir().display(),
            config.retention_count
        );

        Ok(config)
    }
}

/// Creates the config and backup directories if they are missing
pub async fn ensure_directories(config: &Config) -> Result<()> {
    for dir in [config.config_dir.clone(), config.backup_dir()] {
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow!("Failed to create directory {}: {}", dir.display(), e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new(temp.path()).await.unwrap();
        let config = manager.get_current_config();
        assert_eq!(config.port, 8080);
        assert_eq!(config.retention_count, 10);
    }

    #[tokio::test]
    async fn unreadable_settings_dir_is_fatal() {
        let temp = TempDir::new().unwrap();
        // A regular file where the settings directory should be
        let not_a_dir = temp.path().join("config");
        std::fs::write(&not_a_dir, "").unwrap();

        let err = ConfigManager::new(&not_a_dir).await.err().unwrap();
        assert!(err.to_string().contains("Failed to check main config"));
    }

    #[tokio::test]
    async fn main_toml_is_loaded() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("main.toml"),
            "port = 9090\nretention_count = 4\nweb_dir = \"/srv/web\"\n",
        )
        .unwrap();

        let config = ConfigManager::new(temp.path())
            .await
            .unwrap()
            .get_current_config();
        assert_eq!(config.port, 9090);
        assert_eq!(config.retention_count, 4);
        assert_eq!(config.web_dir, PathBuf::from("/srv/web"));
    }

    #[tokio::test]
    async fn invalid_toml_is_fatal() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("main.toml"), "port = \"eighty\"").unwrap();

        let err = ConfigManager::new(temp.path()).await.err().unwrap();
        assert!(err.to_string().contains("Failed to parse main config"));
    }

    #[tokio::test]
    async fn ensure_directories_creates_both() {
        let temp = TempDir::new().unwrap();
        let config = Config::with_config_dir(temp.path().join("nested/schedule"));

        ensure_directories(&config).await.unwrap();

        assert!(config.config_dir.is_dir());
        assert!(config.backup_dir().is_dir());
    }
}
