use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use shift_schedule::config::manager::ensure_directories;
use shift_schedule::constants::defaults;
use shift_schedule::web::start_web_server;
use shift_schedule::{ConfigManager, DataStore, TracingObserver};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("shift_schedule=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let config_manager = ConfigManager::new(defaults::SETTINGS_DIR).await?;
    let config = config_manager.get_current_config();

    ensure_directories(&config).await?;

    let store = Arc::new(DataStore::new(&config, Arc::new(TracingObserver)));
    let existing_backups = store.rotator().list_backups().map(|b| b.len()).unwrap_or(0);

    info!("{}", "=".repeat(60));
    info!("Shift Schedule Manager started");
    info!("Listening on: http://{}", config.bind_address());
    info!("Web root: {}", config.web_dir.display());
    info!("Data file: {}", config.data_file().display());
    info!(
        "Backups: {} ({} present, keeping {})",
        config.backup_dir().display(),
        existing_backups,
        config.retention_count
    );
    info!("{}", "=".repeat(60));

    start_web_server(config, store).await?;

    Ok(())
}
