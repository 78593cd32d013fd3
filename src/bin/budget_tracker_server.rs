use std::sync::Arc;

use anyhow::Context;
use budget_tracker::{
    config::ConfigManager,
    core::{Clock, SystemClock},
    server::{run_server, AppState},
    storage::StorageHandle,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    budget_tracker::init();

    let manager = ConfigManager::from_env();
    let config = manager.load().context("failed to load configuration")?;
    if let Some(path) = manager.config_path() {
        tracing::info!(path = %path.display(), "configuration file loaded");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let storage = StorageHandle::open(&config, clock.clone()).context("failed to open storage")?;
    let state = AppState::new(storage.stores(), clock, config);

    let served = run_server(state).await;
    storage.close().context("failed to close storage")?;
    served
}
