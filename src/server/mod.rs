//! HTTP surface: an axum router over the shared stores.

pub mod error;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::core::{storage::Stores, time::Clock};
use crate::errors::{BudgetError, Result};

pub use error::{panic_response, ApiError, ApiResult, MessageBody};
pub use routes::build_router;

/// Shared handler state. Store calls are synchronous and may touch the
/// filesystem, so handlers run them through [`blocking`].
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, config: AppConfig) -> Self {
        Self {
            stores,
            clock,
            config: Arc::new(config),
        }
    }
}

/// Runs a store operation on tokio's blocking pool.
pub async fn blocking<T, F>(op: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|err| {
            ApiError(BudgetError::StorageError(format!(
                "store task failed: {err}"
            )))
        })?
        .map_err(ApiError::from)
}

/// Serves until ctrl-c is received.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.socket_addr();
    let environment = state.config.environment.clone();
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, %environment, "budget tracker listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
