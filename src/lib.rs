pub mod analysis;
pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod export;
pub mod models;
pub mod summary;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::core_state::{CoreError, CoreState};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] CoreError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load configuration, start the API server and block until Ctrl-C.
pub fn run() -> Result<(), StartupError> {
    init_tracing();
    tracing::info!("Vaidya starting v{}", config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    // The blocking HTTP client must not be dropped inside the runtime;
    // this handle outlives it.
    let state = Arc::new(CoreState::new(config));
    state.open_db()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(Arc::clone(&state)));
    drop(runtime);
    drop(state);
    result
}

async fn serve(state: Arc<CoreState>) -> Result<(), StartupError> {
    let addr = state.config.bind_addr;
    let server = api::start_server(state, addr).await?;
    tracing::info!(addr = %server.addr, "Vaidya API listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown().await;
    Ok(())
}
