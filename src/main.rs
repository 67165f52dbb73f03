//! Lexia server: vocabulary folders, words and translation over HTTP.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use lexia_api::AppState;
use lexia_core::config::AppConfig;
use lexia_core::error::AppError;
use lexia_database::DatabasePool;
use lexia_service::translate::GoogleTranslateProvider;

#[tokio::main]
async fn main() {
    let env = std::env::var("LEXIA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Lexia v{}", env!("CARGO_PKG_VERSION"));

    let stores = DatabasePool::connect_and_migrate(&config.database)
        .await?
        .stores();

    if !config.translate.has_credentials() {
        tracing::warn!("No translation API key configured; translation requests will fail");
    }
    let translator = GoogleTranslateProvider::new(&config.translate)?;

    let state = AppState::new(
        config,
        stores.folders,
        stores.words,
        stores.users,
        Arc::new(translator),
    );

    lexia_api::serve(state).await
}
