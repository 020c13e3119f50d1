//! Contact Book - Main entry point

use anyhow::{Context, Result};
use contact_book::repositories::{
    ContactRepository, InMemoryContactRepository, MongoContactRepository,
};
use contact_book::server::spawn_session_sweeper;
use contact_book::services::ContactServiceImpl;
use contact_book::session::FlashStore;
use contact_book::{build_app, run_server, AppState, Config, MetricsTracker, StorageBackend};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let fallback_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let contact_repo: Arc<dyn ContactRepository> = match config.storage {
        StorageBackend::Mongodb => {
            info!(
                database = %config.mongodb_database,
                "Connecting to MongoDB"
            );
            let repo = MongoContactRepository::connect(&config.mongodb_uri, &config.mongodb_database)
                .await
                .context("Failed to connect to MongoDB")?;
            Arc::new(repo)
        }
        StorageBackend::Memory => {
            info!("Using in-memory contact store; contacts are lost on exit");
            Arc::new(InMemoryContactRepository::new())
        }
    };

    let metrics = MetricsTracker::new();
    let contacts = Arc::new(ContactServiceImpl::new(
        contact_repo,
        config.phone_locale,
        metrics.clone(),
    ));

    let flash = FlashStore::new(config.session_ttl_secs);
    let sweeper = spawn_session_sweeper(flash.clone(), Duration::from_secs(config.session_ttl_secs));

    let state = AppState::new(contacts, flash, config.staff.clone(), metrics.clone());
    let app = build_app(state, &config.static_dir);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        store = %config.storage,
        phone_locale = %config.phone_locale,
        "Contact Book starting"
    );
    run_server(listener, app, metrics).await?;

    sweeper.abort();
    info!("Contact Book shutdown complete");
    Ok(())
}
