mod cli;

use std::sync::Arc;

use crate::cli::{load_env_file, Cli, StorageBackendArg};
use clap::Parser;
use shorturl_core::Registry;
use shorturl_gateway::{App, AppState};
use shorturl_registry::RegistryService;
use shorturl_storage::{InMemoryRepository, MySqlRepository};
use shorturl_telemetry::TelemetryConfig;
use shorturl_validator::Validator;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Must run before parsing so that `.env` values reach clap's env fallbacks.
    let env_file = load_env_file(None);
    let config = Cli::try_parse()?;

    let _telemetry = shorturl_telemetry::init(TelemetryConfig {
        service_name: "shorturl-gateway".to_string(),
        format: config.log_format.into(),
        otlp_endpoint: config.otlp_endpoint.clone(),
    })?;

    match env_file {
        Ok(Some(path)) => debug!(path = %path.display(), "loaded environment file"),
        Ok(None) => {}
        Err(error) => warn!(%error, "cannot load environment file"),
    }

    info!(
        host = %config.host,
        port = config.port,
        storage_backend = %config.storage,
        "starting shorturl gateway"
    );

    let registry: Arc<dyn Registry> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(RegistryService::new(InMemoryRepository::new())),
        StorageBackendArg::Mysql => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("database url is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(database_url).await?;
            if config.migrate {
                repository.migrate().await?;
            }
            Arc::new(RegistryService::new(repository))
        }
    };

    let state = AppState::new(Validator::system(), registry);

    let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => {
            warn!(%error, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
