use imis::domain::StoreConfig;
use server_http::{build_router, AppState};
use shared::config::Config;
use std::sync::Arc;
use storage_engine::ExpiringStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before the subscriber so RUST_LOG from the file applies
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting imis HTTP Server...");

    match dotenv {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    // Load configuration from environment variables
    let config = Config::from_env();
    let store_config = StoreConfig::from_config(&config)?;

    let store = ExpiringStore::new(store_config);
    info!(
        "Store ready: default ttl {}ms, override range [{}, {}]ms, {:?} reads",
        store_config.expiry.default_ttl().as_millis(),
        store_config.expiry.min_ttl().as_millis(),
        store_config.expiry.max_ttl().as_millis(),
        store.config().read_policy
    );

    // Initialize state
    let state = AppState::new(Arc::new(store), config.token.as_str());

    // Build router
    let router = build_router(state, &config);

    // Start server
    let listener = TcpListener::bind(&config.host).await?;

    info!("HTTP Server listening on http://{}", config.host);

    // Graceful shutdown handler
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete. Pending evictions abandoned.");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
