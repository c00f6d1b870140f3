//! classroom-signal binary: loads configuration, installs logging and serves
//! the signaling relay until Ctrl-C.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use classroom_signal::adapters::http::app_router;
use classroom_signal::adapters::{InMemoryRoomStore, SignalingState};
use classroom_signal::config::{AppConfig, ServerConfig};
use classroom_signal::ports::RoomStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let store: Arc<dyn RoomStore> = Arc::new(InMemoryRoomStore::new());
    let state = SignalingState::new(store, config.relay.clone());
    let app = app_router(state, &config);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        path = %config.relay.path,
        environment = ?config.server.environment,
        "classroom-signal listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("classroom-signal stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
