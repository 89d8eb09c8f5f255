//! Mandap rental server binary.
//!
//! Serves the shop catalog, order workflow and role-guarded back
//! office over HTTP.
//!
//! # Architecture
//!
//! - Axum web framework with tower-sessions for session state
//! - Document-store seam over an in-memory store
//! - Argon2id password hashing in the in-memory credential backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use mandap_server::config::MandapConfig;
use mandap_server::services::auth::MemoryIdentityBackend;
use mandap_server::state::AppState;
use mandap_server::store::MemoryStore;
use mandap_server::{app, seed_superadmin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = MandapConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mandap_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build application state over the in-memory store and backend
    let store = Arc::new(MemoryStore::new());
    let backend = Arc::new(MemoryIdentityBackend::new());
    let state = AppState::new(config.clone(), store, backend);

    // Provision the startup superadmin, if configured
    seed_superadmin(&state)
        .await
        .expect("Failed to seed superadmin");

    let router = app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("mandap server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
