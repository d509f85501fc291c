//! Recipe Cache - recipe content API server
//!
//! Serves recipe pages from an in-memory store, fronted by a TTL page cache.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipe_cache::{create_router, AppState, Config, MemoryRecipeRepository};

/// Main entry point for the recipe API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the recipe store seed file, if any
/// 4. Create the page cache and router
/// 5. Serve until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recipe API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, default_ttl={}min, recipes_path={:?}",
        config.server_port, config.default_ttl_minutes, config.recipes_path
    );

    let repository = match &config.recipes_path {
        Some(path) => load_recipes(path).await?,
        None => {
            warn!("RECIPES_PATH not set, starting with an empty recipe store");
            MemoryRecipeRepository::new(Vec::new())
        }
    };
    info!(recipes = repository.len(), "Recipe store initialized");

    let state = AppState::from_config(&config, Arc::new(repository));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn load_recipes(path: &Path) -> anyhow::Result<MemoryRecipeRepository> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read recipes from {}", path.display()))?;
    MemoryRecipeRepository::from_json(&raw)
        .with_context(|| format!("failed to parse recipes in {}", path.display()))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
