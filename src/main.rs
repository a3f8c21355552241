//! Shop Cache - ops server for the catalog caches
//!
//! Builds the façades once, runs the expiry sweep and serves the
//! statistics and invalidation endpoints.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_cache::api::create_router;
use shop_cache::{spawn_cleanup_task, AppState, CacheRegistry, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info", overridable with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shop Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: product_ttl={}s, category_ttl={}s, inventory_ttl={}s, search_capacity={}, port={}, cleanup_interval={}s",
        config.product.ttl.as_secs(),
        config.category.ttl.as_secs(),
        config.inventory.ttl.as_secs(),
        config.product.search_capacity,
        config.server_port,
        config.cleanup_interval
    );

    let caches = CacheRegistry::from_config(&config);

    let cleanup_handle = if config.cleanup_interval > 0 {
        info!("Background expiry sweep started");
        Some(spawn_cleanup_task(
            caches.clone(),
            Duration::from_secs(config.cleanup_interval),
        ))
    } else {
        warn!("Expiry sweep disabled, expired entries are only dropped on read");
        None
    };

    let app = create_router(AppState::new(caches));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then stops the sweep.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
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
                warn!("Failed to install SIGTERM handler: {}", err);
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiry sweep aborted");
    }
}
