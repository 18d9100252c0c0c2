use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheFactory, CacheLayer};
use crate::config::get_config;
use crate::runtime::sweeper::{ExpirySweeper, SweeperHandle};
use crate::services::{LinkService, Resolver};
use crate::storage::{LinkStore, StoreFactory};

const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Shared handles produced by startup, consumed by whatever front end
/// drives the process.
pub struct AppContext {
    pub store: Arc<dyn LinkStore>,
    pub cache: Arc<dyn CacheLayer>,
    pub resolver: Arc<Resolver>,
    pub link_service: Arc<LinkService>,
    pub sweeper: SweeperHandle,
}

/// Wires up storage, cache, services and the background sweeper.
pub async fn prepare_startup() -> Result<AppContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let store = StoreFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.backend_name());

    let cache = CacheFactory::create()
        .await
        .context("Failed to create cache layer")?;

    let resolver = Arc::new(Resolver::new(store.clone(), cache.clone()));
    let link_service = Arc::new(LinkService::new(
        store.clone(),
        cache.clone(),
        config.features.code_length,
    ));

    let sweeper = ExpirySweeper::new(
        store.clone(),
        Duration::from_secs(config.sweeper.interval_secs),
    )
    .spawn();
    debug!(
        "Expiry sweeper started, interval {}s",
        config.sweeper.interval_secs
    );

    info!("Startup completed in {:?}", start_time.elapsed());

    Ok(AppContext {
        store,
        cache,
        resolver,
        link_service,
        sweeper,
    })
}

/// Blocks until Ctrl+C, then stops background tasks within a bounded
/// timeout.
pub async fn listen_for_shutdown(ctx: AppContext) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping background tasks...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    let shutdown_result = timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        ctx.sweeper.stop(),
    )
    .await;

    match shutdown_result {
        Ok(()) => info!("All shutdown tasks completed successfully"),
        Err(_) => error!(
            "Shutdown tasks timed out after {} seconds! Forcing exit.",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }

    info!("Shutting down...");
}
