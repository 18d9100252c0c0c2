//! Background expiry sweeper.
//!
//! One long-lived task that periodically deletes logically expired links
//! from the store. Iterations are isolated: a failing sweep is logged and
//! the loop continues. The sweeper never touches the cache layer; lingering
//! entries for swept records expire on their own TTL.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::storage::LinkStore;

pub struct ExpirySweeper {
    store: Arc<dyn LinkStore>,
    period: Duration,
}

impl ExpirySweeper {
    pub fn new(store: Arc<dyn LinkStore>, period: Duration) -> Self {
        Self { store, period }
    }

    /// Starts the background task. The first sweep runs immediately, then
    /// once per period.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.sweep_once().await,
                    _ = shutdown_rx.changed() => {
                        debug!("Sweeper shutting down");
                        break;
                    }
                }
            }
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            handle,
        }
    }

    async fn sweep_once(&self) {
        match self.store.delete_expired().await {
            Ok(0) => debug!("Sweep found nothing to delete"),
            Ok(count) => info!("Sweep removed {} expired links", count),
            Err(e) => error!("Sweep iteration failed: {}", e),
        }
    }
}

/// Owns the running sweeper task. `stop` flips the shutdown signal and
/// waits for the task, so no sweep is left in flight.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
