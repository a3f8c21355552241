//! Expiry Sweep Task
//!
//! Expired entries are already invisible to readers; the sweep only bounds
//! how long they keep occupying memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::facade::CacheRegistry;

/// Purges every façade once, returning the number of entries removed.
pub fn run_cleanup_pass(caches: &CacheRegistry) -> usize {
    caches
        .all()
        .iter()
        .map(|cache| {
            let removed = cache.purge_expired();
            if removed > 0 {
                debug!(cache = cache.name(), removed, "purged expired entries");
            }
            removed
        })
        .sum()
}

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The returned handle is aborted on shutdown.
pub fn spawn_cleanup_task(caches: CacheRegistry, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = run_cleanup_pass(&caches);
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
