//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries. Reads
//! already hide expired entries; the sweeper only reclaims their memory.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Cache;

/// Interval between sweep passes when none is configured.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

// == Sweeper Handle ==
/// Owns the running sweeper task and the signal that stops it.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals the sweeper to stop and waits for the task to finish.
    ///
    /// A pass already holding the lock completes before the task exits.
    pub async fn shutdown(self) {
        // Receiver may already be gone if the task ended on its own
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("Sweeper task ended abnormally: {}", e);
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a background task that sweeps `cache` every `interval`.
///
/// The first pass runs one full interval after spawning. The task runs until
/// [`SweeperHandle::shutdown`] is called or the handle is dropped.
///
/// # Example
/// ```ignore
/// let cache = Cache::new();
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweeper(cache: Cache, interval: Duration) -> SweeperHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run_sweeper(cache, interval, shutdown_rx));

    SweeperHandle { shutdown_tx, task }
}

async fn run_sweeper(cache: Cache, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    info!(
        "Starting expiry sweeper with interval of {} seconds",
        interval.as_secs_f64()
    );

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = shutdown_rx.changed() => {
                // Err means the sender was dropped; stop either way
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
                continue;
            }
        }

        let removed = cache.sweep();

        if removed > 0 {
            info!("Expiry sweep: removed {} expired entries", removed);
        } else {
            debug!("Expiry sweep: no expired entries found");
        }
    }

    info!("Expiry sweeper stopped");
}
