//! Background sweep of expired verification codes
//!
//! Verify already discards expired entries lazily; the sweep only bounds
//! memory when codes are issued and never verified.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use vc_core::services::verification::CodeStore;

/// Handle to a running sweeper task; the task stops when this is dropped
#[derive(Debug)]
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper
    pub fn stop(self) {
        self.handle.abort();
    }

    /// Whether the task has finished
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a task that purges expired codes every `interval`
///
/// Must be called from within a tokio runtime. The first sweep happens one
/// full `interval` after spawning.
pub fn spawn_expiry_sweeper<C>(store: Arc<C>, interval: Duration) -> SweeperHandle
where
    C: CodeStore + 'static,
{
    info!(
        interval_secs = interval.as_secs(),
        "Verification code sweeper started"
    );

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let purged = store.purge_expired();
            if purged > 0 {
                debug!(
                    purged,
                    remaining = store.len(),
                    event = "otp_sweep",
                    "Swept expired verification codes"
                );
            }
        }
    });

    SweeperHandle { handle }
}
