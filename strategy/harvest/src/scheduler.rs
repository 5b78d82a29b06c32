//! Periodic scheduler running harvest cycles back to back.
//!
//! A cycle always runs to completion. The next one starts `interval` after the
//! previous one returned, so slow cycles push the schedule back instead of
//! overlapping. Errors from a cycle are logged and never end the loop; only
//! the stop signal does.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{error, info};

use crate::error::HarvestResult;

/// A unit of work run once per scheduling period.
#[async_trait]
pub trait Cycle: Send + Sync {
    async fn run_cycle(&self) -> HarvestResult<()>;
}

/// Runs a `Cycle` forever, pausing `interval` after each completion
pub struct Scheduler {
    interval: Duration,
    stop: watch::Receiver<bool>,
}

impl Scheduler {
    /// Creates a new `Scheduler`
    ///
    /// # Arguments
    /// * `interval` - Pause between the end of a cycle and the start of the next
    /// * `stop` - Flips to `true` to stop the loop; checked between cycles only
    pub fn new(interval: Duration, stop: watch::Receiver<bool>) -> Self {
        Self { interval, stop }
    }

    /// Runs cycles until the stop signal is raised.
    ///
    /// # Returns
    /// The number of cycles that were run.
    pub async fn run<C: Cycle + ?Sized>(&mut self, cycle: &C) -> u64 {
        let mut completed = 0u64;

        loop {
            if *self.stop.borrow() {
                break;
            }

            let iteration = completed + 1;
            info!(iteration, "starting harvest cycle");
            if let Err(e) = cycle.run_cycle().await {
                error!(iteration, error = %e, "harvest cycle aborted");
            }
            completed = iteration;

            info!(
                iteration,
                next_in_ms = self.interval.as_millis() as u64,
                "harvest cycle complete"
            );
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = stopped(&mut self.stop) => break,
            }
        }

        info!(cycles = completed, "scheduler stopped");
        completed
    }
}

/// Resolves once the stop flag is raised. A dropped sender can no longer
/// raise it, so the future then stays pending.
async fn stopped(stop: &mut watch::Receiver<bool>) {
    loop {
        if *stop.borrow_and_update() {
            return;
        }
        if stop.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
