use {
    super::Service,
    futures::FutureExt,
    std::{
        panic::AssertUnwindSafe,
        sync::atomic::Ordering,
    },
    tokio::time::{
        interval_at,
        Instant,
        MissedTickBehavior,
    },
    tokio_util::sync::CancellationToken,
};

/// Clears the service's running flag when the worker task ends, even by panic.
struct ExpirationWorkerGuard(Service);

impl Drop for ExpirationWorkerGuard {
    fn drop(&mut self) {
        self.0
            .expiration_worker_running
            .store(false, Ordering::Release);
    }
}

impl Service {
    /// Periodically closes expired auctions until `exit_token` is cancelled.
    ///
    /// The first sweep runs one sweep interval after the loop starts. A sweep
    /// that outlasts the interval delays the next one instead of bunching ticks.
    pub async fn run_expiration_loop(&self, exit_token: CancellationToken) -> anyhow::Result<()> {
        tracing::info!(
            auction_interval = ?self.config.auction_interval,
            sweep_interval = ?self.config.sweep_interval,
            "Starting auction expiration worker..."
        );
        let sweep_period = self.config.sweep_interval;
        let mut sweep_interval = interval_at(Instant::now() + sweep_period, sweep_period);
        sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = exit_token.cancelled() => break,
                _ = sweep_interval.tick() => {
                    match AssertUnwindSafe(self.close_expired_auctions()).catch_unwind().await {
                        Ok(Ok(result)) if result.found > 0 => {
                            tracing::info!(result = ?result, "Expired auctions processed");
                        }
                        Ok(Ok(_)) => {}
                        Ok(Err(e)) => {
                            tracing::error!(error = ?e, "Error finding expired auctions");
                        }
                        Err(_) => {
                            tracing::error!("Auction expiration sweep panicked");
                        }
                    }
                }
            }
        }
        tracing::info!("Shutting down auction expiration worker...");
        Ok(())
    }

    /// Spawns the expiration worker on the service task tracker.
    ///
    /// Returns false without spawning when a worker is already running for this service.
    pub fn start_expiration_worker(&self, exit_token: CancellationToken) -> bool {
        if self
            .expiration_worker_running
            .swap(true, Ordering::AcqRel)
        {
            tracing::warn!("Auction expiration worker is already running");
            return false;
        }
        self.task_tracker.spawn({
            let guard = ExpirationWorkerGuard(self.clone());
            async move {
                if let Err(e) = guard.0.run_expiration_loop(exit_token).await {
                    tracing::error!(error = ?e, "Auction expiration worker failed");
                }
            }
        });
        true
    }

    /// Waits for every task spawned by the service. Cancel the worker's token first.
    pub async fn shutdown(&self) {
        self.task_tracker.close();
        self.task_tracker.wait().await;
    }
}
