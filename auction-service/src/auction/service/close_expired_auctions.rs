use {
    super::{
        Config,
        Service,
    },
    crate::auction::entities,
    std::time::Duration,
    time::OffsetDateTime,
    tokio::time::{
        timeout_at,
        Instant,
    },
};

const SWEEP_DEADLINE_MARGIN: Duration = Duration::from_secs(5);
const MIN_SWEEP_DEADLINE: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Auctions selected as expired.
    pub found:   usize,
    pub closed:  usize,
    /// Auctions that were no longer active when their update ran.
    pub skipped: usize,
    pub failed:  usize,
}

impl Config {
    /// Time budget shared by every store call of a single sweep.
    pub fn sweep_deadline(&self) -> Duration {
        self.sweep_interval
            .saturating_sub(SWEEP_DEADLINE_MARGIN)
            .max(MIN_SWEEP_DEADLINE)
    }
}

impl Service {
    /// Closes every active auction older than the configured auction interval.
    ///
    /// Returns an error only when the expired auctions could not be fetched.
    /// Failures of individual updates are logged and counted in the result.
    #[tracing::instrument(skip_all, fields(found, closed, failed))]
    pub async fn close_expired_auctions(&self) -> anyhow::Result<SweepResult> {
        let deadline = Instant::now() + self.config.sweep_deadline();
        let now = OffsetDateTime::now_utc();

        let auction_ids = timeout_at(
            deadline,
            self.repo
                .get_expired_auctions(self.config.auction_interval, now),
        )
        .await
        .map_err(|_| anyhow::anyhow!("Timed out while fetching expired auctions"))??;

        let mut result = SweepResult {
            found: auction_ids.len(),
            ..Default::default()
        };
        for auction_id in auction_ids {
            match timeout_at(
                deadline,
                self.repo
                    .update_auction_status(&auction_id, entities::AuctionStatus::Completed),
            )
            .await
            {
                Ok(Ok(true)) => {
                    tracing::info!(auction_id, "Auction closed automatically");
                    result.closed += 1;
                }
                Ok(Ok(false)) => {
                    tracing::debug!(auction_id, "Auction was already closed");
                    result.skipped += 1;
                }
                Ok(Err(e)) => {
                    tracing::error!(
                        error = ?e,
                        auction_id,
                        "Error updating auction status to completed"
                    );
                    result.failed += 1;
                }
                Err(_) => {
                    tracing::error!(
                        auction_id,
                        "Timed out while updating auction status to completed"
                    );
                    result.failed += 1;
                }
            }
        }

        let span = tracing::Span::current();
        span.record("found", result.found);
        span.record("closed", result.closed);
        span.record("failed", result.failed);
        Ok(result)
    }
}
