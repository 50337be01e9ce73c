use {
    super::{
        models,
        Repository,
    },
    crate::auction::entities,
    std::time::Duration,
    time::OffsetDateTime,
};

/// Unix second before which an auction counts as expired. Windows reaching past the
/// earliest representable date select nothing.
fn expiration_cutoff(auction_interval: Duration, now: OffsetDateTime) -> i64 {
    time::Duration::try_from(auction_interval)
        .ok()
        .and_then(|interval| now.checked_sub(interval))
        .map_or(i64::MIN, |cutoff| cutoff.unix_timestamp())
}

impl Repository {
    /// Active auctions created before `now - auction_interval`, compared in whole seconds.
    pub async fn get_expired_auctions(
        &self,
        auction_interval: Duration,
        now: OffsetDateTime,
    ) -> anyhow::Result<Vec<entities::AuctionId>> {
        let auctions = self
            .db
            .get_expired_auctions(
                models::AuctionStatus::Active,
                expiration_cutoff(auction_interval, now),
            )
            .await?;
        Ok(auctions.into_iter().map(|auction| auction.id).collect())
    }
}
