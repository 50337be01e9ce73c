use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Update the status of an auction and return true if the auction was updated.
    ///
    /// Transitions that are not allowed from the stored status, and unknown ids,
    /// leave the store untouched and return false.
    pub async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        new_status: entities::AuctionStatus,
    ) -> anyhow::Result<bool> {
        let _guard = self.status_lock.lock().await;
        let Some(from) = new_status.predecessor() else {
            return Ok(false);
        };
        self.db
            .update_auction_status(auction_id, from.into(), new_status.into())
            .await
    }
}
