use {
    super::Service,
    crate::auction::entities,
};

pub struct UpdateAuctionStatusInput {
    pub auction_id: entities::AuctionId,
    pub status:     entities::AuctionStatus,
}

impl Service {
    /// Returns true if the stored status changed. Unknown ids and disallowed
    /// transitions are not errors.
    #[tracing::instrument(skip_all, fields(auction_id, status), err(level = tracing::Level::TRACE))]
    pub async fn update_auction_status(
        &self,
        input: UpdateAuctionStatusInput,
    ) -> Result<bool, entities::AuctionError> {
        tracing::Span::current().record("auction_id", input.auction_id.as_str());
        tracing::Span::current().record("status", format!("{:?}", input.status));

        self.repo
            .update_auction_status(&input.auction_id, input.status)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to update auction status");
                entities::AuctionError::Internal(
                    "Error trying to update auction status".to_string(),
                )
            })
    }
}
