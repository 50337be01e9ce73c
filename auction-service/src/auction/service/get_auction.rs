use {
    super::Service,
    crate::auction::entities,
};

pub struct GetAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    pub async fn get_auction(
        &self,
        input: GetAuctionInput,
    ) -> Result<Option<entities::Auction>, entities::AuctionError> {
        self.repo.get_auction(&input.auction_id).await.map_err(|e| {
            tracing::error!(
                error = ?e,
                auction_id = input.auction_id,
                "Failed to get auction"
            );
            entities::AuctionError::Internal("Error trying to find auction".to_string())
        })
    }
}
