use {
    super::Service,
    crate::auction::{
        entities,
        repository::AuctionFilter,
    },
};

#[derive(Clone, Debug, Default)]
pub struct GetAuctionsInput {
    pub status:       Option<entities::AuctionStatus>,
    pub category:     Option<String>,
    pub product_name: Option<String>,
}

impl Service {
    /// Auctions matching every given filter, oldest first.
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Vec<entities::Auction>, entities::AuctionError> {
        let filter = AuctionFilter {
            status:       input.status.map(Into::into),
            category:     input.category,
            product_name: input.product_name,
        };
        self.repo.get_auctions(&filter).await.map_err(|e| {
            tracing::error!(error = ?e, filter = ?filter, "Failed to get auctions");
            entities::AuctionError::Internal("Error trying to find auctions".to_string())
        })
    }
}
