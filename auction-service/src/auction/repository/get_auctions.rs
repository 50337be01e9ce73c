use {
    super::{
        models::AuctionFilter,
        Repository,
    },
    crate::auction::entities,
};

impl Repository {
    pub async fn get_auctions(
        &self,
        filter: &AuctionFilter,
    ) -> anyhow::Result<Vec<entities::Auction>> {
        Ok(self
            .db
            .get_auctions(filter)
            .await?
            .into_iter()
            .filter_map(|auction| {
                let id = auction.id.clone();
                entities::Auction::try_from(auction)
                    .map_err(|e| {
                        tracing::error!(
                            error = ?e,
                            auction_id = id,
                            "Failed to convert auction to entity"
                        );
                    })
                    .ok()
            })
            .collect())
    }
}
