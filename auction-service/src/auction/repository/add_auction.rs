use {
    super::{
        models,
        Repository,
    },
    crate::auction::entities,
};

impl Repository {
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
    ) -> anyhow::Result<entities::Auction> {
        self.db.add_auction(&models::Auction::from(&auction)).await?;
        Ok(auction)
    }
}
