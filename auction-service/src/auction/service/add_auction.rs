use {
    super::Service,
    crate::auction::entities,
};

pub struct AddAuctionInput {
    pub auction: entities::Auction,
}

impl Service {
    /// Persists the auction as given. No status validation is applied.
    #[tracing::instrument(skip_all, fields(auction_id), err(level = tracing::Level::TRACE))]
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, entities::AuctionError> {
        tracing::Span::current().record("auction_id", input.auction.id.as_str());
        self.repo.add_auction(input.auction).await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to add auction");
            entities::AuctionError::Internal("Error trying to insert auction".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            repository::MockDatabase,
            service::{
                get_auction::GetAuctionInput,
                tests::auction_created_ago,
            },
        },
        std::time::Duration,
    };

    #[tokio::test]
    async fn test_add_auction() {
        let (service, _) = Service::new_in_memory();
        let auction = auction_created_ago(Duration::ZERO);

        let added = service
            .add_auction(AddAuctionInput {
                auction: auction.clone(),
            })
            .await
            .unwrap();
        assert_eq!(added, auction);

        let stored = service
            .get_auction(GetAuctionInput {
                auction_id: auction.id.clone(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, entities::AuctionStatus::Active);
        assert_eq!(
            stored.creation_time.unix_timestamp(),
            auction.creation_time.unix_timestamp()
        );
    }

    #[tokio::test]
    async fn test_add_auction_keeps_given_status() {
        let (service, _) = Service::new_in_memory();
        let mut auction = auction_created_ago(Duration::ZERO);
        auction.status = entities::AuctionStatus::Completed;

        service
            .add_auction(AddAuctionInput {
                auction: auction.clone(),
            })
            .await
            .unwrap();
        let stored = service
            .get_auction(GetAuctionInput {
                auction_id: auction.id,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, entities::AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_add_auction_when_db_fails() {
        let mut db = MockDatabase::default();
        db.expect_add_auction()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection reset")));
        let service = Service::new_with_db(db);

        let result = service
            .add_auction(AddAuctionInput {
                auction: auction_created_ago(Duration::ZERO),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            entities::AuctionError::Internal("Error trying to insert auction".to_string())
        );
    }
}
