use {
    super::{
        entities,
        models::{
            Auction,
            AuctionFilter,
            AuctionStatus,
            Database,
        },
    },
    async_trait::async_trait,
    std::{
        collections::HashMap,
        sync::{
            atomic::{
                AtomicUsize,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
    tokio::sync::RwLock,
};

#[derive(Debug, Default)]
struct InMemoryState {
    auctions:               RwLock<HashMap<entities::AuctionId, Auction>>,
    find_calls:             AtomicUsize,
    running_updates:        AtomicUsize,
    max_concurrent_updates: AtomicUsize,
    update_calls:           AtomicUsize,
}

/// Store used by tests that need real concurrent reads and writes.
/// Clones share the same records and counters.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDatabase {
    state:         Arc<InMemoryState>,
    find_delay:    Option<Duration>,
    update_delay:  Option<Duration>,
    panic_on_find: bool,
}

impl AuctionFilter {
    fn matches(&self, auction: &Auction) -> bool {
        self.status.map_or(true, |status| auction.status == status)
            && self
                .category
                .as_ref()
                .map_or(true, |category| &auction.category == category)
            && self.product_name.as_ref().map_or(true, |name| {
                auction
                    .product_name
                    .to_lowercase()
                    .contains(&name.to_lowercase())
            })
    }
}

impl InMemoryDatabase {
    pub fn with_find_delay(mut self, delay: Duration) -> Self {
        self.find_delay = Some(delay);
        self
    }

    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = Some(delay);
        self
    }

    /// Makes every expired-auction lookup panic, as a crashing store driver would.
    pub fn with_find_panic(mut self) -> Self {
        self.panic_on_find = true;
        self
    }

    pub fn find_calls(&self) -> usize {
        self.state.find_calls.load(Ordering::SeqCst)
    }

    pub fn max_concurrent_updates(&self) -> usize {
        self.state.max_concurrent_updates.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.state.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn add_auction(&self, auction: &Auction) -> anyhow::Result<()> {
        let mut auctions = self.state.auctions.write().await;
        if auctions.contains_key(&auction.id) {
            return Err(anyhow::anyhow!("Duplicate auction id {}", auction.id));
        }
        auctions.insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> anyhow::Result<Option<Auction>> {
        Ok(self.state.auctions.read().await.get(auction_id).cloned())
    }

    async fn get_auctions(&self, filter: &AuctionFilter) -> anyhow::Result<Vec<Auction>> {
        let mut auctions: Vec<Auction> = self
            .state
            .auctions
            .read()
            .await
            .values()
            .filter(|auction| filter.matches(auction))
            .cloned()
            .collect();
        auctions.sort_by_key(|auction| auction.creation_time);
        Ok(auctions)
    }

    async fn get_expired_auctions(
        &self,
        status: AuctionStatus,
        created_before: i64,
    ) -> anyhow::Result<Vec<Auction>> {
        self.state.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_find {
            panic!("in-memory store crashed");
        }
        if let Some(delay) = self.find_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .state
            .auctions
            .read()
            .await
            .values()
            .filter(|auction| auction.status == status && auction.creation_time < created_before)
            .cloned()
            .collect())
    }

    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> anyhow::Result<bool> {
        self.state.update_calls.fetch_add(1, Ordering::SeqCst);
        let running = self.state.running_updates.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .max_concurrent_updates
            .fetch_max(running, Ordering::SeqCst);
        match self.update_delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        let updated = match self.state.auctions.write().await.get_mut(auction_id) {
            Some(auction) if auction.status == from => {
                auction.status = to;
                true
            }
            _ => false,
        };
        self.state.running_updates.fetch_sub(1, Ordering::SeqCst);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::repository::ProductCondition,
    };

    fn auction(product_name: &str) -> Auction {
        Auction {
            id:            "auction-1".to_string(),
            product_name:  product_name.to_string(),
            category:      "Photography".to_string(),
            description:   "Film camera from 1975".to_string(),
            condition:     ProductCondition::Used,
            status:        AuctionStatus::Active,
            creation_time: 1714566645,
        }
    }

    #[test]
    fn test_filter_matches() {
        let model = auction("Vintage Camera");
        assert!(AuctionFilter::default().matches(&model));
        assert!(AuctionFilter {
            status:       Some(AuctionStatus::Active),
            category:     Some("Photography".to_string()),
            product_name: Some("camera".to_string()),
        }
        .matches(&model));
        assert!(!AuctionFilter {
            status: Some(AuctionStatus::Completed),
            ..Default::default()
        }
        .matches(&model));
        assert!(!AuctionFilter {
            category: Some("Books".to_string()),
            ..Default::default()
        }
        .matches(&model));
    }

    #[test]
    fn test_filter_treats_wildcards_literally() {
        let filter = AuctionFilter {
            product_name: Some("_".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&auction("Vintage Camera")));
        assert!(filter.matches(&auction("camera_v2")));

        let filter = AuctionFilter {
            product_name: Some("100%".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&auction("100 pieces")));
        assert!(filter.matches(&auction("100% wool")));
    }
}
