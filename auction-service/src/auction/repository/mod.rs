use {
    super::entities,
    tokio::sync::Mutex,
};

mod add_auction;
mod get_auction;
mod get_auctions;
mod get_expired_auctions;
#[cfg(test)]
mod in_memory;
mod models;
mod update_auction_status;

#[cfg(test)]
pub use in_memory::InMemoryDatabase;
pub use models::*;

#[derive(Debug)]
pub struct Repository {
    pub db:      Box<dyn Database>,
    /// Serializes every status write, whether manual or issued by the expiration worker.
    status_lock: Mutex<()>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            db:          Box::new(db),
            status_lock: Mutex::new(()),
        }
    }
}
