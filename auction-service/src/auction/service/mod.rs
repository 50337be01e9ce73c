use {
    super::repository::{
        Database,
        Repository,
    },
    crate::config::AuctionOptions,
    std::{
        sync::{
            atomic::AtomicBool,
            Arc,
        },
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

pub mod add_auction;
pub mod close_expired_auctions;
pub mod get_auction;
pub mod get_auctions;
pub mod update_auction_status;
pub mod workers;

#[derive(Clone, Debug)]
pub struct Config {
    /// How long an auction stays active after creation.
    pub auction_interval: Duration,
    /// Period of the expiration worker, independent of `auction_interval`.
    pub sweep_interval:   Duration,
}

impl From<&AuctionOptions> for Config {
    fn from(options: &AuctionOptions) -> Self {
        Self {
            auction_interval: options.auction_interval(),
            sweep_interval:   options.sweep_interval,
        }
    }
}

pub struct ServiceInner {
    config:                    Config,
    repo:                      Arc<Repository>,
    task_tracker:              TaskTracker,
    expiration_worker_running: AtomicBool,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(db: impl Database, config: Config, task_tracker: TaskTracker) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(Repository::new(db)),
            task_tracker,
            expiration_worker_running: AtomicBool::new(false),
        }))
    }
}
