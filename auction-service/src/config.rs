use {
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::time::Duration,
};

mod server;

pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(5 * 60);
const DEFAULT_SWEEP_INTERVAL: &str = "30s";
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

// `Options` is the top-level command line definition of the auction service.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub auction: AuctionOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct AuctionOptions {
    /// How long an auction stays active after creation, e.g. "5m" or "90s".
    /// Unset or malformed values fall back to 5 minutes.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    pub auction_interval: Option<String>,

    /// How often active auctions are checked for expiration.
    #[arg(long = "sweep-interval")]
    #[arg(env = "AUCTION_SWEEP_INTERVAL")]
    #[arg(default_value = DEFAULT_SWEEP_INTERVAL)]
    #[arg(value_parser = parse_sweep_interval)]
    pub sweep_interval: Duration,
}

impl AuctionOptions {
    pub fn auction_interval(&self) -> Duration {
        resolve_auction_interval(self.auction_interval.as_deref())
    }
}

/// Parses the active window of an auction. Never fails: anything that is not a
/// valid duration resolves to [`DEFAULT_AUCTION_INTERVAL`].
pub fn resolve_auction_interval(raw: Option<&str>) -> Duration {
    match raw.map(|raw| humantime::parse_duration(raw.trim())) {
        Some(Ok(interval)) => interval,
        _ => DEFAULT_AUCTION_INTERVAL,
    }
}

fn parse_sweep_interval(raw: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(raw).map_err(|e| e.to_string())?;
    if interval.is_zero() {
        return Err("sweep interval must be greater than zero".to_string());
    }
    if interval > MAX_SWEEP_INTERVAL {
        return Err(format!(
            "sweep interval must not exceed {}",
            humantime::format_duration(MAX_SWEEP_INTERVAL)
        ));
    }
    Ok(interval)
}
