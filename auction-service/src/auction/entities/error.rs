use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum AuctionError {
    /// Internal error occurred while reading or writing the auction store
    Internal(String),
}

impl fmt::Display for AuctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AuctionError {}
