mod auction;
mod error;

pub use {
    auction::*,
    error::*,
};
