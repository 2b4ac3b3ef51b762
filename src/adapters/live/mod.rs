//! Live adapters backed by the network and the system clock.

pub mod clock;
pub mod google;
pub mod http_fetcher;
