//! Conditional feed acquisition.
//!
//! The origin distributes the schedule as a zip archive and advertises a
//! freshness marker (`Last-Modified`). [`Fetcher`] keeps one downloaded
//! archive per URL and revalidates it with a cheap probe before each reuse,
//! so an unchanged feed is never downloaded twice. The network itself stays
//! behind the [`Transport`] contract.

mod client;
mod error;
mod fetcher;

pub use client::{DEFAULT_FEED_URL, FetchConfig, HttpTransport, Transport};
pub use error::FetchError;
pub use fetcher::Fetcher;
