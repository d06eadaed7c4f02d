//! Conditional fetcher with a per-URL freshness cache.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::feed::FeedArchive;

use super::client::Transport;
use super::error::FetchError;

/// Retained state for one feed URL: the archive from the last successful
/// download and the validator the origin returned with it.
struct CacheEntry {
    validator: String,
    archive: FeedArchive,
}

/// Conditional feed fetcher.
///
/// Keeps at most one downloaded archive per URL. Before reusing it, the
/// origin is probed for its current validator: a match serves the cached
/// archive without a download, a probe failure serves the cached archive
/// rather than failing the refresh cycle, and a mismatch triggers a full
/// download. A failed download leaves the cached state untouched.
pub struct Fetcher<T> {
    transport: T,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the archive at `url`, reusing the cached copy when the origin
    /// reports it unchanged.
    pub async fn fetch(&self, url: &str) -> Result<FeedArchive, FetchError> {
        if let Some(cached) = self.revalidate(url).await {
            return Ok(cached);
        }

        let archive = self.transport.download(url).await?;

        // Only retain responses the origin tagged with a validator; an
        // untagged archive cannot be revalidated next time anyway.
        if let Some(validator) = archive.validator() {
            let mut cache = self.cache.write().await;
            cache.insert(
                url.to_string(),
                CacheEntry {
                    validator: validator.to_string(),
                    archive: archive.clone(),
                },
            );
        }

        Ok(archive)
    }

    /// Return the cached archive when the origin reports it unchanged, or
    /// when the origin cannot be probed at all.
    async fn revalidate(&self, url: &str) -> Option<FeedArchive> {
        let cache = self.cache.read().await;
        let entry = cache.get(url)?;

        match self.transport.probe(url).await {
            Err(err) => {
                warn!(url, error = %err, "freshness probe failed; serving cached archive");
                Some(entry.archive.clone())
            }
            Ok(Some(validator)) if validator == entry.validator => {
                debug!(url, "feed unchanged; reusing cached archive");
                Some(entry.archive.clone())
            }
            Ok(_) => None,
        }
    }
}
