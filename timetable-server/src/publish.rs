//! Snapshot publishing and the refresh loop.
//!
//! The publisher owns the shared "current snapshot" reference. One
//! background task refreshes it (at startup and on every tick of a fixed
//! interval); any number of queries read it concurrently. Readers get the
//! old snapshot or the new one, never a torn mix: a refresh swaps one `Arc`
//! under a write lock, and a query that captured the old reference keeps
//! using it until its handle drops, at which point the displaced archive is
//! deleted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::feed::{FeedError, Snapshot};
use crate::fetch::{FetchError, Fetcher, Transport};

/// Why a refresh cycle failed.
///
/// A failed cycle never unpublishes the previous snapshot; it is logged and
/// retried at the next scheduled tick.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// Publishes the current timetable snapshot.
pub struct TimetablePublisher<T> {
    fetcher: Arc<Fetcher<T>>,
    feed_url: String,
    current: Arc<RwLock<Option<Arc<Snapshot>>>>,
}

impl<T> Clone for TimetablePublisher<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            feed_url: self.feed_url.clone(),
            current: Arc::clone(&self.current),
        }
    }
}

impl<T: Transport> TimetablePublisher<T> {
    pub fn new(fetcher: Fetcher<T>, feed_url: impl Into<String>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            feed_url: feed_url.into(),
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// The currently published snapshot, or `None` before the first
    /// successful refresh.
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.read().await.clone()
    }

    /// Run one fetch-and-install cycle, returning the installed snapshot.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, RefreshError> {
        let archive = self.fetcher.fetch(&self.feed_url).await?;
        let snapshot = Arc::new(Snapshot::open(archive)?);

        let previous = {
            let mut current = self.current.write().await;
            current.replace(Arc::clone(&snapshot))
        };
        // the displaced snapshot is disposed once the last query holding it
        // finishes
        drop(previous);

        Ok(snapshot)
    }

    /// Refresh at startup and then on every tick of `period`, forever.
    pub async fn run(self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        loop {
            // the first tick fires immediately, giving the startup refresh
            interval.tick().await;
            match self.refresh().await {
                Ok(snapshot) => info!(
                    path = %snapshot.path().display(),
                    validator = snapshot.validator().unwrap_or("none"),
                    created = %snapshot.created_at(),
                    "timetable snapshot installed"
                ),
                Err(err) => error!(
                    error = %err,
                    "timetable refresh failed; keeping previous snapshot"
                ),
            }
        }
    }
}
