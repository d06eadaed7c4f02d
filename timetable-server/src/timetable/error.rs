//! Query error types.

use crate::feed::FeedError;

/// Query-time failures, kept distinguishable so the serving layer can map
/// them to responses (not found vs service unavailable vs server error).
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// No stop name contains the requested fragment
    #[error("station not found: {fragment}")]
    StationNotFound { fragment: String },

    /// Queried before the first successful refresh
    #[error("no timetable snapshot available yet")]
    NoSnapshot,

    /// Structural failure while scanning the snapshot
    #[error(transparent)]
    Feed(#[from] FeedError),
}
