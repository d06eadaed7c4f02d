//! Schedule feed archives and immutable snapshots.
//!
//! A [`FeedArchive`] is the raw zip container as downloaded; a [`Snapshot`]
//! is one opened, validated instance of it that queries can scan. Both are
//! cheap to clone and share one reference-counted temp file, which is
//! deleted when the last handle drops.

mod archive;
mod error;
mod snapshot;

pub use archive::FeedArchive;
pub use error::FeedError;
pub use snapshot::{
    CALENDAR_TABLE, STOP_TIMES_TABLE, STOPS_TABLE, Snapshot, SnapshotReader, TRIPS_TABLE,
};

pub(crate) use snapshot::field;
