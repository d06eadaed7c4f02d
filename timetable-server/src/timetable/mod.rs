//! Timetable queries against a snapshot.
//!
//! Pure scans: each query receives its own [`crate::feed::Snapshot`]
//! reference and touches no shared mutable state, so no locking happens
//! here. All schedule comparisons are lexicographic on the feed's padded
//! `"HH:MM:SS"` / `"YYYYMMDD"` string encodings (see [`QueryMoment`]).

mod clock;
mod error;
mod station;
mod trips;

pub use clock::QueryMoment;
pub use error::QueryError;
pub use station::{Station, Stop, UNKNOWN_STOP, find_station};
pub use trips::{Trip, find_trips_to};
