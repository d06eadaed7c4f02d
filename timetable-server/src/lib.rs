//! Timetable server.
//!
//! Answers "what trips run from station A to station B, starting now?"
//! against a periodically refreshed GTFS schedule feed. A background task
//! downloads the feed (conditionally, keyed on the origin's freshness
//! marker), publishes it as an immutable snapshot, and the web layer runs
//! station and trip queries against whichever snapshot is current.

pub mod feed;
pub mod fetch;
pub mod publish;
pub mod timetable;
pub mod web;

#[cfg(test)]
pub(crate) mod testutil;
