//! Immutable timetable snapshots.

use std::fs::File;

use chrono::{DateTime, Utc};
use zip::ZipArchive;
use zip::result::ZipError;

use super::archive::FeedArchive;
use super::error::FeedError;

/// GTFS table names consumed by this service.
pub const STOPS_TABLE: &str = "stops.txt";
pub const CALENDAR_TABLE: &str = "calendar.txt";
pub const TRIPS_TABLE: &str = "trips.txt";
pub const STOP_TIMES_TABLE: &str = "stop_times.txt";

/// Tables that must be present for a snapshot to be installable.
const REQUIRED_TABLES: [&str; 4] = [STOPS_TABLE, CALENDAR_TABLE, TRIPS_TABLE, STOP_TIMES_TABLE];

/// One fully fetched instance of the schedule feed at a point in time.
///
/// Contents never change after `open` succeeds. Any number of queries may
/// scan the same snapshot concurrently; each gets its own [`SnapshotReader`]
/// and touches no shared mutable state. The backing archive file is deleted
/// once the last handle (snapshot or fetcher cache) drops.
#[derive(Debug)]
pub struct Snapshot {
    archive: FeedArchive,
    created_at: DateTime<Utc>,
}

impl Snapshot {
    /// Open an archive as a snapshot.
    ///
    /// Verifies that the container is a readable zip and that all required
    /// tables are present, so a truncated feed fails the refresh cycle
    /// instead of replacing a good snapshot.
    pub fn open(archive: FeedArchive) -> Result<Self, FeedError> {
        let file = File::open(archive.path())?;
        let mut zip = ZipArchive::new(file)?;

        for table in REQUIRED_TABLES {
            match zip.by_name(table) {
                Ok(_) => {}
                Err(ZipError::FileNotFound) => return Err(FeedError::MissingTable { table }),
                Err(e) => return Err(FeedError::Zip(e)),
            }
        }

        Ok(Self {
            archive,
            created_at: Utc::now(),
        })
    }

    /// When this snapshot was constructed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The origin's freshness marker for the underlying archive.
    pub fn validator(&self) -> Option<&str> {
        self.archive.validator()
    }

    /// Location of the backing archive on disk.
    pub fn path(&self) -> &std::path::Path {
        self.archive.path()
    }

    /// A reader for scanning this snapshot's tables.
    pub fn reader(&self) -> Result<SnapshotReader, FeedError> {
        let file = File::open(self.archive.path())?;
        Ok(SnapshotReader {
            zip: ZipArchive::new(file)?,
        })
    }
}

/// Row-oriented access to the CSV tables inside one snapshot.
///
/// Each call to [`table`](Self::table) yields a fresh streaming reader
/// positioned at the first data row; tables are never loaded into memory
/// whole.
pub struct SnapshotReader {
    zip: ZipArchive<File>,
}

impl SnapshotReader {
    /// Open a named table as a CSV row reader.
    ///
    /// The header row is skipped. Rows are allowed to vary in width so that
    /// short rows surface as [`FeedError::MalformedRow`] at the column that
    /// needed them, rather than as a blanket parse failure.
    pub fn table(
        &mut self,
        table: &'static str,
    ) -> Result<csv::Reader<impl std::io::Read + '_>, FeedError> {
        let entry = match self.zip.by_name(table) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Err(FeedError::MissingTable { table }),
            Err(e) => return Err(FeedError::Zip(e)),
        };

        Ok(csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(entry))
    }
}

/// Column accessor that surfaces short rows as `MalformedRow`.
pub(crate) fn field<'r>(
    record: &'r csv::StringRecord,
    table: &'static str,
    index: usize,
) -> Result<&'r str, FeedError> {
    record.get(index).ok_or(FeedError::MalformedRow {
        table,
        expected: index + 1,
        found: record.len(),
    })
}
