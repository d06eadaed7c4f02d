//! Test support: canned GTFS archives and a scripted feed transport.

use std::collections::VecDeque;
use std::future::Future;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::feed::FeedArchive;
use crate::fetch::{FetchError, Transport};

// Header rows matching the feed's fixed column contract.
pub(crate) const STOPS_HEADER: &str = "stop_id,stop_code,stop_name,stop_desc,stop_lat,stop_lon,zone_id,stop_url,location_type,parent_station\n";
pub(crate) const CALENDAR_HEADER: &str =
    "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n";
pub(crate) const TRIPS_HEADER: &str = "route_id,service_id,trip_id,trip_headsign\n";
pub(crate) const STOP_TIMES_HEADER: &str =
    "trip_id,arrival_time,departure_time,stop_id,stop_sequence,stop_headsign,pickup_type,drop_off_type\n";

/// Build a zip archive with the given (member name, contents) pairs.
pub(crate) fn archive_with(tables: &[(&str, &str)]) -> FeedArchive {
    archive_with_validator(tables, None)
}

pub(crate) fn archive_with_validator(
    tables: &[(&str, &str)],
    validator: Option<&str>,
) -> FeedArchive {
    let file = tempfile::NamedTempFile::new().expect("create temp file");
    {
        let mut zip = ZipWriter::new(file.as_file());
        for (name, contents) in tables {
            zip.start_file(*name, SimpleFileOptions::default())
                .expect("start zip member");
            zip.write_all(contents.as_bytes()).expect("write zip member");
        }
        zip.finish().expect("finish zip");
    }
    FeedArchive::new(file.into_temp_path(), validator.map(str::to_string))
}

/// An archive whose payload is arbitrary bytes rather than a zip.
pub(crate) fn raw_archive(payload: &[u8]) -> FeedArchive {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(payload).expect("write payload");
    FeedArchive::new(file.into_temp_path(), None)
}

/// A complete minimal feed with one trip from Central to Town Hall,
/// departing 08:02:00 and arriving 08:20:00, valid every day of 2020-2030.
pub(crate) fn minimal_feed(validator: Option<&str>) -> FeedArchive {
    let stops = format!(
        "{STOPS_HEADER}\
         S1,,Central Station,,,,,,1,\n\
         S1a,,Platform 1,,,,,,,S1\n\
         S2,,Town Hall Station,,,,,,1,\n\
         S2a,,Platform 3,,,,,,,S2\n"
    );
    let calendar = format!("{CALENDAR_HEADER}C1,1,1,1,1,1,1,1,20200101,20301231\n");
    let trips = format!("{TRIPS_HEADER}R1,C1,T1,\n");
    let stop_times = format!(
        "{STOP_TIMES_HEADER}\
         T1,08:00:00,08:02:00,S1a,1,City Circle,0,0\n\
         T1,08:20:00,08:21:00,S2a,2,City Circle,0,0\n"
    );

    archive_with_validator(
        &[
            ("stops.txt", &stops),
            ("calendar.txt", &calendar),
            ("trips.txt", &trips),
            ("stop_times.txt", &stop_times),
        ],
        validator,
    )
}

/// Outcome served by the next scripted probe.
pub(crate) enum ProbeOutcome {
    /// The probe request itself fails.
    Unreachable,
    /// The probe succeeds with this validator.
    Validator(Option<String>),
}

/// Outcome served by the next scripted download.
pub(crate) enum DownloadOutcome {
    Archive(FeedArchive),
    Status(u16),
}

#[derive(Default)]
struct FakeInner {
    probes: Mutex<VecDeque<ProbeOutcome>>,
    downloads: Mutex<VecDeque<DownloadOutcome>>,
    probe_count: AtomicUsize,
    download_count: AtomicUsize,
}

/// Scripted transport for fetcher and publisher tests.
///
/// Clones share the same script and counters, so a test can keep a handle
/// after moving the transport into a fetcher.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    inner: Arc<FakeInner>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_probe(&self, outcome: ProbeOutcome) {
        self.inner.probes.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn push_download(&self, outcome: DownloadOutcome) {
        self.inner.downloads.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn probe_count(&self) -> usize {
        self.inner.probe_count.load(Ordering::SeqCst)
    }

    pub(crate) fn download_count(&self) -> usize {
        self.inner.download_count.load(Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    fn probe(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Option<String>, FetchError>> + Send {
        self.inner.probe_count.fetch_add(1, Ordering::SeqCst);
        let outcome = self.inner.probes.lock().unwrap().pop_front();
        let url = url.to_string();

        async move {
            match outcome.expect("unscripted probe") {
                ProbeOutcome::Unreachable => Err(FetchError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("origin unreachable: {url}"),
                ))),
                ProbeOutcome::Validator(validator) => Ok(validator),
            }
        }
    }

    fn download(&self, url: &str) -> impl Future<Output = Result<FeedArchive, FetchError>> + Send {
        self.inner.download_count.fetch_add(1, Ordering::SeqCst);
        let outcome = self.inner.downloads.lock().unwrap().pop_front();
        let url = url.to_string();

        async move {
            match outcome.expect("unscripted download") {
                DownloadOutcome::Archive(archive) => Ok(archive),
                DownloadOutcome::Status(status) => Err(FetchError::Status { url, status }),
            }
        }
    }
}
