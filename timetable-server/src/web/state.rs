//! Application state for the web layer.

use crate::fetch::HttpTransport;
use crate::publish::TimetablePublisher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Publisher holding the current timetable snapshot.
    pub publisher: TimetablePublisher<HttpTransport>,
}

impl AppState {
    pub fn new(publisher: TimetablePublisher<HttpTransport>) -> Self {
        Self { publisher }
    }
}
