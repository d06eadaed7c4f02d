//! Askama templates for the HTML rendering of trip results.

use askama::Template;

use crate::timetable::Trip;

/// Departures page for a station pair.
#[derive(Template)]
#[template(path = "trips.html")]
pub struct TripsTemplate {
    pub from: String,
    pub to: String,
    pub trips: Vec<TripRow>,
}

/// Trip view model for the template.
#[derive(Debug, Clone)]
pub struct TripRow {
    pub headsign: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub departure_stop: String,
    pub arrival_stop: String,
}

impl From<&Trip> for TripRow {
    fn from(trip: &Trip) -> Self {
        Self {
            headsign: trip.headsign.clone(),
            departure_time: trip.departure_time.clone(),
            arrival_time: trip.arrival_time.clone(),
            departure_stop: trip.departure_stop.clone(),
            arrival_stop: trip.arrival_stop.clone(),
        }
    }
}
