//! Data transfer objects for web responses.

use serde::Serialize;

use crate::timetable::Trip;

/// A trip in the JSON response.
#[derive(Debug, Serialize)]
pub struct TripDto {
    pub id: String,
    pub headsign: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub departure_stop: String,
    pub arrival_stop: String,
}

impl From<&Trip> for TripDto {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.clone(),
            headsign: trip.headsign.clone(),
            departure_time: trip.departure_time.clone(),
            arrival_time: trip.arrival_time.clone(),
            departure_stop: trip.departure_stop.clone(),
            arrival_stop: trip.arrival_stop.clone(),
        }
    }
}

/// Error payload for JSON error responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_serializes_with_snake_case_fields() {
        let dto = TripDto::from(&Trip {
            id: "T1".into(),
            departure_time: "08:02:00".into(),
            arrival_time: "08:20:00".into(),
            departure_stop: "Platform 1".into(),
            arrival_stop: "Platform 3".into(),
            headsign: "City Circle".into(),
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], "T1");
        assert_eq!(json["departure_time"], "08:02:00");
        assert_eq!(json["arrival_stop"], "Platform 3");
    }
}
