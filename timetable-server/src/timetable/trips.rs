//! Trip matching: the next valid trips between two stations.

use std::collections::{HashMap, HashSet};

use crate::feed::{
    CALENDAR_TABLE, FeedError, STOP_TIMES_TABLE, Snapshot, TRIPS_TABLE, field,
};

use super::clock::QueryMoment;
use super::error::QueryError;
use super::station::Station;

// calendar.txt columns; 1..=7 are the Monday..Sunday activity flags and are
// indexed directly by `QueryMoment::weekday_slot`
const COL_SERVICE_ID: usize = 0;
const COL_START_DATE: usize = 8;
const COL_END_DATE: usize = 9;

// trips.txt columns
const COL_TRIP_SERVICE_ID: usize = 1;
const COL_TRIP_ID: usize = 2;

// stop_times.txt columns
const COL_EVENT_TRIP_ID: usize = 0;
const COL_EVENT_ARRIVAL: usize = 1;
const COL_EVENT_DEPARTURE: usize = 2;
const COL_EVENT_STOP_ID: usize = 3;
const COL_EVENT_HEADSIGN: usize = 5;
const COL_EVENT_PICKUP: usize = 6;
const COL_EVENT_DROP_OFF: usize = 7;

/// A resolved trip from the source station to the target station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub id: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub departure_stop: String,
    pub arrival_stop: String,
    pub headsign: String,
}

/// Departure candidate captured at the source station, at most one per trip.
struct Departure {
    departure_time: String,
    stop_name: String,
    headsign: String,
}

/// Arrival candidate buffered at the target station, joined after the scan.
struct Arrival {
    trip_id: String,
    arrival_time: String,
    stop_id: String,
}

/// Compute the next `limit` trips from `from` to `to` at `moment`.
///
/// Four passes over the snapshot: services valid today, trips on those
/// services, one scan of `stop_times.txt` collecting both sides, then the
/// join. An empty result is not an error; errors are reserved for
/// structural read failures.
pub fn find_trips_to(
    snapshot: &Snapshot,
    from: &Station,
    to: &Station,
    moment: &QueryMoment,
    limit: usize,
) -> Result<Vec<Trip>, QueryError> {
    let mut reader = snapshot.reader()?;

    // Pass 1: services running on today's date.
    let mut valid_services: HashSet<String> = HashSet::new();
    {
        let mut calendar = reader.table(CALENDAR_TABLE)?;
        for row in calendar.records() {
            let record = row.map_err(|e| FeedError::Csv {
                table: CALENDAR_TABLE,
                source: e,
            })?;

            let start = field(&record, CALENDAR_TABLE, COL_START_DATE)?;
            let end = field(&record, CALENDAR_TABLE, COL_END_DATE)?;
            if !(start <= moment.service_date() && moment.service_date() <= end) {
                continue;
            }

            if field(&record, CALENDAR_TABLE, moment.weekday_slot())? != "1" {
                continue;
            }

            valid_services.insert(field(&record, CALENDAR_TABLE, COL_SERVICE_ID)?.to_string());
        }
    }

    // Pass 2: trips on a valid service.
    let mut valid_trips: HashSet<String> = HashSet::new();
    {
        let mut trips = reader.table(TRIPS_TABLE)?;
        for row in trips.records() {
            let record = row.map_err(|e| FeedError::Csv {
                table: TRIPS_TABLE,
                source: e,
            })?;

            if valid_services.contains(field(&record, TRIPS_TABLE, COL_TRIP_SERVICE_ID)?) {
                valid_trips.insert(field(&record, TRIPS_TABLE, COL_TRIP_ID)?.to_string());
            }
        }
    }

    // Pass 3: one scan of stop_times.txt. Source-side rows go into an
    // at-most-one-per-trip map (a later row for the same trip overwrites an
    // earlier one); target-side rows are buffered, because a trip's source
    // row may appear after its target row in file order.
    let mut departures: HashMap<String, Departure> = HashMap::new();
    let mut arrivals: Vec<Arrival> = Vec::new();
    {
        let mut events = reader.table(STOP_TIMES_TABLE)?;
        for row in events.records() {
            let record = row.map_err(|e| FeedError::Csv {
                table: STOP_TIMES_TABLE,
                source: e,
            })?;

            let trip_id = field(&record, STOP_TIMES_TABLE, COL_EVENT_TRIP_ID)?;
            if !valid_trips.contains(trip_id) {
                continue;
            }

            let stop_id = field(&record, STOP_TIMES_TABLE, COL_EVENT_STOP_ID)?;
            let arrival_time = field(&record, STOP_TIMES_TABLE, COL_EVENT_ARRIVAL)?;

            if from.contains(stop_id) {
                if field(&record, STOP_TIMES_TABLE, COL_EVENT_PICKUP)? != "0" {
                    continue; // not a pickup stop
                }
                if arrival_time < moment.clock_time() {
                    continue; // already departed
                }

                departures.insert(
                    trip_id.to_string(),
                    Departure {
                        departure_time: field(&record, STOP_TIMES_TABLE, COL_EVENT_DEPARTURE)?
                            .to_string(),
                        stop_name: from.stop_name(stop_id).to_string(),
                        headsign: field(&record, STOP_TIMES_TABLE, COL_EVENT_HEADSIGN)?
                            .to_string(),
                    },
                );
            } else if to.contains(stop_id) {
                if field(&record, STOP_TIMES_TABLE, COL_EVENT_DROP_OFF)? != "0" {
                    continue; // not a drop-off stop
                }
                if arrival_time < moment.clock_time() {
                    continue;
                }

                arrivals.push(Arrival {
                    trip_id: trip_id.to_string(),
                    arrival_time: arrival_time.to_string(),
                    stop_id: stop_id.to_string(),
                });
            }
        }
    }

    if departures.is_empty() {
        return Ok(Vec::new());
    }

    // Pass 4: join, filter, order, truncate.
    let mut trips = Vec::new();
    for arrival in arrivals {
        let Some(departure) = departures.get(&arrival.trip_id) else {
            continue; // the trip never validly departs the source
        };

        if arrival.arrival_time < departure.departure_time {
            continue; // reversed schedule data
        }

        trips.push(Trip {
            arrival_stop: to.stop_name(&arrival.stop_id).to_string(),
            id: arrival.trip_id,
            arrival_time: arrival.arrival_time,
            departure_time: departure.departure_time.clone(),
            departure_stop: departure.stop_name.clone(),
            headsign: departure.headsign.clone(),
        });
    }

    trips.sort_by(|a, b| a.departure_time.cmp(&b.departure_time));
    trips.truncate(limit);

    Ok(trips)
}
