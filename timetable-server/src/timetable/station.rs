//! Station resolution over `stops.txt`.

use crate::feed::{FeedError, STOPS_TABLE, Snapshot, field};

use super::error::QueryError;

/// Label used when a stop id cannot be resolved to a display name.
pub const UNKNOWN_STOP: &str = "Unknown Stop";

// stops.txt columns (fixed feed contract)
const COL_STOP_ID: usize = 0;
const COL_STOP_NAME: usize = 2;
const COL_PARENT_STATION: usize = 9;

/// A stop record subordinate to a station, e.g. one platform of a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub id: String,
    pub name: String,
}

/// A logical boarding point: the anchor stop plus every stop whose
/// parent-station column points at it. An event at a child stop counts as
/// an event at the station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub stops: Vec<Stop>,
}

impl Station {
    /// Whether a raw stop id belongs to this station.
    pub fn contains(&self, stop_id: &str) -> bool {
        self.id == stop_id || self.stops.iter().any(|stop| stop.id == stop_id)
    }

    /// Display name for a stop id, or [`UNKNOWN_STOP`] when it cannot be
    /// resolved here.
    pub fn stop_name(&self, stop_id: &str) -> &str {
        if self.id == stop_id {
            return &self.name;
        }

        self.stops
            .iter()
            .find(|stop| stop.id == stop_id)
            .map(|stop| stop.name.as_str())
            .unwrap_or(UNKNOWN_STOP)
    }
}

/// Resolve a station by case-insensitive name fragment.
///
/// Two passes over `stops.txt`: the first finds the anchor (the first row
/// whose name contains the fragment; ties go to file order), the second
/// collects child stops by parent id. Children may appear before their
/// parent in file order, so a single streaming pass cannot see them all.
pub fn find_station(snapshot: &Snapshot, fragment: &str) -> Result<Station, QueryError> {
    let fragment_lower = fragment.to_lowercase();
    let mut reader = snapshot.reader()?;

    let mut anchor: Option<(String, String)> = None;
    {
        let mut stops = reader.table(STOPS_TABLE)?;
        for row in stops.records() {
            let record = row.map_err(|e| FeedError::Csv {
                table: STOPS_TABLE,
                source: e,
            })?;

            let name = field(&record, STOPS_TABLE, COL_STOP_NAME)?;
            if name.to_lowercase().contains(&fragment_lower) {
                let id = field(&record, STOPS_TABLE, COL_STOP_ID)?;
                anchor = Some((id.to_string(), name.to_string()));
                break;
            }
        }
    }

    let Some((id, name)) = anchor else {
        return Err(QueryError::StationNotFound {
            fragment: fragment.to_string(),
        });
    };

    let mut children = Vec::new();
    let mut stops = reader.table(STOPS_TABLE)?;
    for row in stops.records() {
        let record = row.map_err(|e| FeedError::Csv {
            table: STOPS_TABLE,
            source: e,
        })?;

        if field(&record, STOPS_TABLE, COL_PARENT_STATION)? == id {
            children.push(Stop {
                id: field(&record, STOPS_TABLE, COL_STOP_ID)?.to_string(),
                name: field(&record, STOPS_TABLE, COL_STOP_NAME)?.to_string(),
            });
        }
    }

    Ok(Station {
        id,
        name,
        stops: children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Snapshot;
    use crate::testutil::{STOPS_HEADER, archive_with};

    fn stops_snapshot(stops: &str) -> Snapshot {
        let stops_table = format!("{STOPS_HEADER}{stops}");
        Snapshot::open(archive_with(&[
            ("stops.txt", &stops_table),
            ("calendar.txt", "service_id\n"),
            ("trips.txt", "route_id\n"),
            ("stop_times.txt", "trip_id\n"),
        ]))
        .unwrap()
    }

    #[test]
    fn collects_children_listed_before_the_anchor() {
        let snapshot = stops_snapshot(
            "S1a,,Platform 1,,,,,,,S1\n\
             S1b,,Platform 2,,,,,,,S1\n\
             S1,,Central Station,,,,,,1,\n",
        );

        let station = find_station(&snapshot, "central").unwrap();
        assert_eq!(station.id, "S1");
        assert_eq!(station.name, "Central Station");
        assert_eq!(
            station.stops,
            vec![
                Stop {
                    id: "S1a".into(),
                    name: "Platform 1".into()
                },
                Stop {
                    id: "S1b".into(),
                    name: "Platform 2".into()
                },
            ]
        );
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let snapshot = stops_snapshot("S2,,Town Hall Station,,,,,,1,\n");

        let station = find_station(&snapshot, "TOWN hall").unwrap();
        assert_eq!(station.id, "S2");
        assert!(station.stops.is_empty());
    }

    #[test]
    fn first_match_in_file_order_wins() {
        let snapshot = stops_snapshot(
            "S1,,North Junction,,,,,,1,\n\
             S2,,South Junction,,,,,,1,\n",
        );

        let station = find_station(&snapshot, "junction").unwrap();
        assert_eq!(station.id, "S1");
    }

    #[test]
    fn unmatched_fragment_is_not_found() {
        let snapshot = stops_snapshot("S1,,Central Station,,,,,,1,\n");

        let err = find_station(&snapshot, "nowhere").unwrap_err();
        assert!(matches!(err, QueryError::StationNotFound { .. }));
    }

    #[test]
    fn contains_covers_anchor_and_children() {
        let station = Station {
            id: "S1".into(),
            name: "Central Station".into(),
            stops: vec![Stop {
                id: "S1a".into(),
                name: "Central Platform 1".into(),
            }],
        };

        assert!(station.contains("S1"));
        assert!(station.contains("S1a"));
        assert!(!station.contains("S2"));
    }

    #[test]
    fn unresolved_stop_id_degrades_to_placeholder() {
        let station = Station {
            id: "S1".into(),
            name: "Central Station".into(),
            stops: vec![],
        };

        assert_eq!(station.stop_name("S1"), "Central Station");
        assert_eq!(station.stop_name("S9"), UNKNOWN_STOP);
    }
}
