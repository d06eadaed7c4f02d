//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::timetable::{QueryError, QueryMoment, find_station, find_trips_to};

use super::dto::{ErrorResponse, TripDto};
use super::state::AppState;
use super::templates::{TripRow, TripsTemplate};

/// Trips returned when the caller does not ask for a specific limit.
const DEFAULT_TRIP_LIMIT: usize = 3;

/// Upper bound on the per-request limit.
const MAX_TRIP_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trips/:from/:to", get(next_trips))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct TripsQuery {
    limit: Option<usize>,
}

/// Next trips between two stations, rendered according to `Accept`.
async fn next_trips(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
    Query(query): Query<TripsQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_TRIP_LIMIT)
        .clamp(1, MAX_TRIP_LIMIT);

    let snapshot = state
        .publisher
        .current()
        .await
        .ok_or(QueryError::NoSnapshot)?;

    // both stations and the trip scan read the same captured snapshot, so
    // a refresh landing mid-request cannot mix old and new data
    let origin = find_station(&snapshot, &from)?;
    let destination = find_station(&snapshot, &to)?;

    let now = QueryMoment::now();
    let trips = find_trips_to(&snapshot, &origin, &destination, &now, limit)?;

    match preferred_format(&headers) {
        Format::Json => {
            let body = Json(trips.iter().map(TripDto::from).collect::<Vec<_>>());
            Ok(([(header::CACHE_CONTROL, "public, max-age=60")], body).into_response())
        }
        Format::Html => {
            let page = TripsTemplate {
                from: origin.name,
                to: destination.name,
                trips: trips.iter().map(TripRow::from).collect(),
            };
            Ok(page.into_response())
        }
        Format::Text => {
            let mut lines = String::new();
            for trip in &trips {
                lines.push_str(&format!(
                    "{} :: {} - {}\n",
                    trip.headsign, trip.departure_time, trip.arrival_time
                ));
            }
            Ok(lines.into_response())
        }
    }
}

enum Format {
    Json,
    Html,
    Text,
}

/// Pick the response format from the `Accept` header; plain text is the
/// fallback.
fn preferred_format(headers: &HeaderMap) -> Format {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if accept.contains("application/json") {
        Format::Json
    } else if accept.contains("text/html") {
        Format::Html
    } else {
        Format::Text
    }
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    NoSnapshot,
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::StationNotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            QueryError::NoSnapshot => AppError::NoSnapshot,
            QueryError::Feed(err) => AppError::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::NoSnapshot => (
                StatusCode::SERVICE_UNAVAILABLE,
                "no timetable snapshot available yet".to_string(),
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::warn!(%status, message = %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
