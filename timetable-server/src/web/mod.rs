//! Web layer: HTTP rendering of timetable queries.
//!
//! Resolves the current snapshot per request and renders trip results as
//! JSON, HTML or plain text depending on the `Accept` header.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
