use std::net::SocketAddr;
use std::time::Duration;

use timetable_server::fetch::{DEFAULT_FEED_URL, FetchConfig, Fetcher, HttpTransport};
use timetable_server::publish::TimetablePublisher;
use timetable_server::web::{AppState, create_router};

/// How often to refresh the timetable feed (5 minutes).
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Get the API key from the environment
    let api_key = std::env::var("TFNSW_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: TFNSW_API_KEY not set. Feed downloads will fail.");
        String::new()
    });

    let feed_url = std::env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());

    let refresh_interval = std::env::var("REFRESH_INTERVAL_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL);

    let transport =
        HttpTransport::new(FetchConfig::new(api_key)).expect("Failed to create feed transport");
    let publisher = TimetablePublisher::new(Fetcher::new(transport), feed_url);

    // Refresh once at startup, then on every tick
    tokio::spawn(publisher.clone().run(refresh_interval));

    let state = AppState::new(publisher);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

    println!("Timetable server listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET /health            - Health check");
    println!("  GET /trips/:from/:to   - Next trips between two stations");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
