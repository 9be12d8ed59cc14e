//! hotel-server: hotel reservation service
//!
//! Long-running HTTP service that:
//! - Lists hotels with review scores and serves hotel/room pages
//! - Checks room availability and takes bookings without double-booking a room
//! - Manages accounts, login sessions and the inquiry board
//! - Provides admin endpoints for the catalogue and the audit trail

mod api;
mod auth;
mod config;
mod db;
mod error;
mod state;
mod util;

use std::net::SocketAddr;
use std::time::Duration;

use config::Config;
use error::BoxError;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting hotel-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;

    // Periodic rate limiter cleanup (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    let app = api::create_router(state, Duration::from_secs(config.request_timeout_secs));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("hotel-server HTTP listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
