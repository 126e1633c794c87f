//! REST API for profile state and series data.
//!
//! Provides two GET endpoints:
//! - `/profile`: configuration echo, summary statistics, and series names
//! - `/series`: per-timestamp load records with optional range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::ProfileConfig;
use crate::profile::LoadProfile;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the profile build completes and wrapped in
/// `Arc`; no locks needed since all data is read-only.
pub struct AppState {
    /// Configuration used for this build.
    pub config: ProfileConfig,
    /// The built profile.
    pub profile: LoadProfile,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profile", get(handlers::get_profile))
        .route("/series", get(handlers::get_series))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
