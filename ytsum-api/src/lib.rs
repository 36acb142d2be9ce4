//! ytsum-api library - YouTube summarizer HTTP backend
//!
//! Exposes the router and shared state for the binary and integration tests.

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;
pub mod generator;
pub mod store;
pub mod summarizer;

pub use crate::error::{ApiError, ApiResult};
use crate::store::UserStore;
use crate::summarizer::Summarizer;

/// Application state shared across HTTP handlers
///
/// Built once in `main`; cloning is cheap (shared handles only).
#[derive(Clone)]
pub struct AppState {
    /// Registered users (in-memory, process lifetime)
    pub users: UserStore,
    /// Summarize/ask adapter holding the shared generator client
    pub summarizer: Summarizer,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state with an empty user store
    pub fn new(summarizer: Summarizer) -> Self {
        Self {
            users: UserStore::new(),
            summarizer,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/register", post(api::register))
        .route("/api/login", post(api::login))
        .route("/api/summarize", post(api::summarize))
        .route("/api/ask", post(api::ask))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
