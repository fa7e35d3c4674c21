//! Route Definitions
//!
//! Maps URLs to handlers with type-safe routing.

use super::handlers::{health_handler, simulate_game_handler, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/simulate", post(simulate_game_handler))
        .with_state(state)
}
