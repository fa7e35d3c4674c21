//! Request Handlers

use super::{errors::ApiError, middleware::RequestId, models::*};
use crate::{config::SimulationConfig, errors::GridironError, game::GameSimulator};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    pub version: String,
    pub simulation: SimulationConfig,
}

/// Health check handler
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
    })
}

/// Simulate a full game between two teams
/// POST /simulate?seed={u64}&include_log={bool}
pub async fn simulate_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<SimulateQuery>, QueryRejection>,
    payload: Result<Json<SimulateGameRequest>, JsonRejection>,
) -> Result<Json<SimulateGameResponse>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        warn!(request_id = %request_id.0, "rejected query: {}", rejection.body_text());
        ApiError::bad_request(request_id.0.clone(), rejection.body_text())
    })?;

    let Json(request) = payload.map_err(|rejection| {
        warn!(request_id = %request_id.0, "rejected body: {}", rejection.body_text());
        ApiError::bad_request(request_id.0.clone(), rejection.body_text())
    })?;

    let matchup = request.validate().map_err(|e| {
        warn!(request_id = %request_id.0, "validation failed: {}", e);
        ApiError::validation(request_id.0.clone(), e)
    })?;

    let seed = params.seed.or(state.simulation.seed);
    let include_log = params
        .include_log
        .unwrap_or(state.simulation.include_play_log);
    let game_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id.0,
        game_id = %game_id,
        home = %matchup.home.name,
        away = %matchup.away.name,
        seed = ?seed,
        "simulating game"
    );

    // Each game owns its RNG and state; run it off the async workers
    let game = tokio::task::spawn_blocking(move || {
        GameSimulator::new().simulate_seeded(matchup, seed)
    })
    .await
    .map_err(|e| ApiError::internal_error(request_id.0.clone(), format!("Simulation task failed: {}", e)))?;

    SimulateGameResponse::from_game(game_id, game, include_log)
        .map(Json)
        .ok_or_else(|| {
            ApiError::internal_error(request_id.0, GridironError::Undecided.to_string())
        })
}
