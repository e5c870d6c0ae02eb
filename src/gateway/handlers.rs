use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::events::GatewayEvent;
use crate::engine::RenderInstruction;
use crate::shared::{AppError, AppState};
use crate::stats::ParticipantStats;

/// Liveness probe
///
/// GET /
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "Rock paper scissors bot is running" }))
}

/// HTTP handler the messaging gateway posts extracted events to
///
/// POST /events
/// Returns the render instruction for the gateway to translate into platform messages
#[instrument(name = "handle_event", skip_all)]
pub async fn handle_event(
    State(state): State<AppState>,
    Json(event): Json<GatewayEvent>,
) -> Result<Json<RenderInstruction>, AppError> {
    event.validate()?;
    let event_type = event.event_type();

    let render = state.dispatcher.dispatch(event).await;

    info!(event_type = event_type, kind = ?render.kind, audience = ?render.audience, "Event handled");

    Ok(Json(render))
}

/// HTTP handler for a participant's running record
///
/// GET /stats/:participant_id
#[instrument(name = "get_participant_stats", skip(state))]
pub async fn get_participant_stats(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> Result<Json<ParticipantStats>, AppError> {
    state
        .engine
        .participant_stats(&participant_id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("No statistics for participant: {}", participant_id))
        })
}
