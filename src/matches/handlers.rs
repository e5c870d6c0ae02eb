use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::MatchResponse;
use crate::shared::{AppError, AppState};

/// HTTP handler for looking up a match
///
/// GET /matches/:match_id
/// Moves are only revealed once the match is resolved
#[instrument(name = "get_match", skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, AppError> {
    let game = state
        .match_repository
        .get_match(&match_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match not found: {}", match_id)))?;

    info!(match_id = %match_id, status = ?game.status, "Match retrieved");

    Ok(Json(MatchResponse::from(game)))
}
