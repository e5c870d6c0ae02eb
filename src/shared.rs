use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::engine::MatchEngine;
use crate::gateway::EventDispatcher;
use crate::matches::repository::MatchRepository;
use crate::stats::StatsError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub match_repository: Arc<dyn MatchRepository + Send + Sync>,
    pub engine: Arc<MatchEngine>,
    pub dispatcher: Arc<EventDispatcher>,
}

impl AppState {
    pub fn new(
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        engine: Arc<MatchEngine>,
    ) -> Self {
        let dispatcher = Arc::new(EventDispatcher::new(Arc::clone(&engine)));
        Self {
            match_repository,
            engine,
            dispatcher,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Stats(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Statistics error: {}", err),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
