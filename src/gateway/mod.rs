// Public API
pub use dispatcher::EventDispatcher;
pub use events::GatewayEvent;
pub use handlers::{get_participant_stats, handle_event, health};

// Internal modules
mod dispatcher;
mod events;
mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::matches;
use crate::shared::AppState;

/// Builds the HTTP surface the messaging gateway talks to
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/events", post(handle_event))
        .route("/matches/:match_id", get(matches::get_match))
        .route("/stats/:participant_id", get(get_participant_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
