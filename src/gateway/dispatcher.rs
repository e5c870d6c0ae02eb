use std::sync::Arc;
use tracing::{debug, error};

use super::events::GatewayEvent;
use crate::engine::{MatchEngine, RenderInstruction};
use crate::game::Variant;
use crate::shared::AppError;

/// Routes gateway events to the engine operation that handles them.
///
/// The routing is a fixed table over every event type, so adding an event without
/// an operation fails to compile. Engine errors never escape: they are logged and
/// turned into a private "try again" notice.
pub struct EventDispatcher {
    engine: Arc<MatchEngine>,
}

impl EventDispatcher {
    pub fn new(engine: Arc<MatchEngine>) -> Self {
        Self { engine }
    }

    pub async fn dispatch(&self, event: GatewayEvent) -> RenderInstruction {
        let event_type = event.event_type();
        debug!(event_type = event_type, "Dispatching gateway event");

        let result = match event {
            GatewayEvent::HelpRequested => Ok(self.on_help_requested()),
            GatewayEvent::QueryStarted { query, variant } => {
                self.on_query_started(&query, variant).await
            }
            GatewayEvent::ChoiceSubmitted {
                match_id,
                participant_id,
                participant_name,
                move_token,
            } => {
                self.on_choice_submitted(&match_id, &participant_id, &participant_name, &move_token)
                    .await
            }
        };

        result.unwrap_or_else(|e| {
            error!(event_type = event_type, error = %e, "Failed to handle gateway event");
            RenderInstruction::unavailable()
        })
    }

    fn on_help_requested(&self) -> RenderInstruction {
        RenderInstruction::welcome()
    }

    async fn on_query_started(
        &self,
        query: &str,
        variant: Option<Variant>,
    ) -> Result<RenderInstruction, AppError> {
        let variant = variant.unwrap_or_else(|| Variant::from_query(query));
        self.engine.handle_start(variant).await
    }

    async fn on_choice_submitted(
        &self,
        match_id: &str,
        participant_id: &str,
        participant_name: &str,
        move_token: &str,
    ) -> Result<RenderInstruction, AppError> {
        self.engine
            .handle_choice(match_id, participant_id, participant_name, move_token)
            .await
    }
}
