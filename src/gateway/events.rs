use serde::{Deserialize, Serialize};

use crate::game::Variant;
use crate::shared::AppError;

/// Events the messaging gateway extracts from platform updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEvent {
    /// Someone asked the bot what it does
    HelpRequested,

    /// A new match was requested, e.g. through an inline query
    QueryStarted {
        /// Free text typed after the bot mention
        #[serde(default)]
        query: String,
        /// Explicit rule set, takes precedence over the query text
        #[serde(default)]
        variant: Option<Variant>,
    },

    /// A participant pressed one of the move buttons
    ChoiceSubmitted {
        match_id: String,
        participant_id: String,
        participant_name: String,
        #[serde(rename = "move")]
        move_token: String,
    },
}

impl GatewayEvent {
    /// Get a short name of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            GatewayEvent::HelpRequested => "help_requested",
            GatewayEvent::QueryStarted { .. } => "query_started",
            GatewayEvent::ChoiceSubmitted { .. } => "choice_submitted",
        }
    }

    /// Rejects events that are missing the identifiers the engine relies on
    pub fn validate(&self) -> Result<(), AppError> {
        if let GatewayEvent::ChoiceSubmitted {
            match_id,
            participant_id,
            ..
        } = self
        {
            if match_id.trim().is_empty() {
                return Err(AppError::BadRequest("Match ID cannot be empty".to_string()));
            }
            if participant_id.trim().is_empty() {
                return Err(AppError::BadRequest(
                    "Participant ID cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
