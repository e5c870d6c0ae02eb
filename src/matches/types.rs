use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{MatchModel, MatchStatus};
use crate::game::{Move, Variant};

/// Public view of a participant; the move stays hidden until the match resolves
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantView {
    pub participant_id: String,
    pub display_name: String,
    pub choice: Option<Move>,
}

/// Response for match lookups
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub id: String,
    pub variant: Variant,
    pub status: MatchStatus,
    pub participants: Vec<ParticipantView>,
    pub created_at: DateTime<Utc>,
}

impl From<MatchModel> for MatchResponse {
    fn from(game: MatchModel) -> Self {
        let reveal = game.status == MatchStatus::Resolved;
        let participants = game
            .participants
            .into_iter()
            .map(|p| ParticipantView {
                participant_id: p.participant_id,
                display_name: p.display_name,
                choice: reveal.then_some(p.choice),
            })
            .collect();

        Self {
            id: game.id,
            variant: game.variant,
            status: game.status,
            participants,
            created_at: game.created_at,
        }
    }
}
