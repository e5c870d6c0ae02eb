use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::{Move, Variant};

/// Lifecycle of a match record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Fewer than two moves recorded
    Open,
    /// Both moves recorded and scored; immutable from here on
    Resolved,
    /// Swept by the cleanup task before anyone finished it
    Expired,
}

/// A participant together with the move they locked in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantMove {
    pub participant_id: String,
    pub display_name: String,
    pub choice: Move,
}

/// In-memory model for a single two-player round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchModel {
    pub id: String,
    pub variant: Variant,
    /// Recorded moves in arrival order; index 0 is the first mover
    pub participants: Vec<ParticipantMove>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl MatchModel {
    /// Max number of participants that can lock in a move
    pub const CAPACITY: usize = 2;

    /// Creates an open match with a generated ID
    pub fn new(variant: Variant) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            variant,
            participants: Vec::with_capacity(Self::CAPACITY),
            status: MatchStatus::Open,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    pub fn has_moved(&self, participant_id: &str) -> bool {
        self.participants
            .iter()
            .any(|p| p.participant_id == participant_id)
    }

    pub fn move_of(&self, participant_id: &str) -> Option<Move> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
            .map(|p| p.choice)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= Self::CAPACITY
    }

    /// The two recorded moves in arrival order, once both are in
    pub fn pairing(&self) -> Option<(&ParticipantMove, &ParticipantMove)> {
        match self.participants.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }
}
