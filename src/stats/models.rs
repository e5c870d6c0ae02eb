use serde::{Deserialize, Serialize};

/// Running record of a single participant across every match they finished
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub participant_id: String,
    /// Last seen human readable name
    pub display_name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl ParticipantStats {
    pub fn new(participant_id: &str, display_name: &str) -> Self {
        Self {
            participant_id: participant_id.to_string(),
            display_name: display_name.to_string(),
            ..Self::default()
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Identity of one side of a finished match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRef {
    pub participant_id: String,
    pub display_name: String,
}

impl ParticipantRef {
    pub fn new(participant_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            display_name: display_name.into(),
        }
    }
}
