use serde::{Deserialize, Serialize};

use crate::game::{Move, Outcome, Variant};
use crate::stats::ParticipantStats;

/// What happened, so the gateway can pick a platform specific presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderKind {
    Welcome,
    MatchStarted,
    AwaitingOpponent,
    MatchResolved,
    MatchNotFound,
    AlreadyMoved,
    NotAParticipant,
    InvalidMove,
    Unavailable,
}

/// Who should see the instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    /// Replace the shared prompt that both participants see
    Everyone,
    /// Private acknowledgment to whoever triggered the event; the prompt stays as is
    SubmitterOnly,
}

/// Interactive control to attach under the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Control {
    /// One button per move, each bound to the match
    MoveSelection { match_id: String, moves: Vec<Move> },
    /// Offer a fresh match with the same rules
    NewMatch { variant: Variant },
}

/// One side of a finished match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSummary {
    pub participant_id: String,
    pub display_name: String,
    pub choice: Move,
    pub stats: ParticipantStats,
}

/// Final result of a resolved match, first mover is side A
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub match_id: String,
    pub outcome: Outcome,
    pub first: SideSummary,
    pub second: SideSummary,
}

impl ResultSummary {
    pub fn winner(&self) -> Option<&SideSummary> {
        match self.outcome {
            Outcome::AWins => Some(&self.first),
            Outcome::BWins => Some(&self.second),
            Outcome::Draw => None,
        }
    }
}

/// Platform independent description of what the gateway should display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    pub kind: RenderKind,
    pub audience: Audience,
    pub text: String,
    pub control: Option<Control>,
    pub summary: Option<ResultSummary>,
}

impl RenderInstruction {
    fn broadcast(kind: RenderKind, text: String, control: Option<Control>) -> Self {
        Self {
            kind,
            audience: Audience::Everyone,
            text,
            control,
            summary: None,
        }
    }

    fn private(kind: RenderKind, text: &str) -> Self {
        Self {
            kind,
            audience: Audience::SubmitterOnly,
            text: text.to_string(),
            control: None,
            summary: None,
        }
    }

    pub fn welcome() -> Self {
        Self::broadcast(
            RenderKind::Welcome,
            "Welcome to rock, paper, scissors!\nStart a match with /play, or /play well for the extended rules.".to_string(),
            Some(Control::NewMatch {
                variant: Variant::Classic,
            }),
        )
    }

    pub fn match_started(match_id: &str, variant: Variant) -> Self {
        let title = match variant {
            Variant::Classic => "Rock, paper, scissors!",
            Variant::Extended => "Rock, paper, scissors, well!",
        };
        Self::broadcast(
            RenderKind::MatchStarted,
            format!("{}\nFirst two players to pick a move play each other.", title),
            Some(move_selection(match_id, variant)),
        )
    }

    pub fn awaiting_opponent(match_id: &str, variant: Variant, mover_name: &str) -> Self {
        Self::broadcast(
            RenderKind::AwaitingOpponent,
            format!("{} has chosen. Waiting for an opponent...", mover_name),
            Some(move_selection(match_id, variant)),
        )
    }

    pub fn resolved(variant: Variant, summary: ResultSummary) -> Self {
        let verdict = match summary.winner() {
            Some(winner) => format!("{} wins!", winner.display_name),
            None => "It's a draw!".to_string(),
        };
        let text = format!(
            "Result:\n{}: {}\n{}: {}\n\n{}\n\n{}\n{}",
            summary.first.display_name,
            summary.first.choice,
            summary.second.display_name,
            summary.second.choice,
            verdict,
            tally(&summary.first.stats),
            tally(&summary.second.stats),
        );

        Self {
            kind: RenderKind::MatchResolved,
            audience: Audience::Everyone,
            text,
            control: Some(Control::NewMatch { variant }),
            summary: Some(summary),
        }
    }

    pub fn not_found() -> Self {
        Self::private(
            RenderKind::MatchNotFound,
            "This match is no longer available. Start a new one with /play",
        )
    }

    pub fn already_moved() -> Self {
        Self::private(RenderKind::AlreadyMoved, "You already chose!")
    }

    pub fn not_a_participant() -> Self {
        Self::private(
            RenderKind::NotAParticipant,
            "You are not a participant in this match.",
        )
    }

    pub fn invalid_move() -> Self {
        Self::private(RenderKind::InvalidMove, "Invalid choice.")
    }

    pub fn unavailable() -> Self {
        Self::private(
            RenderKind::Unavailable,
            "Something went wrong, please try again.",
        )
    }
}

fn move_selection(match_id: &str, variant: Variant) -> Control {
    Control::MoveSelection {
        match_id: match_id.to_string(),
        moves: variant.moves(),
    }
}

fn tally(stats: &ParticipantStats) -> String {
    format!(
        "{}: {}W / {}L / {}D",
        stats.display_name, stats.wins, stats.losses, stats.draws
    )
}
