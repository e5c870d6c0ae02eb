use serde::{Deserialize, Serialize};

use super::moves::{Move, Variant};

/// Result of a single round, from the first mover's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Draw,
    AWins,
    BWins,
}

impl Outcome {
    /// The same result seen with the roles swapped
    pub fn swapped(self) -> Self {
        match self {
            Outcome::Draw => Outcome::Draw,
            Outcome::AWins => Outcome::BWins,
            Outcome::BWins => Outcome::AWins,
        }
    }
}

/// Scores two moves under the given variant.
///
/// Both moves are expected to belong to the variant; the store rejects anything else
/// before a match can resolve.
pub fn resolve(variant: Variant, move_a: Move, move_b: Move) -> Outcome {
    if move_a == move_b {
        Outcome::Draw
    } else if variant.beats(move_a, move_b) {
        Outcome::AWins
    } else {
        Outcome::BWins
    }
}
