use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A single hidden choice made by a participant
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Well,
}

impl Move {
    /// Moves this move defeats, ignoring which variant is active
    pub fn defeats(&self) -> &'static [Move] {
        match self {
            Move::Rock => &[Move::Scissors],
            Move::Paper => &[Move::Rock, Move::Well],
            Move::Scissors => &[Move::Paper],
            Move::Well => &[Move::Rock, Move::Scissors],
        }
    }

    /// Parses a move token as it arrives from the gateway ("rock", "Rock", "choice_rock")
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let token = token.strip_prefix("choice_").unwrap_or(token);
        token.parse().ok()
    }
}

/// Rule set selected when a match is created
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Variant {
    /// Rock, paper, scissors
    #[default]
    Classic,
    /// Classic plus "well": well swallows rock and scissors, paper covers well
    Extended,
}

impl Variant {
    /// Picks a variant from the free text typed after the bot mention.
    /// Anything that isn't asking for the well/extended rules gets the classic game.
    pub fn from_query(query: &str) -> Self {
        let query = query.to_ascii_lowercase();
        if query.contains("well") || query.contains("extended") {
            Variant::Extended
        } else {
            Variant::Classic
        }
    }

    pub fn moves(&self) -> Vec<Move> {
        Move::iter().filter(|m| self.allows(*m)).collect()
    }

    pub fn allows(&self, mv: Move) -> bool {
        match self {
            Variant::Classic => mv != Move::Well,
            Variant::Extended => true,
        }
    }

    /// Whether `a` defeats `b` under this variant's beats-relation
    pub fn beats(&self, a: Move, b: Move) -> bool {
        self.allows(a) && self.allows(b) && a.defeats().contains(&b)
    }
}
