use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::render::{RenderInstruction, ResultSummary, SideSummary};
use crate::{
    game::{resolve, Move, Variant},
    matches::{MatchModel, MatchRepository, SubmitMoveResult},
    shared::AppError,
    stats::{ParticipantRef, ParticipantStats, StatsRepository},
};

/// Applies participant actions to matches and turns the results into render instructions.
///
/// Holds no match state of its own; everything goes through the match repository, which
/// guarantees only one caller ever sees a match resolve. That caller records statistics.
pub struct MatchEngine {
    matches: Arc<dyn MatchRepository + Send + Sync>,
    stats: Arc<dyn StatsRepository>,
}

impl MatchEngine {
    pub fn new(
        matches: Arc<dyn MatchRepository + Send + Sync>,
        stats: Arc<dyn StatsRepository>,
    ) -> Self {
        Self { matches, stats }
    }

    /// Opens a new match and returns the prompt with its move buttons
    #[instrument(skip(self))]
    pub async fn handle_start(&self, variant: Variant) -> Result<RenderInstruction, AppError> {
        let match_id = self.matches.create_match(variant).await?;

        info!(match_id = %match_id, %variant, "Match started");

        Ok(RenderInstruction::match_started(&match_id, variant))
    }

    /// Records a participant's move and reports what the participants should see next
    #[instrument(skip(self))]
    pub async fn handle_choice(
        &self,
        match_id: &str,
        participant_id: &str,
        participant_name: &str,
        move_token: &str,
    ) -> Result<RenderInstruction, AppError> {
        let Some(choice) = Move::from_token(move_token) else {
            warn!(match_id = %match_id, participant_id = %participant_id, move_token = %move_token, "Unrecognised move token");
            return Ok(RenderInstruction::invalid_move());
        };

        let result = self
            .matches
            .submit_move(match_id, participant_id, participant_name, choice)
            .await?;

        match result {
            SubmitMoveResult::NotFound => {
                debug!(match_id = %match_id, "Choice for unknown or expired match");
                Ok(RenderInstruction::not_found())
            }
            SubmitMoveResult::InvalidMove => Ok(RenderInstruction::invalid_move()),
            SubmitMoveResult::AlreadyMoved => Ok(RenderInstruction::already_moved()),
            SubmitMoveResult::MatchFull => {
                debug!(match_id = %match_id, participant_id = %participant_id, "Outsider tried to join a full match");
                Ok(RenderInstruction::not_a_participant())
            }
            SubmitMoveResult::AwaitingOpponent(game) => Ok(RenderInstruction::awaiting_opponent(
                &game.id,
                game.variant,
                participant_name,
            )),
            SubmitMoveResult::BothMoved(game) => self.finish(game).await,
        }
    }

    /// Current record for a participant, if they have finished any match
    pub async fn participant_stats(
        &self,
        participant_id: &str,
    ) -> Result<Option<ParticipantStats>, AppError> {
        Ok(self.stats.get_stats(participant_id).await?)
    }

    /// Scores a freshly resolved match and records it exactly once
    async fn finish(&self, game: MatchModel) -> Result<RenderInstruction, AppError> {
        let (first, second) = game.pairing().ok_or(AppError::Internal)?;

        let outcome = resolve(game.variant, first.choice, second.choice);

        let (first_stats, second_stats) = self
            .stats
            .record_outcome(
                outcome,
                &ParticipantRef::new(&first.participant_id, &first.display_name),
                &ParticipantRef::new(&second.participant_id, &second.display_name),
            )
            .await?;

        info!(
            match_id = %game.id,
            first = %first.participant_id,
            second = %second.participant_id,
            ?outcome,
            "Match resolved"
        );

        let summary = ResultSummary {
            match_id: game.id.clone(),
            outcome,
            first: SideSummary {
                participant_id: first.participant_id.clone(),
                display_name: first.display_name.clone(),
                choice: first.choice,
                stats: first_stats,
            },
            second: SideSummary {
                participant_id: second.participant_id.clone(),
                display_name: second.display_name.clone(),
                choice: second.choice,
                stats: second_stats,
            },
        };

        Ok(RenderInstruction::resolved(game.variant, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::render::{Audience, Control, RenderKind};
    use crate::game::Outcome;
    use crate::matches::InMemoryMatchRepository;
    use crate::stats::InMemoryStatsRepository;

    struct Fixture {
        engine: MatchEngine,
        stats: Arc<InMemoryStatsRepository>,
    }

    fn fixture() -> Fixture {
        let stats = Arc::new(InMemoryStatsRepository::new());
        let engine = MatchEngine::new(Arc::new(InMemoryMatchRepository::new()), stats.clone());
        Fixture { engine, stats }
    }

    async fn start(engine: &MatchEngine, variant: Variant) -> String {
        let render = engine.handle_start(variant).await.unwrap();
        match render.control {
            Some(Control::MoveSelection { match_id, .. }) => match_id,
            other => panic!("Expected move selection, got {:?}", other),
        }
    }

    async fn choose(engine: &MatchEngine, match_id: &str, who: &str, token: &str) -> RenderInstruction {
        engine
            .handle_choice(match_id, who, &who.to_uppercase(), token)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_returns_prompt_bound_to_new_match() {
        let f = fixture();

        let render = f.engine.handle_start(Variant::Classic).await.unwrap();

        assert_eq!(render.kind, RenderKind::MatchStarted);
        assert_eq!(render.audience, Audience::Everyone);
        let Some(Control::MoveSelection { moves, .. }) = render.control else {
            panic!("Expected move selection control");
        };
        assert_eq!(moves, vec![Move::Rock, Move::Paper, Move::Scissors]);
    }

    #[tokio::test]
    async fn test_first_choice_waits_for_opponent() {
        let f = fixture();
        let match_id = start(&f.engine, Variant::Classic).await;

        let render = choose(&f.engine, &match_id, "alice", "rock").await;

        assert_eq!(render.kind, RenderKind::AwaitingOpponent);
        assert!(render.text.contains("ALICE"));
        assert!(matches!(render.control, Some(Control::MoveSelection { .. })));
    }

    #[tokio::test]
    async fn test_rock_beats_scissors_and_updates_stats() {
        let f = fixture();
        let match_id = start(&f.engine, Variant::Classic).await;

        choose(&f.engine, &match_id, "alice", "rock").await;
        let render = choose(&f.engine, &match_id, "bob", "scissors").await;

        assert_eq!(render.kind, RenderKind::MatchResolved);
        let summary = render.summary.unwrap();
        assert_eq!(summary.outcome, Outcome::AWins);
        assert_eq!(summary.first.stats.wins, 1);
        assert_eq!(summary.second.stats.losses, 1);

        let alice = f.stats.get_stats("alice").await.unwrap().unwrap();
        let bob = f.stats.get_stats("bob").await.unwrap().unwrap();
        assert_eq!((alice.wins, alice.losses, alice.draws), (1, 0, 0));
        assert_eq!((bob.wins, bob.losses, bob.draws), (0, 1, 0));
    }

    #[tokio::test]
    async fn test_paper_against_paper_is_a_draw() {
        let f = fixture();
        let match_id = start(&f.engine, Variant::Classic).await;

        choose(&f.engine, &match_id, "alice", "paper").await;
        let render = choose(&f.engine, &match_id, "bob", "paper").await;

        assert_eq!(render.summary.unwrap().outcome, Outcome::Draw);
        assert!(render.text.contains("draw"));
        assert_eq!(f.stats.get_stats("alice").await.unwrap().unwrap().draws, 1);
        assert_eq!(f.stats.get_stats("bob").await.unwrap().unwrap().draws, 1);
    }

    #[tokio::test]
    async fn test_unknown_match_is_reported_without_touching_stats() {
        let f = fixture();

        let render = choose(&f.engine, "no-such-match", "alice", "rock").await;

        assert_eq!(render.kind, RenderKind::MatchNotFound);
        assert_eq!(render.audience, Audience::SubmitterOnly);
        assert!(f.stats.get_stats("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_repeat_choice_is_private_acknowledgment() {
        let f = fixture();
        let match_id = start(&f.engine, Variant::Classic).await;

        choose(&f.engine, &match_id, "alice", "rock").await;
        let render = choose(&f.engine, &match_id, "alice", "paper").await;

        assert_eq!(render.kind, RenderKind::AlreadyMoved);
        assert_eq!(render.audience, Audience::SubmitterOnly);
    }

    #[tokio::test]
    async fn test_outsider_is_rejected_and_stats_recorded_once() {
        let f = fixture();
        let match_id = start(&f.engine, Variant::Classic).await;

        choose(&f.engine, &match_id, "alice", "rock").await;
        choose(&f.engine, &match_id, "bob", "rock").await;
        let render = choose(&f.engine, &match_id, "carol", "paper").await;

        assert_eq!(render.kind, RenderKind::NotAParticipant);
        assert!(f.stats.get_stats("carol").await.unwrap().is_none());
        let alice = f.stats.get_stats("alice").await.unwrap().unwrap();
        assert_eq!(alice.games_played(), 1);
    }

    #[tokio::test]
    async fn test_malformed_and_out_of_variant_tokens_are_invalid() {
        let f = fixture();
        let match_id = start(&f.engine, Variant::Classic).await;

        let garbage = choose(&f.engine, &match_id, "alice", "lizard").await;
        let well = choose(&f.engine, &match_id, "alice", "well").await;

        assert_eq!(garbage.kind, RenderKind::InvalidMove);
        assert_eq!(well.kind, RenderKind::InvalidMove);

        // Still free to make a real move afterwards
        let render = choose(&f.engine, &match_id, "alice", "rock").await;
        assert_eq!(render.kind, RenderKind::AwaitingOpponent);
    }

    #[tokio::test]
    async fn test_extended_variant_uses_well_rules() {
        let f = fixture();
        let match_id = start(&f.engine, Variant::Extended).await;

        choose(&f.engine, &match_id, "alice", "rock").await;
        let render = choose(&f.engine, &match_id, "bob", "well").await;

        let summary = render.summary.unwrap();
        assert_eq!(summary.outcome, Outcome::BWins);
        assert_eq!(summary.winner().unwrap().participant_id, "bob");
        assert_eq!(
            render.control,
            Some(Control::NewMatch {
                variant: Variant::Extended
            })
        );
    }

    #[tokio::test]
    async fn test_participant_stats_lookup() {
        let f = fixture();
        assert!(f.engine.participant_stats("alice").await.unwrap().is_none());

        let match_id = start(&f.engine, Variant::Classic).await;
        choose(&f.engine, &match_id, "alice", "scissors").await;
        choose(&f.engine, &match_id, "bob", "rock").await;

        let alice = f.engine.participant_stats("alice").await.unwrap().unwrap();
        assert_eq!(alice.losses, 1);
        assert_eq!(alice.display_name, "ALICE");
    }
}
