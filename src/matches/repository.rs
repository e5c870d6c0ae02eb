use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument};

use super::models::{MatchModel, MatchStatus, ParticipantMove};
use crate::game::{Move, Variant};
use crate::shared::AppError;

/// Result of attempting to lock in a move
///
/// A resolved match keeps answering `AlreadyMoved` and `MatchFull` until it is purged.
#[derive(Debug, Clone)]
pub enum SubmitMoveResult {
    /// Match does not exist, was expired, or was already purged
    NotFound,
    /// The move is not part of this match's variant
    InvalidMove,
    /// The participant already has a move recorded; nothing changed
    AlreadyMoved,
    /// Two other participants already moved
    MatchFull,
    /// First move recorded, returns the updated match
    AwaitingOpponent(MatchModel),
    /// Second move recorded and the match is now resolved, returns the final snapshot
    BothMoved(MatchModel),
}

/// Trait for match repository operations
#[async_trait]
pub trait MatchRepository {
    /// Inserts a new open match and returns its ID
    async fn create_match(&self, variant: Variant) -> Result<String, AppError>;
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError>;

    /// Atomically checks for a free slot and records the move, resolving the match
    /// when it is the second one. Only one caller can ever observe `BothMoved`.
    async fn submit_move(
        &self,
        match_id: &str,
        participant_id: &str,
        participant_name: &str,
        choice: Move,
    ) -> Result<SubmitMoveResult, AppError>;

    /// Removes open matches created at or before `now - threshold`, returns how many
    async fn expire_older_than(&self, threshold: Duration) -> Result<usize, AppError>;

    /// Removes resolved matches resolved at or before `now - threshold`, returns how many
    async fn purge_resolved_older_than(&self, threshold: Duration) -> Result<usize, AppError>;
}

type MatchSlot = Arc<AsyncMutex<MatchModel>>;

/// In-memory implementation of MatchRepository.
///
/// The outer map is only locked long enough to insert, look up or remove a slot; every
/// state change happens under the per-match mutex so unrelated matches never contend.
pub struct InMemoryMatchRepository {
    matches: RwLock<HashMap<String, MatchSlot>>,
}

impl Default for InMemoryMatchRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMatchRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            matches: RwLock::new(HashMap::new()),
        }
    }

    /// Number of records currently held, including resolved ones awaiting purge
    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, match_id: &str) -> Option<MatchSlot> {
        let matches = self.matches.read().await;
        matches.get(match_id).cloned()
    }

    async fn snapshot_slots(&self) -> Vec<(String, MatchSlot)> {
        let matches = self.matches.read().await;
        matches
            .iter()
            .map(|(id, slot)| (id.clone(), Arc::clone(slot)))
            .collect()
    }

    async fn remove_all(&self, match_ids: &[String]) {
        if match_ids.is_empty() {
            return;
        }
        let mut matches = self.matches.write().await;
        for match_id in match_ids {
            matches.remove(match_id);
        }
    }
}

/// `None` when the threshold reaches past the earliest representable timestamp
fn cutoff_for(threshold: Duration) -> Option<DateTime<Utc>> {
    let threshold = chrono::Duration::from_std(threshold).ok()?;
    Utc::now().checked_sub_signed(threshold)
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self))]
    async fn create_match(&self, variant: Variant) -> Result<String, AppError> {
        let game = MatchModel::new(variant);
        let match_id = game.id.clone();

        let mut matches = self.matches.write().await;
        if matches.contains_key(&match_id) {
            return Err(AppError::Conflict("Match already exists".to_string()));
        }
        matches.insert(match_id.clone(), Arc::new(AsyncMutex::new(game)));

        debug!(match_id = %match_id, %variant, "Match created in memory");
        Ok(match_id)
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchModel>, AppError> {
        let Some(slot) = self.slot(match_id).await else {
            debug!(match_id = %match_id, "Match not found in memory");
            return Ok(None);
        };
        let game = slot.lock().await;
        Ok(Some(game.clone()))
    }

    #[instrument(skip(self))]
    async fn submit_move(
        &self,
        match_id: &str,
        participant_id: &str,
        participant_name: &str,
        choice: Move,
    ) -> Result<SubmitMoveResult, AppError> {
        let Some(slot) = self.slot(match_id).await else {
            debug!(match_id = %match_id, "Match not found");
            return Ok(SubmitMoveResult::NotFound);
        };

        let mut game = slot.lock().await;

        // The sweep may have expired this match after we cloned the slot
        if game.status == MatchStatus::Expired {
            debug!(match_id = %match_id, "Match already expired");
            return Ok(SubmitMoveResult::NotFound);
        }

        if game.has_moved(participant_id) {
            debug!(match_id = %match_id, participant_id = %participant_id, "Participant already moved");
            return Ok(SubmitMoveResult::AlreadyMoved);
        }

        if game.is_full() {
            debug!(match_id = %match_id, participant_id = %participant_id, "Match is full");
            return Ok(SubmitMoveResult::MatchFull);
        }

        if !game.variant.allows(choice) {
            debug!(match_id = %match_id, %choice, variant = %game.variant, "Move not in variant");
            return Ok(SubmitMoveResult::InvalidMove);
        }

        game.participants.push(ParticipantMove {
            participant_id: participant_id.to_string(),
            display_name: participant_name.to_string(),
            choice,
        });

        if game.is_full() {
            game.status = MatchStatus::Resolved;
            game.resolved_at = Some(Utc::now());
            info!(match_id = %match_id, participant_id = %participant_id, "Second move recorded, match resolved");
            Ok(SubmitMoveResult::BothMoved(game.clone()))
        } else {
            info!(match_id = %match_id, participant_id = %participant_id, "First move recorded");
            Ok(SubmitMoveResult::AwaitingOpponent(game.clone()))
        }
    }

    #[instrument(skip(self))]
    async fn expire_older_than(&self, threshold: Duration) -> Result<usize, AppError> {
        let Some(cutoff) = cutoff_for(threshold) else {
            debug!(?threshold, "Threshold predates every match, nothing to expire");
            return Ok(0);
        };
        let mut expired = Vec::new();

        for (match_id, slot) in self.snapshot_slots().await {
            let mut game = slot.lock().await;
            if game.status == MatchStatus::Open && game.created_at <= cutoff {
                game.status = MatchStatus::Expired;
                expired.push(match_id);
            }
        }

        self.remove_all(&expired).await;

        debug!(expired_count = expired.len(), "Expired stale open matches");
        Ok(expired.len())
    }

    #[instrument(skip(self))]
    async fn purge_resolved_older_than(&self, threshold: Duration) -> Result<usize, AppError> {
        let Some(cutoff) = cutoff_for(threshold) else {
            debug!(?threshold, "Threshold predates every match, nothing to purge");
            return Ok(0);
        };
        let mut purged = Vec::new();

        for (match_id, slot) in self.snapshot_slots().await {
            let game = slot.lock().await;
            let resolved_long_ago = game.resolved_at.is_some_and(|at| at <= cutoff);
            if game.status == MatchStatus::Resolved && resolved_long_ago {
                purged.push(match_id);
            }
        }

        self.remove_all(&purged).await;

        debug!(purged_count = purged.len(), "Purged resolved matches");
        Ok(purged.len())
    }
}
