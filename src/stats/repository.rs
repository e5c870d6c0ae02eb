use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{
    models::{ParticipantRef, ParticipantStats},
    StatsError,
};
use crate::game::Outcome;

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Applies one resolved match to both participants and returns their updated records
    /// in the same (a, b) order
    async fn record_outcome(
        &self,
        outcome: Outcome,
        participant_a: &ParticipantRef,
        participant_b: &ParticipantRef,
    ) -> Result<(ParticipantStats, ParticipantStats), StatsError>;

    async fn get_stats(&self, participant_id: &str) -> Result<Option<ParticipantStats>, StatsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    participants: Arc<RwLock<HashMap<String, ParticipantStats>>>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self {
            participants: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn entry<'a>(
    participants: &'a mut HashMap<String, ParticipantStats>,
    participant: &ParticipantRef,
) -> &'a mut ParticipantStats {
    let stats = participants
        .entry(participant.participant_id.clone())
        .or_insert_with(|| {
            ParticipantStats::new(&participant.participant_id, &participant.display_name)
        });
    stats.display_name = participant.display_name.clone();
    stats
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    #[instrument(skip(self, participant_a, participant_b), fields(a = %participant_a.participant_id, b = %participant_b.participant_id))]
    async fn record_outcome(
        &self,
        outcome: Outcome,
        participant_a: &ParticipantRef,
        participant_b: &ParticipantRef,
    ) -> Result<(ParticipantStats, ParticipantStats), StatsError> {
        if participant_a.participant_id == participant_b.participant_id {
            return Err(StatsError::Validation(
                "A participant cannot play against themselves".to_string(),
            ));
        }

        let mut participants = self.participants.write().await;

        match outcome {
            Outcome::AWins => {
                entry(&mut participants, participant_a).wins += 1;
                entry(&mut participants, participant_b).losses += 1;
            }
            Outcome::BWins => {
                entry(&mut participants, participant_a).losses += 1;
                entry(&mut participants, participant_b).wins += 1;
            }
            Outcome::Draw => {
                entry(&mut participants, participant_a).draws += 1;
                entry(&mut participants, participant_b).draws += 1;
            }
        }

        let stats_a = participants[&participant_a.participant_id].clone();
        let stats_b = participants[&participant_b.participant_id].clone();

        debug!(?outcome, "Recorded match outcome");
        Ok((stats_a, stats_b))
    }

    async fn get_stats(&self, participant_id: &str) -> Result<Option<ParticipantStats>, StatsError> {
        let participants = self.participants.read().await;
        Ok(participants.get(participant_id).cloned())
    }
}
