use std::sync::Arc;

use rpsduel::{
    EventDispatcher, InMemoryMatchRepository, InMemoryStatsRepository, MatchEngine,
    MatchRepository, StatsRepository,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub match_repository: Arc<InMemoryMatchRepository>,
    pub stats_repository: Arc<InMemoryStatsRepository>,
    pub engine: Arc<MatchEngine>,
    pub dispatcher: EventDispatcher,
}

pub struct TestSetupBuilder;

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(self) -> TestSetup {
        let match_repository = Arc::new(InMemoryMatchRepository::new());
        let stats_repository = Arc::new(InMemoryStatsRepository::new());

        let matches: Arc<dyn MatchRepository + Send + Sync> = match_repository.clone();
        let stats: Arc<dyn StatsRepository> = stats_repository.clone();
        let engine = Arc::new(MatchEngine::new(matches, stats));
        let dispatcher = EventDispatcher::new(Arc::clone(&engine));

        TestSetup {
            match_repository,
            stats_repository,
            engine,
            dispatcher,
        }
    }
}
