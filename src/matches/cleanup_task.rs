use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, instrument};

use super::repository::MatchRepository;
use crate::shared::AppError;

/// Configuration for the cleanup task
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run the cleanup task
    pub cleanup_interval: Duration,
    /// How long a match may stay open before it is expired
    pub match_ttl: Duration,
    /// How long a resolved match is kept around for late button presses
    pub resolved_retention: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(60),
            match_ttl: Duration::from_secs(10 * 60), // 10 minutes
            resolved_retention: Duration::from_secs(60),
        }
    }
}

/// Counts from a single sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: usize,
    pub purged: usize,
}

/// Starts the background cleanup task that periodically expires abandoned matches
#[instrument(skip(match_repository))]
pub async fn start_cleanup_task(
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
    config: CleanupConfig,
) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        match_ttl_secs = config.match_ttl.as_secs(),
        resolved_retention_secs = config.resolved_retention.as_secs(),
        "Starting match cleanup background task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;

        match sweep_matches(&match_repository, &config).await {
            Ok(report) => {
                info!(
                    expired_count = report.expired,
                    purged_count = report.purged,
                    "Match cleanup completed"
                );
            }
            Err(e) => {
                error!(error = %e, "Match cleanup task failed");
            }
        }
    }
}

/// Expires stale open matches, then drops resolved ones past their retention
async fn sweep_matches(
    match_repository: &Arc<dyn MatchRepository + Send + Sync>,
    config: &CleanupConfig,
) -> Result<SweepReport, AppError> {
    let expired = match_repository.expire_older_than(config.match_ttl).await?;
    let purged = match_repository
        .purge_resolved_older_than(config.resolved_retention)
        .await?;

    Ok(SweepReport { expired, purged })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Move, Variant};
    use crate::matches::repository::InMemoryMatchRepository;

    fn immediate() -> CleanupConfig {
        CleanupConfig {
            cleanup_interval: Duration::from_millis(10),
            match_ttl: Duration::from_millis(1),
            resolved_retention: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_sweep_removes_stale_matches() {
        let concrete_repo = Arc::new(InMemoryMatchRepository::new());
        let repo: Arc<dyn MatchRepository + Send + Sync> = concrete_repo.clone();

        let open = repo.create_match(Variant::Classic).await.unwrap();
        let done = repo.create_match(Variant::Classic).await.unwrap();
        repo.submit_move(&done, "alice", "Alice", Move::Rock)
            .await
            .unwrap();
        repo.submit_move(&done, "bob", "Bob", Move::Paper)
            .await
            .unwrap();

        // Wait a bit so both records are past the thresholds
        tokio::time::sleep(Duration::from_millis(10)).await;

        let report = sweep_matches(&repo, &immediate()).await.unwrap();

        assert_eq!(report, SweepReport { expired: 1, purged: 1 });
        assert!(repo.get_match(&open).await.unwrap().is_none());
        assert!(concrete_repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_sweep_preserves_active_matches() {
        let repo: Arc<dyn MatchRepository + Send + Sync> =
            Arc::new(InMemoryMatchRepository::new());
        let match_id = repo.create_match(Variant::Classic).await.unwrap();

        let report = sweep_matches(&repo, &CleanupConfig::default())
            .await
            .unwrap();

        assert_eq!(report, SweepReport::default());
        assert!(repo.get_match(&match_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sweep_with_no_matches() {
        let repo: Arc<dyn MatchRepository + Send + Sync> =
            Arc::new(InMemoryMatchRepository::new());

        let report = sweep_matches(&repo, &immediate()).await.unwrap();

        assert_eq!(report, SweepReport::default());
    }

    #[tokio::test]
    async fn test_background_task_expires_matches() {
        let concrete_repo = Arc::new(InMemoryMatchRepository::new());
        let repo: Arc<dyn MatchRepository + Send + Sync> = concrete_repo.clone();
        repo.create_match(Variant::Classic).await.unwrap();

        let handle = tokio::spawn(start_cleanup_task(repo, immediate()));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(concrete_repo.is_empty().await);
    }
}
