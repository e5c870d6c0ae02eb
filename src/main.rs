use rpsduel::{
    config::AppConfig,
    gateway,
    matches::{start_cleanup_task, InMemoryMatchRepository, MatchRepository},
    stats::InMemoryStatsRepository,
    AppState, MatchEngine,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rpsduel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting rock paper scissors match server");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let match_repository: Arc<dyn MatchRepository + Send + Sync> =
        Arc::new(InMemoryMatchRepository::new());
    let stats_repository = Arc::new(InMemoryStatsRepository::new());
    let engine = Arc::new(MatchEngine::new(
        Arc::clone(&match_repository),
        stats_repository,
    ));

    tokio::spawn(start_cleanup_task(
        Arc::clone(&match_repository),
        config.cleanup.clone(),
    ));

    let app = gateway::router(AppState::new(match_repository, engine));

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind = %config.bind, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!(bind = %config.bind, "Server listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }
}
