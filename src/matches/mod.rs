// Public API - what other modules can use
pub use cleanup_task::{start_cleanup_task, CleanupConfig};
pub use handlers::get_match;
pub use models::{MatchModel, MatchStatus, ParticipantMove};
pub use repository::{InMemoryMatchRepository, MatchRepository, SubmitMoveResult};
pub use types::{MatchResponse, ParticipantView};

// Internal modules
mod cleanup_task;
mod handlers;
pub mod models;
pub mod repository;
mod types;
