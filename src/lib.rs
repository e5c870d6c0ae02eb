// Library crate for the rock paper scissors match server
// This file exposes the public API for integration tests

pub mod config;
pub mod engine;
pub mod game;
pub mod gateway;
pub mod matches;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use engine::{MatchEngine, RenderInstruction, RenderKind};
pub use game::{Move, Outcome, Variant};
pub use gateway::{EventDispatcher, GatewayEvent};
pub use matches::{InMemoryMatchRepository, MatchRepository, SubmitMoveResult};
pub use shared::{AppError, AppState};
pub use stats::{InMemoryStatsRepository, StatsRepository};
