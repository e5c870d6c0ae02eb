mod errors;
pub mod models;
pub mod repository;

pub use errors::StatsError;
pub use models::*;
pub use repository::{InMemoryStatsRepository, StatsRepository};
