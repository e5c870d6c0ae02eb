// Public API
pub use render::{Audience, Control, RenderInstruction, RenderKind, ResultSummary, SideSummary};
pub use service::MatchEngine;

// Internal modules
mod render;
mod service;
