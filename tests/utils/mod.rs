pub mod actions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::{choice_event, choose, display_name, start_match};
pub use setup::{TestSetup, TestSetupBuilder};
