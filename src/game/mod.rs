// Public API
pub use logic::{resolve, Outcome};
pub use moves::{Move, Variant};

// Internal modules
mod logic;
mod moves;
