//! World simulation that runs between player actions.

pub mod animals;
pub mod viewport;

pub use animals::{update_animal_positions, SimulationUpdate};
pub use viewport::{calculate_viewport_bounds, StageSize, ViewportBounds};
