//! Mutable game state: the typed tree, the patch protocol that mutates it,
//! the clock, and the resource ledger.

pub mod clock;
pub mod ledger;
pub mod patch;
pub mod paths;
mod types;

pub use clock::{apply_energy_depletion, calculate_time_update, TimeUpdate};
pub use patch::{apply_patches, CharacterField, Patch, PatchError, PatchTarget};
pub use types::{
    CharacterState, Clock, ClockTime, CompletedQuest, ElementInstance, GameState, LocationState,
    Meridiem, Patrol,
};
