//! Runtime orchestration for the game engine.
//!
//! This crate wires the deterministic core, the authored content, and the
//! external AI narrator into a playable session. Consumers embed
//! [`GameSession`] directly for single-threaded turn-by-turn play, or spawn a
//! [`SimulationWorker`] to get a background task that ticks the world on an
//! interval while serving commands through [`SessionHandle`].
//!
//! Modules by responsibility:
//! - [`session`] funnels every action through one resolve-then-apply path
//! - [`narrator`] defines the external narrator contract and wire shape
//! - [`worker`] keeps the background tick loop internal to the crate
//! - [`settings`] holds the debug toggles resolvers consult

pub mod error;
pub mod narrator;
pub mod session;
pub mod settings;
pub mod worker;

pub use error::{Result, RuntimeError};
pub use narrator::{Narrator, NarratorResponse, NullNarrator};
pub use session::{GameSession, SessionOutcome};
pub use settings::DebugSettings;
pub use worker::{SessionHandle, SimulationWorker};

use fable_core::Game;

/// Seeds a fresh [`Game`] for one of the built-in demo games, by name.
pub fn builtin_game(name: &str) -> Option<Game> {
    match fable_content::catalog::by_name(name)? {
        Ok(definition) => Some(fable_content::new_game(definition)),
        Err(error) => {
            tracing::error!(%error, name, "built-in game failed to load");
            None
        }
    }
}
