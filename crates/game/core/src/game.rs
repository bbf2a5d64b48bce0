//! The pairing of immutable definition and mutable instance.

use crate::def::GameDefinition;
use crate::state::{CharacterState, GameState, LocationState};

/// A running game: authored content plus the current play-through state.
///
/// Resolvers read through `&Game` and mutate nothing; all writes happen by
/// applying the patches they return.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Game {
    pub definition: GameDefinition,
    pub instance: GameState,
}

impl Game {
    pub fn new(definition: GameDefinition, instance: GameState) -> Self {
        Self {
            definition,
            instance,
        }
    }

    pub fn active_character(&self) -> Option<&CharacterState> {
        self.instance.active_character()
    }

    pub fn active_location(&self) -> Option<&LocationState> {
        self.instance.active_location()
    }
}
