//! Seeding a fresh play-through from a definition's start block.

use std::collections::BTreeMap;

use fable_core::{
    CharacterState, Clock, Game, GameDefinition, GameState, LocationState,
};

/// Builds the initial [`GameState`] described by the definition's `start`
/// block. A definition without one yields an empty default state.
///
/// Every location referenced by a character or as the active location gets
/// an entry, even when the start block doesn't spell it out.
pub fn seed_instance(definition: &GameDefinition) -> GameState {
    let Some(start) = &definition.start else {
        return GameState::default();
    };

    let characters: BTreeMap<String, CharacterState> = start
        .characters
        .iter()
        .map(|(name, seed)| {
            (
                name.clone(),
                CharacterState {
                    x: seed.x,
                    y: seed.y,
                    location: seed.location.clone(),
                    stats: seed.stats.clone(),
                    ..Default::default()
                },
            )
        })
        .collect();

    let mut locations: BTreeMap<String, LocationState> = start
        .locations
        .iter()
        .map(|(name, seed)| {
            (
                name.clone(),
                LocationState {
                    inventory: seed.inventory.clone(),
                    element_instances: seed.element_instances.clone(),
                },
            )
        })
        .collect();
    locations.entry(start.active_location.clone()).or_default();
    for character in characters.values() {
        locations.entry(character.location.clone()).or_default();
    }

    GameState {
        clock: Clock::default(),
        active_character: start.active_character.clone(),
        active_location: start.active_location.clone(),
        characters,
        locations,
        inventory: start.inventory.clone(),
        money: start.money,
        completed_quests: BTreeMap::new(),
    }
}

/// A ready-to-play [`Game`] seeded from the definition.
pub fn new_game(definition: GameDefinition) -> Game {
    let instance = seed_instance(&definition);
    Game::new(definition, instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_start_block_yields_a_default_state() {
        let state = seed_instance(&GameDefinition::default());
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn referenced_locations_always_exist() {
        let def = crate::loaders::DefinitionLoader::from_json_str(
            r#"{
                "name": "Two Rooms",
                "start": {
                    "activeCharacter": "Kim",
                    "activeLocation": "East",
                    "characters": { "Kim": { "location": "West" } }
                }
            }"#,
        )
        .unwrap();
        let state = seed_instance(&def);
        assert!(state.locations.contains_key("East"));
        assert!(state.locations.contains_key("West"));
    }

    #[test]
    fn clock_starts_on_day_one() {
        let game = new_game(crate::catalog::meadow().unwrap());
        assert_eq!(game.instance.clock.day, 1);
        assert!(game.active_character().is_some());
    }
}
