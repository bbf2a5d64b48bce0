//! Resource ledger: inventory and stat access.
//!
//! Inventory addressing is a per-game toggle (global vs per-location), so all
//! resolvers go through these accessors instead of hardcoding a path.

use std::collections::BTreeMap;

use crate::game::Game;
use crate::state::paths;

static EMPTY_INVENTORY: BTreeMap<String, i64> = BTreeMap::new();

impl Game {
    /// The inventory the active character draws from.
    pub fn inventory(&self) -> &BTreeMap<String, i64> {
        if self.definition.use_location_based_inventory {
            self.active_location()
                .map(|location| &location.inventory)
                .unwrap_or(&EMPTY_INVENTORY)
        } else {
            &self.instance.inventory
        }
    }

    /// Dot-path of the inventory selected by the addressing mode.
    pub fn inventory_path(&self) -> String {
        if self.definition.use_location_based_inventory {
            format!(
                "instance.locations.{}.inventory",
                self.instance.active_location
            )
        } else {
            "instance.inventory".to_string()
        }
    }

    /// Dot-path of one item's count in the selected inventory.
    pub fn item_path(&self, item: &str) -> String {
        if self.definition.use_location_based_inventory {
            paths::location_inventory_item(&self.instance.active_location, item)
        } else {
            paths::global_inventory_item(item)
        }
    }

    /// Count of one item, zero when absent.
    pub fn item_count(&self, item: &str) -> i64 {
        self.inventory().get(item).copied().unwrap_or(0)
    }

    /// The active character's stat value, zero when absent.
    pub fn character_stat(&self, stat: &str) -> i64 {
        self.active_character()
            .map(|character| character.stat(stat))
            .unwrap_or(0)
    }

    /// Dot-path of the active character's stat.
    pub fn character_stat_path(&self, stat: &str) -> String {
        paths::character_stat(&self.instance.active_character, stat)
    }
}

#[cfg(test)]
mod tests {
    use crate::def::GameDefinition;
    use crate::game::Game;
    use crate::state::{CharacterState, GameState, LocationState};

    fn base_game(location_based: bool) -> Game {
        let mut game = Game {
            definition: GameDefinition {
                use_location_based_inventory: location_based,
                ..Default::default()
            },
            instance: GameState {
                active_character: "Ava".into(),
                active_location: "Meadow".into(),
                ..Default::default()
            },
        };
        game.instance.characters.insert(
            "Ava".into(),
            CharacterState {
                location: "Meadow".into(),
                stats: [("Energy".to_string(), 7)].into(),
                ..Default::default()
            },
        );
        let mut location = LocationState::default();
        location.inventory.insert("Wood".into(), 3);
        game.instance.locations.insert("Meadow".into(), location);
        game.instance.inventory.insert("Wood".into(), 9);
        game
    }

    #[test]
    fn global_mode_reads_instance_inventory() {
        let game = base_game(false);
        assert_eq!(game.item_count("Wood"), 9);
        assert_eq!(game.item_path("Wood"), "instance.inventory.Wood");
        assert_eq!(game.inventory_path(), "instance.inventory");
    }

    #[test]
    fn location_mode_reads_active_location_inventory() {
        let game = base_game(true);
        assert_eq!(game.item_count("Wood"), 3);
        assert_eq!(
            game.item_path("Wood"),
            "instance.locations.Meadow.inventory.Wood"
        );
    }

    #[test]
    fn missing_stat_defaults_to_zero() {
        let game = base_game(false);
        assert_eq!(game.character_stat("Energy"), 7);
        assert_eq!(game.character_stat("Luck"), 0);
        assert_eq!(
            game.character_stat_path("Energy"),
            "instance.characters.Ava.stats.Energy"
        );
    }
}
