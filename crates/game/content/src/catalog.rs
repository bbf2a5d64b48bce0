//! Built-in demo games, compiled into the binary.

use fable_core::GameDefinition;

use crate::loaders::{DefinitionLoader, LoadResult};

/// A small trading economy: buy ingredients, craft lemonade, pay off debt.
pub fn lemonade_stand() -> LoadResult<GameDefinition> {
    DefinitionLoader::from_json_str(include_str!("../data/lemonade_stand.json"))
}

/// A survival sandbox with gathering, building, and wildlife.
pub fn meadow() -> LoadResult<GameDefinition> {
    DefinitionLoader::from_json_str(include_str!("../data/meadow.json"))
}

/// Looks up a built-in game by name.
pub fn by_name(name: &str) -> Option<LoadResult<GameDefinition>> {
    match name {
        "lemonade_stand" => Some(lemonade_stand()),
        "meadow" => Some(meadow()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fable_core::{ActionKind, CollectionKind};

    #[test]
    fn lemonade_stand_parses_and_is_playable() {
        let def = lemonade_stand().unwrap();
        assert_eq!(def.name, "Lemonade Stand");
        let craft = def
            .action(CollectionKind::Items, "Lemonade", ActionKind::Craft)
            .expect("lemonade is craftable");
        assert_eq!(craft.costs.items["Lemon"], 2);

        let start = def.start.as_ref().expect("has a start block");
        assert_eq!(start.money, -5000);
        assert_eq!(start.inventory["Lemon"], 100);
    }

    #[test]
    fn meadow_parses_with_wildlife() {
        let def = meadow().unwrap();
        let wolf = def
            .element(CollectionKind::Animals, "Wolf")
            .expect("wolves roam the meadow");
        assert_eq!(wolf.health, Some(10));
        assert!(wolf.actions[&ActionKind::Attack].attack_range.is_some());

        let start = def.start.as_ref().unwrap();
        let location = &start.locations["Meadow"];
        assert!(location.element_instances["wolf-1"].patrol.is_some());
    }

    #[test]
    fn unknown_names_are_absent() {
        assert!(by_name("volcano").is_none());
        assert!(by_name("meadow").is_some());
    }
}
