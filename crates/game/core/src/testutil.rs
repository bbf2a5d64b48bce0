//! Fixture games shared across unit tests.
//!
//! Two small authored worlds: a lemonade stand economy (trade, craft,
//! quests) and a meadow survival sandbox (gathering, combat, building,
//! animals). Tests mutate their copy freely.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::def::{
    ActionDef, ActionKind, Amount, CollectionKind, Costs, ElementDef, Elements, GameDefinition,
    QuestCondition, QuestDef, StatDef, TrackedQuest,
};
use crate::game::Game;
use crate::state::{CharacterState, ElementInstance, GameState, LocationState, Patrol};

pub(crate) fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn costs(items: &[(&str, i64)]) -> Costs {
    Costs {
        items: items
            .iter()
            .map(|(name, n)| (name.to_string(), *n))
            .collect(),
        ..Default::default()
    }
}

fn counts(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
    entries
        .iter()
        .map(|(name, n)| (name.to_string(), *n))
        .collect()
}

fn outputs(entries: &[(&str, Amount)]) -> BTreeMap<String, Amount> {
    entries
        .iter()
        .map(|(name, amount)| (name.to_string(), *amount))
        .collect()
}

/// A trading-and-crafting game with a global inventory, no vital stats, and
/// one tracked quest. The player starts deep in debt.
pub(crate) fn lemonade_game() -> Game {
    let mut items = BTreeMap::new();
    items.insert(
        "Lemonade".to_string(),
        ElementDef {
            actions: [
                (
                    ActionKind::Craft,
                    ActionDef {
                        costs: costs(&[
                            ("Lemon", 2),
                            ("Ice", 1),
                            ("Sugar", 1),
                            ("Water", 1),
                            ("Cup", 1),
                        ]),
                        ..Default::default()
                    },
                ),
                (
                    ActionKind::Sell,
                    ActionDef {
                        price: Some(2),
                        ..Default::default()
                    },
                ),
            ]
            .into(),
            ..Default::default()
        },
    );
    items.insert(
        "Sugar".to_string(),
        ElementDef {
            actions: [(
                ActionKind::Buy,
                ActionDef {
                    price: Some(4),
                    outputs: outputs(&[("Sugar", Amount::Fixed(10))]),
                    ..Default::default()
                },
            )]
            .into(),
            ..Default::default()
        },
    );

    let mut buildings = BTreeMap::new();
    buildings.insert(
        "Lemonade Stand".to_string(),
        ElementDef {
            actions: [
                (
                    ActionKind::Build,
                    ActionDef {
                        costs: Costs {
                            money: 20,
                            ..Default::default()
                        },
                        ..Default::default()
                    },
                ),
                (ActionKind::Craft, ActionDef::default()),
            ]
            .into(),
            compatible_items: vec!["Lemonade".to_string()],
            ..Default::default()
        },
    );

    let definition = GameDefinition {
        name: "Lemonade Stand".to_string(),
        elements: Elements {
            items,
            buildings,
            ..Default::default()
        },
        quests: [(
            "first_day".to_string(),
            QuestDef::Tracked(TrackedQuest {
                title: Some("First Day".to_string()),
                conditions: vec![
                    QuestCondition {
                        action: ActionKind::Buy,
                        target: "Sugar".to_string(),
                        quantity: 1,
                    },
                    QuestCondition {
                        action: ActionKind::Craft,
                        target: "Lemonade".to_string(),
                        quantity: 1,
                    },
                ],
            }),
        )]
        .into(),
        ..Default::default()
    };

    let instance = GameState {
        active_character: "Alex".to_string(),
        active_location: "Street".to_string(),
        characters: [(
            "Alex".to_string(),
            CharacterState {
                x: 100.0,
                y: 100.0,
                location: "Street".to_string(),
                ..Default::default()
            },
        )]
        .into(),
        locations: [("Street".to_string(), LocationState::default())].into(),
        inventory: counts(&[("Ice", 48), ("Water", 48), ("Lemon", 100), ("Cup", 50)]),
        money: -5000,
        ..Default::default()
    };

    Game::new(definition, instance)
}

/// A survival sandbox: tools, food, a buildable hut, and one wolf on patrol.
pub(crate) fn meadow_game() -> Game {
    let mut items = BTreeMap::new();
    items.insert("Axe".to_string(), ElementDef::default());
    items.insert(
        "Spear".to_string(),
        ElementDef {
            actions: [(
                ActionKind::Attack,
                ActionDef {
                    damage: Some(Amount::Range(2, 5)),
                    time_in_minutes: Some(5.0),
                    ..Default::default()
                },
            )]
            .into(),
            ..Default::default()
        },
    );
    items.insert(
        "Berries".to_string(),
        ElementDef {
            actions: [(
                ActionKind::Eat,
                ActionDef {
                    stat_gains: counts(&[("Energy", 2)]),
                    time_in_minutes: Some(15.0),
                    ..Default::default()
                },
            )]
            .into(),
            ..Default::default()
        },
    );
    items.insert(
        "Mint".to_string(),
        ElementDef {
            actions: [(
                ActionKind::Eat,
                ActionDef {
                    stat_gains: counts(&[("Energy", 1)]),
                    ..Default::default()
                },
            )]
            .into(),
            ..Default::default()
        },
    );

    let mut plants = BTreeMap::new();
    plants.insert(
        "Oak Tree".to_string(),
        ElementDef {
            actions: [(
                ActionKind::Harvest,
                ActionDef {
                    required_item: Some("Axe".to_string()),
                    outputs: outputs(&[("Wood", Amount::Range(2, 4))]),
                    time_in_hours: Some(1.0),
                    ..Default::default()
                },
            )]
            .into(),
            ..Default::default()
        },
    );
    plants.insert(
        "Berry Bush".to_string(),
        ElementDef {
            actions: [
                (
                    ActionKind::Forage,
                    ActionDef {
                        outputs: outputs(&[("Berries", Amount::Fixed(2))]),
                        time_in_minutes: Some(30.0),
                        ..Default::default()
                    },
                ),
                (
                    ActionKind::Plant,
                    ActionDef {
                        costs: costs(&[("Berries", 1)]),
                        ..Default::default()
                    },
                ),
            ]
            .into(),
            ..Default::default()
        },
    );

    let mut buildings = BTreeMap::new();
    buildings.insert(
        "Hut".to_string(),
        ElementDef {
            actions: [
                (
                    ActionKind::Build,
                    ActionDef {
                        costs: costs(&[("Wood", 3)]),
                        time_in_hours: Some(2.0),
                        ..Default::default()
                    },
                ),
                (
                    ActionKind::Upgrade,
                    ActionDef {
                        costs: costs(&[("Wood", 5)]),
                        time_in_hours: Some(2.0),
                        ..Default::default()
                    },
                ),
                (
                    ActionKind::Deconstruct,
                    ActionDef {
                        outputs: outputs(&[("Wood", Amount::Fixed(1))]),
                        ..Default::default()
                    },
                ),
            ]
            .into(),
            max_level: Some(3),
            ..Default::default()
        },
    );

    let mut animals = BTreeMap::new();
    animals.insert(
        "Wolf".to_string(),
        ElementDef {
            health: Some(10),
            actions: [
                (
                    ActionKind::Attack,
                    ActionDef {
                        damage: Some(Amount::Range(1, 3)),
                        attack_range: Some(48.0),
                        ..Default::default()
                    },
                ),
                (
                    ActionKind::Harvest,
                    ActionDef {
                        outputs: outputs(&[("Meat", Amount::Fixed(1))]),
                        ..Default::default()
                    },
                ),
            ]
            .into(),
            ..Default::default()
        },
    );
    animals.insert(
        "Rabbit".to_string(),
        ElementDef {
            health: Some(3),
            actions: [(
                ActionKind::Harvest,
                ActionDef {
                    outputs: outputs(&[("Meat", Amount::Fixed(1))]),
                    ..Default::default()
                },
            )]
            .into(),
            ..Default::default()
        },
    );

    let stats = [
        (
            "Energy".to_string(),
            StatDef {
                max_amount: Some(10),
            },
        ),
        (
            "Health".to_string(),
            StatDef {
                max_amount: Some(20),
            },
        ),
    ]
    .into();

    let definition = GameDefinition {
        name: "Meadow".to_string(),
        elements: Elements {
            items,
            plants,
            buildings,
            animals,
            stats,
        },
        ..Default::default()
    };

    let mut element_instances = BTreeMap::new();
    element_instances.insert(
        "oak-tree-1".to_string(),
        ElementInstance::new(CollectionKind::Plants, "Oak Tree", 0.0, 0.0),
    );
    element_instances.insert(
        "berry-bush-1".to_string(),
        ElementInstance::new(
            CollectionKind::Plants,
            "Berry Bush",
            600.0,
            600.0,
        ),
    );
    let mut wolf = ElementInstance::new(CollectionKind::Animals, "Wolf", 300.0, 20.0);
    wolf.health = Some(10);
    wolf.patrol = Some(Patrol {
        min_x: 200.0,
        max_x: 400.0,
        min_y: 0.0,
        max_y: 100.0,
    });
    element_instances.insert("wolf-1".to_string(), wolf);

    let instance = GameState {
        active_character: "Ava".to_string(),
        active_location: "Meadow".to_string(),
        characters: [(
            "Ava".to_string(),
            CharacterState {
                x: 200.0,
                y: 200.0,
                location: "Meadow".to_string(),
                stats: counts(&[("Energy", 5), ("Health", 20)]),
                ..Default::default()
            },
        )]
        .into(),
        locations: [(
            "Meadow".to_string(),
            LocationState {
                element_instances,
                ..Default::default()
            },
        )]
        .into(),
        inventory: counts(&[
            ("Axe", 1),
            ("Spear", 1),
            ("Berries", 3),
            ("Mint", 2),
            ("Wood", 8),
        ]),
        ..Default::default()
    };

    Game::new(definition, instance)
}
