//! Action discovery: what can the player do right now?
//!
//! Proximity is measured to the edge of an instance's bounding box, not its
//! center, so large buildings are reachable from any side. Only the single
//! nearest instance inside the interaction radius contributes actions; Build
//! and Plant are offered only when nothing is nearby, since you cannot build
//! on top of something.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::def::{ActionKind, CollectionKind, ElementDef};
use crate::game::Game;
use crate::state::ElementInstance;

/// One selectable target for an action kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOption {
    pub target_element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_collection: Option<CollectionKind>,
}

/// An action kind with its currently-legal targets, in presentation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableAction {
    pub kind: ActionKind,
    pub options: Vec<ActionOption>,
}

/// Computes the ordered set of currently-legal actions: always-available
/// kinds first (when nothing is nearby), then the nearest instance's own.
pub fn calculate_available_actions(game: &Game) -> Vec<AvailableAction> {
    let mut actions: Vec<AvailableAction> = Vec::new();
    let nearest = nearest_instance(game);

    if nearest.is_none() {
        push_always_available(game, &mut actions);
    }
    if let Some((id, instance)) = nearest {
        push_instance_actions(game, id, instance, &mut actions);
    }
    actions
}

fn push_option(actions: &mut Vec<AvailableAction>, kind: ActionKind, option: ActionOption) {
    match actions.iter_mut().find(|entry| entry.kind == kind) {
        Some(entry) => entry.options.push(option),
        None => actions.push(AvailableAction {
            kind,
            options: vec![option],
        }),
    }
}

fn push_always_available(game: &Game, actions: &mut Vec<AvailableAction>) {
    let defs = &game.definition;
    for (kind, collection) in [
        (ActionKind::Build, CollectionKind::Buildings),
        (ActionKind::Plant, CollectionKind::Plants),
    ] {
        if !defs.action_enabled(kind) {
            continue;
        }
        for (name, def) in defs.elements.collection(collection) {
            if def.actions.contains_key(&kind) {
                push_option(
                    actions,
                    kind,
                    ActionOption {
                        target_element: name.clone(),
                        target_instance_id: None,
                        target_collection: Some(collection),
                    },
                );
            }
        }
    }
}

fn push_instance_actions(
    game: &Game,
    id: &str,
    instance: &ElementInstance,
    actions: &mut Vec<AvailableAction>,
) {
    let Some(def) = game
        .definition
        .element(instance.collection, &instance.element)
    else {
        return;
    };

    for kind in def.actions.keys().copied() {
        if !game.definition.action_enabled(kind) {
            continue;
        }
        match kind {
            // Placement kinds never target an existing instance.
            ActionKind::Build | ActionKind::Plant => continue,
            // A live animal must be killed before its carcass is harvestable.
            ActionKind::Harvest
                if instance.collection == CollectionKind::Animals && !instance.is_dead =>
            {
                continue
            }
            ActionKind::Upgrade => {
                let level = instance.level.unwrap_or(1);
                if def.max_level.map_or(true, |max| level >= max) {
                    continue;
                }
            }
            // A crafting station offers its compatible items, not itself.
            ActionKind::Craft if instance.collection == CollectionKind::Buildings => {
                for item in craftable_items(game, def) {
                    push_option(
                        actions,
                        ActionKind::Craft,
                        ActionOption {
                            target_element: item,
                            target_instance_id: None,
                            target_collection: Some(CollectionKind::Items),
                        },
                    );
                }
                continue;
            }
            _ => {}
        }
        push_option(
            actions,
            kind,
            ActionOption {
                target_element: instance.element.clone(),
                target_instance_id: Some(id.to_string()),
                target_collection: Some(instance.collection),
            },
        );
    }
}

fn craftable_items(game: &Game, station: &ElementDef) -> Vec<String> {
    station
        .compatible_items
        .iter()
        .filter(|item| {
            game.definition
                .action(CollectionKind::Items, item, ActionKind::Craft)
                .is_some()
        })
        .cloned()
        .collect()
}

/// The single nearest instance within the interaction radius, by
/// edge-of-bounding-box distance.
fn nearest_instance(game: &Game) -> Option<(&str, &ElementInstance)> {
    let character = game.active_character()?;
    let location = game.active_location()?;

    let mut best: Option<(&str, &ElementInstance, f64)> = None;
    for (id, instance) in &location.element_instances {
        let distance = edge_distance(game, character.x, character.y, instance);
        if distance > GameConfig::INTERACTION_RADIUS {
            continue;
        }
        if best.map_or(true, |(_, _, d)| distance < d) {
            best = Some((id.as_str(), instance, distance));
        }
    }
    best.map(|(id, instance, _)| (id, instance))
}

fn edge_distance(game: &Game, px: f64, py: f64, instance: &ElementInstance) -> f64 {
    let def = game
        .definition
        .element(instance.collection, &instance.element);
    let width = def.and_then(|d| d.width).unwrap_or(1.0) * GameConfig::CELL_SIZE;
    let height = def.and_then(|d| d.height).unwrap_or(1.0) * GameConfig::CELL_SIZE;

    let dx = (instance.x - px).max(px - (instance.x + width)).max(0.0);
    let dy = (instance.y - py).max(py - (instance.y + height)).max(0.0);
    (dx * dx + dy * dy).sqrt()
}
