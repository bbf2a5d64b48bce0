//! Build, Upgrade, Plant, Deconstruct: placing and removing world instances.

use rand::Rng;

use crate::def::{ActionKind, CollectionKind};
use crate::game::Game;
use crate::state::{paths, ElementInstance, Patch};

use super::common::{advance_time, charge_costs, describe_gains, grant_items, next_instance_id};
use super::{ActionTarget, PendingAction, ResolveOptions, ResolverResult};

/// A fresh build places a level-1 instance at the character's feet; an
/// upgrade resets the named instance's progress and bills the Upgrade
/// schedule instead.
pub(super) fn build(
    game: &Game,
    element: &str,
    existing_instance_id: Option<&str>,
    opts: &ResolveOptions,
) -> ResolverResult {
    let Some(def) = game.definition.element(CollectionKind::Buildings, element) else {
        return ResolverResult::fail(format!("You cannot build a {element}."));
    };

    match existing_instance_id {
        Some(id) => {
            let Some(instance) = game.instance.active_instance(id) else {
                return ResolverResult::fail("There is nothing here to upgrade.");
            };
            let level = instance.level.unwrap_or(1);
            if def.max_level.map_or(true, |max| level >= max) {
                return ResolverResult::fail(format!("The {element} is fully upgraded."));
            }
            let Some(action) = def.actions.get(&ActionKind::Upgrade) else {
                return ResolverResult::fail(format!("The {element} cannot be upgraded."));
            };

            let mut updates = match charge_costs(game, &action.costs, opts) {
                Ok(updates) => updates,
                Err(message) => return ResolverResult::fail(message),
            };
            updates.push(Patch::set(
                paths::element_instance_field(&game.instance.active_location, id, "progress"),
                0,
            ));
            updates.extend(advance_time(game, action, false));

            ResolverResult::ok(format!("You begin upgrading the {element}."), updates)
                .with_pending(PendingAction {
                    kind: ActionKind::Upgrade,
                    target_element: element.to_string(),
                    instance_id: Some(id.to_string()),
                })
        }
        None => {
            let Some(action) = def.actions.get(&ActionKind::Build) else {
                return ResolverResult::fail(format!("You cannot build a {element}."));
            };
            let Some(character) = game.active_character() else {
                return ResolverResult::fail("No active character.");
            };

            let mut updates = match charge_costs(game, &action.costs, opts) {
                Ok(updates) => updates,
                Err(message) => return ResolverResult::fail(message),
            };
            let id = next_instance_id(game, element);
            let mut instance =
                ElementInstance::new(CollectionKind::Buildings, element, character.x, character.y);
            instance.level = Some(1);
            instance.progress = Some(0.0);
            updates.push(Patch::set(
                paths::element_instance(&game.instance.active_location, &id),
                instance,
            ));
            updates.extend(advance_time(game, action, false));

            ResolverResult::ok(format!("You begin building a {element}."), updates)
                .with_pending(PendingAction {
                    kind: ActionKind::Build,
                    target_element: element.to_string(),
                    instance_id: Some(id),
                })
        }
    }
}

/// Plants a new instance at the character's position, stamped for the Plant
/// quest condition and dated for growth.
pub(super) fn plant(game: &Game, element: &str, opts: &ResolveOptions) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(CollectionKind::Plants, element, ActionKind::Plant)
    else {
        return ResolverResult::fail(format!("You cannot plant a {element}."));
    };
    let Some(character) = game.active_character() else {
        return ResolverResult::fail("No active character.");
    };

    let mut updates = match charge_costs(game, &action.costs, opts) {
        Ok(updates) => updates,
        Err(message) => return ResolverResult::fail(message),
    };

    let def = game.definition.element(CollectionKind::Plants, element);
    let id = next_instance_id(game, element);
    let mut instance =
        ElementInstance::new(CollectionKind::Plants, element, character.x, character.y);
    instance.planted_at = Some(game.instance.clock.total_minutes());
    instance.was_planted = true;
    instance.health = def.and_then(|d| d.health);
    updates.push(Patch::set(
        paths::element_instance(&game.instance.active_location, &id),
        instance,
    ));
    updates.extend(advance_time(game, action, false));

    ResolverResult::ok(format!("You plant a {element}."), updates)
}

/// Tears a placed building down, refunding whatever the Deconstruct
/// definition yields.
pub(super) fn deconstruct<R: Rng + ?Sized>(
    game: &Game,
    target: &ActionTarget,
    opts: &ResolveOptions,
    rng: &mut R,
) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(target.collection, &target.element, ActionKind::Deconstruct)
    else {
        return ResolverResult::fail(format!("You cannot deconstruct the {}.", target.element));
    };
    if game.instance.active_instance(&target.instance_id).is_none() {
        return ResolverResult::fail("There is nothing here to deconstruct.");
    }

    let mut updates = match charge_costs(game, &action.costs, opts) {
        Ok(updates) => updates,
        Err(message) => return ResolverResult::fail(message),
    };
    let (refund_patches, refunded) = grant_items(game, &action.outputs, rng);
    updates.extend(refund_patches);
    updates.push(Patch::unset(paths::element_instance(
        &game.instance.active_location,
        &target.instance_id,
    )));
    updates.extend(advance_time(game, action, false));

    let story = if refunded.is_empty() {
        format!("You take down the {}.", target.element)
    } else {
        format!(
            "You take down the {}, recovering {}.",
            target.element,
            describe_gains(&refunded)
        )
    };
    ResolverResult::ok(story, updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::apply_patches;
    use crate::testutil::{meadow_game, rng};

    #[test]
    fn new_build_places_a_level_one_instance() {
        let game = meadow_game();
        let result = build(&game, "Hut", None, &ResolveOptions::default());
        assert!(result.success, "{:?}", result.message);
        assert_eq!(result.pending.as_ref().unwrap().kind, ActionKind::Build);

        let next = apply_patches(&game.instance, &result.updates).unwrap();
        let hut = next.active_instance("hut-1").expect("hut placed");
        assert_eq!(hut.level, Some(1));
        let ava = &next.characters["Ava"];
        assert_eq!((hut.x, hut.y), (ava.x, ava.y));
    }

    #[test]
    fn upgrade_uses_the_upgrade_cost_schedule() {
        let mut game = meadow_game();
        let built = build(&game, "Hut", None, &ResolveOptions::default());
        game.instance = apply_patches(&game.instance, &built.updates).unwrap();
        let wood_after_build = game.item_count("Wood");

        let upgraded = build(&game, "Hut", Some("hut-1"), &ResolveOptions::default());
        assert!(upgraded.success, "{:?}", upgraded.message);
        assert_eq!(upgraded.pending.as_ref().unwrap().kind, ActionKind::Upgrade);
        game.instance = apply_patches(&game.instance, &upgraded.updates).unwrap();

        // Upgrade costs 5 Wood where Build costs 3.
        assert_eq!(game.item_count("Wood"), wood_after_build - 5);
        assert_eq!(
            game.instance.active_instance("hut-1").unwrap().progress,
            Some(0.0)
        );
    }

    #[test]
    fn upgrade_at_max_level_is_rejected() {
        let mut game = meadow_game();
        let built = build(&game, "Hut", None, &ResolveOptions::default());
        game.instance = apply_patches(&game.instance, &built.updates).unwrap();
        if let Some(location) = game.instance.locations.get_mut("Meadow") {
            if let Some(hut) = location.element_instances.get_mut("hut-1") {
                hut.level = Some(3);
            }
        }
        let result = build(&game, "Hut", Some("hut-1"), &ResolveOptions::default());
        assert!(!result.success);
        assert!(result.updates.is_empty());
    }

    #[test]
    fn plant_stamps_was_planted_and_planted_at() {
        let game = meadow_game();
        let result = plant(&game, "Berry Bush", &ResolveOptions::default());
        assert!(result.success, "{:?}", result.message);
        let next = apply_patches(&game.instance, &result.updates).unwrap();
        // berry-bush-1 is seeded; the new one lands at -2.
        let planted = next.active_instance("berry-bush-2").expect("bush planted");
        assert!(planted.was_planted);
        assert_eq!(
            planted.planted_at,
            Some(game.instance.clock.total_minutes())
        );
    }

    #[test]
    fn deconstruct_removes_the_instance() {
        let mut game = meadow_game();
        let built = build(&game, "Hut", None, &ResolveOptions::default());
        game.instance = apply_patches(&game.instance, &built.updates).unwrap();

        let result = deconstruct(
            &game,
            &ActionTarget {
                element: "Hut".into(),
                instance_id: "hut-1".into(),
                collection: CollectionKind::Buildings,
            },
            &ResolveOptions::default(),
            &mut rng(),
        );
        assert!(result.success, "{:?}", result.message);
        let next = apply_patches(&game.instance, &result.updates).unwrap();
        assert!(next.active_instance("hut-1").is_none());
    }
}
