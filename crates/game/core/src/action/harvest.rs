//! Harvest and Forage: gathering from placed element instances.
//!
//! The two differ only in what happens to the target. Harvest consumes the
//! instance outright; Forage leaves it standing and stamps `lastForaged`,
//! allowing at most one forage per in-game day until Sleep clears the stamp.

use rand::Rng;

use crate::game::Game;
use crate::state::{paths, Patch};

use crate::def::ActionKind;

use super::common::{advance_time, charge_costs, describe_gains, grant_items};
use super::{ActionTarget, ResolveOptions, ResolverResult};

pub(super) fn harvest<R: Rng + ?Sized>(
    game: &Game,
    target: &ActionTarget,
    opts: &ResolveOptions,
    rng: &mut R,
) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(target.collection, &target.element, ActionKind::Harvest)
    else {
        return ResolverResult::fail(format!("You cannot harvest the {}.", target.element));
    };
    if game.instance.active_instance(&target.instance_id).is_none() {
        return ResolverResult::fail("There is nothing here to harvest.");
    }

    if let Some(tool) = &action.required_item {
        if game.item_count(tool) < 1 {
            return ResolverResult::fail(format!("You need a {tool} to harvest that."));
        }
    }

    let mut updates = match charge_costs(game, &action.costs, opts) {
        Ok(updates) => updates,
        Err(message) => return ResolverResult::fail(message),
    };
    let (output_patches, gained) = grant_items(game, &action.outputs, rng);
    updates.extend(output_patches);
    updates.push(Patch::unset(paths::element_instance(
        &game.instance.active_location,
        &target.instance_id,
    )));
    updates.extend(advance_time(game, action, false));

    ResolverResult::ok(
        format!(
            "You harvest the {} and collect {}.",
            target.element,
            describe_gains(&gained)
        ),
        updates,
    )
}

pub(super) fn forage<R: Rng + ?Sized>(
    game: &Game,
    target: &ActionTarget,
    opts: &ResolveOptions,
    rng: &mut R,
) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(target.collection, &target.element, ActionKind::Forage)
    else {
        return ResolverResult::fail(format!("You cannot forage the {}.", target.element));
    };
    let Some(instance) = game.instance.active_instance(&target.instance_id) else {
        return ResolverResult::fail("There is nothing here to forage.");
    };

    // Gate is >= current day, not >, matching long-standing behavior: a
    // forage whose time advance rolls the day still blocks until Sleep.
    let today = game.instance.clock.day;
    if instance.last_foraged.map_or(false, |day| day >= today) {
        return ResolverResult::fail(format!(
            "The {} has already been foraged today.",
            target.element
        ));
    }

    if let Some(tool) = &action.required_item {
        if game.item_count(tool) < 1 {
            return ResolverResult::fail(format!("You need a {tool} to forage that."));
        }
    }

    let mut updates = match charge_costs(game, &action.costs, opts) {
        Ok(updates) => updates,
        Err(message) => return ResolverResult::fail(message),
    };
    let (output_patches, gained) = grant_items(game, &action.outputs, rng);
    updates.extend(output_patches);
    updates.push(Patch::set(
        paths::element_instance_field(
            &game.instance.active_location,
            &target.instance_id,
            "lastForaged",
        ),
        today,
    ));
    updates.extend(advance_time(game, action, false));

    ResolverResult::ok(
        format!(
            "You forage the {} and gather {}.",
            target.element,
            describe_gains(&gained)
        ),
        updates,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::CollectionKind;
    use crate::state::apply_patches;
    use crate::testutil::{meadow_game, rng};

    fn bush_target() -> ActionTarget {
        ActionTarget {
            element: "Berry Bush".into(),
            instance_id: "berry-bush-1".into(),
            collection: CollectionKind::Plants,
        }
    }

    fn oak_target() -> ActionTarget {
        ActionTarget {
            element: "Oak Tree".into(),
            instance_id: "oak-tree-1".into(),
            collection: CollectionKind::Plants,
        }
    }

    #[test]
    fn harvest_removes_the_instance() {
        let game = meadow_game();
        let result = harvest(&game, &oak_target(), &ResolveOptions::default(), &mut rng());
        assert!(result.success, "{:?}", result.message);
        let next = apply_patches(&game.instance, &result.updates).unwrap();
        assert!(next.active_instance("oak-tree-1").is_none());
        assert!(next.inventory.get("Wood").copied().unwrap_or(0) > 0);
    }

    #[test]
    fn harvest_requires_the_tool() {
        let mut game = meadow_game();
        game.instance.inventory.remove("Axe");
        let result = harvest(&game, &oak_target(), &ResolveOptions::default(), &mut rng());
        assert!(!result.success);
        assert!(result.updates.is_empty());
        assert!(result.message.unwrap().contains("Axe"));
    }

    #[test]
    fn forage_keeps_the_instance_and_stamps_the_day() {
        let game = meadow_game();
        let result = forage(&game, &bush_target(), &ResolveOptions::default(), &mut rng());
        assert!(result.success, "{:?}", result.message);
        let next = apply_patches(&game.instance, &result.updates).unwrap();
        let instance = next.active_instance("berry-bush-1").expect("bush remains");
        assert_eq!(instance.last_foraged, Some(game.instance.clock.day));
    }

    #[test]
    fn forage_twice_same_day_fails_until_slept() {
        let mut game = meadow_game();
        let first = forage(&game, &bush_target(), &ResolveOptions::default(), &mut rng());
        assert!(first.success);
        game.instance = apply_patches(&game.instance, &first.updates).unwrap();

        let second = forage(&game, &bush_target(), &ResolveOptions::default(), &mut rng());
        assert!(!second.success);
        assert!(second.updates.is_empty());
        assert!(second.message.unwrap().contains("already been foraged"));
    }
}
