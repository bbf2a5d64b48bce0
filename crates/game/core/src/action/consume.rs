//! Eat and Sleep: the character upkeep loop.

use crate::config::GameConfig;
use crate::def::{ActionKind, CollectionKind, Costs};
use crate::game::Game;
use crate::state::{paths, Patch};

use super::common::{advance_time, advance_time_hours, charge_costs};
use super::{ResolveOptions, ResolverResult};

/// Eat one item. Enforces the rolling energy-from-food cap, applies stat
/// gains up to each stat's declared maximum, and advances the eaten counter.
pub(super) fn eat(game: &Game, element: &str, opts: &ResolveOptions) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(CollectionKind::Items, element, ActionKind::Eat)
    else {
        return ResolverResult::fail(format!("You cannot eat the {element}."));
    };

    let Some(character) = game.active_character() else {
        return ResolverResult::fail("No active character.");
    };

    let energy_gain = action
        .stat_gains
        .get(GameConfig::ENERGY_STAT)
        .copied()
        .unwrap_or(0);
    let eaten = character.energy_from_eating_since_last_slept;
    if energy_gain > 0 && eaten + energy_gain > GameConfig::EAT_ENERGY_CAP {
        return ResolverResult::fail(format!(
            "You're too full to eat that ({eaten}/{} energy from food since sleeping).",
            GameConfig::EAT_ENERGY_CAP
        ));
    }

    // Eating consumes the item itself unless the definition says otherwise.
    let costs = if action.costs.is_empty() {
        Costs {
            items: [(element.to_string(), 1)].into(),
            ..Default::default()
        }
    } else {
        action.costs.clone()
    };
    let mut updates = match charge_costs(game, &costs, opts) {
        Ok(updates) => updates,
        Err(message) => return ResolverResult::fail(message),
    };

    for (stat, gain) in &action.stat_gains {
        let current = game.character_stat(stat);
        let mut next = current + gain;
        if let Some(max) = game.definition.stat(stat).and_then(|def| def.max_amount) {
            next = next.min(max);
        }
        updates.push(Patch::set(game.character_stat_path(stat), next));
    }
    if energy_gain > 0 {
        updates.push(Patch::set(
            paths::character_field(
                &game.instance.active_character,
                "energyFromEatingSinceLastSlept",
            ),
            eaten + energy_gain,
        ));
    }
    updates.extend(advance_time(game, action, false));

    ResolverResult::ok(format!("You eat the {element}."), updates)
}

/// Sleep through the night.
///
/// Restores Energy to its maximum, resets the eaten counter, and clears the
/// forage day-gate on every plant in the current location that can be
/// foraged.
pub(super) fn sleep(game: &Game, element: Option<&str>, _opts: &ResolveOptions) -> ResolverResult {
    if game.active_character().is_none() {
        return ResolverResult::fail("No active character.");
    }

    let mut updates = Vec::new();

    if let Some(max) = game
        .definition
        .stat(GameConfig::ENERGY_STAT)
        .and_then(|def| def.max_amount)
    {
        updates.push(Patch::set(
            game.character_stat_path(GameConfig::ENERGY_STAT),
            max,
        ));
    }
    updates.push(Patch::set(
        paths::character_field(
            &game.instance.active_character,
            "energyFromEatingSinceLastSlept",
        ),
        0,
    ));

    // A night's rest re-opens every forageable plant here.
    if let Some(location) = game.active_location() {
        for (id, instance) in &location.element_instances {
            if instance.collection != CollectionKind::Plants || instance.last_foraged.is_none() {
                continue;
            }
            let foragable = game
                .definition
                .action(CollectionKind::Plants, &instance.element, ActionKind::Forage)
                .is_some();
            if foragable {
                updates.push(Patch::unset(paths::element_instance_field(
                    &game.instance.active_location,
                    id,
                    "lastForaged",
                )));
            }
        }
    }

    // A bed may define its own Sleep timing; default to a full night.
    let hours = element
        .and_then(|name| {
            game.definition
                .find_element(name)
                .and_then(|(_, def)| def.actions.get(&ActionKind::Sleep))
        })
        .map(|action| action.duration_hours())
        .filter(|hours| *hours > 0.0)
        .unwrap_or(GameConfig::DEFAULT_SLEEP_HOURS);
    updates.extend(advance_time_hours(game, hours, true));

    ResolverResult::ok("You sleep soundly and wake refreshed.", updates)
}
