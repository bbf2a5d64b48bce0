//! Attack: weapon-vs-animal combat initiated by the player.
//!
//! Animal-initiated combat (including animal-vs-animal) lives in
//! [`crate::sim::animals`]; this resolver only covers the player swinging.

use rand::Rng;

use crate::config::GameConfig;
use crate::def::{ActionKind, Amount, CollectionKind};
use crate::game::Game;
use crate::state::{paths, Patch};

use super::common::advance_time;
use super::{ActionTarget, ResolveOptions, ResolverResult};

pub(super) fn attack<R: Rng + ?Sized>(
    game: &Game,
    target: &ActionTarget,
    weapon: Option<&str>,
    _opts: &ResolveOptions,
    rng: &mut R,
) -> ResolverResult {
    let Some(target_def) = game.definition.element(target.collection, &target.element) else {
        return ResolverResult::fail(format!("You cannot attack the {}.", target.element));
    };
    let Some(instance) = game.instance.active_instance(&target.instance_id) else {
        return ResolverResult::fail("There is nothing here to attack.");
    };
    if instance.is_dead {
        return ResolverResult::fail(format!("The {} is already dead.", target.element));
    }

    // Weapon damage comes from the weapon item's own Attack definition;
    // bare fists otherwise.
    let (damage, weapon_action) = match weapon {
        Some(weapon_name) => {
            if game.item_count(weapon_name) < 1 {
                return ResolverResult::fail(format!("You don't have a {weapon_name}."));
            }
            let Some(action) =
                game.definition
                    .action(CollectionKind::Items, weapon_name, ActionKind::Attack)
            else {
                return ResolverResult::fail(format!(
                    "The {weapon_name} is not a weapon."
                ));
            };
            (
                action
                    .damage
                    .unwrap_or(Amount::Range(GameConfig::FIST_DAMAGE.0, GameConfig::FIST_DAMAGE.1)),
                Some(action),
            )
        }
        None => (
            Amount::Range(GameConfig::FIST_DAMAGE.0, GameConfig::FIST_DAMAGE.1),
            None,
        ),
    };

    let damage = damage.roll(rng).max(0);
    let current = instance.health.or(target_def.health).unwrap_or(0);
    let remaining = (current - damage).max(0);

    let location = &game.instance.active_location;
    let mut updates = vec![
        Patch::set(
            paths::element_instance_field(location, &target.instance_id, "health"),
            remaining,
        ),
        // Quest tracking counts attempted kills, not just lethal ones.
        Patch::set(
            paths::element_instance_field(location, &target.instance_id, "wasAttacked"),
            true,
        ),
    ];

    let killed = remaining == 0;
    if killed {
        // Dead bodies persist; Harvest is how they leave the world.
        updates.push(Patch::set(
            paths::element_instance_field(location, &target.instance_id, "isDead"),
            true,
        ));
    }
    if let Some(action) = weapon_action {
        updates.extend(advance_time(game, action, false));
    }

    let story = if killed {
        format!(
            "You strike the {} for {damage} damage, killing it.",
            target.element
        )
    } else {
        format!("You strike the {} for {damage} damage.", target.element)
    };
    ResolverResult::ok(story, updates)
}
