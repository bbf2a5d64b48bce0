//! Helpers shared by every resolver: cost charging, output rolls, and the
//! time/energy patch pair.

use std::collections::BTreeMap;

use rand::Rng;

use crate::def::{ActionDef, Amount, Costs};
use crate::game::Game;
use crate::state::{apply_energy_depletion, calculate_time_update, Patch};

use super::ResolveOptions;

/// Validates and deducts an action's costs.
///
/// Items and stats are checked against the ledger before any patch is built;
/// money is deducted without a balance check because debt is a legal state.
/// With `disable_costs` set, the whole step collapses to no patches.
pub(super) fn charge_costs(
    game: &Game,
    costs: &Costs,
    opts: &ResolveOptions,
) -> Result<Vec<Patch>, String> {
    if opts.disable_costs || costs.is_empty() {
        return Ok(Vec::new());
    }

    for (item, needed) in &costs.items {
        let have = game.item_count(item);
        if have < *needed {
            return Err(format!("You need {needed} {item} but only have {have}."));
        }
    }
    for (stat, needed) in &costs.stats {
        let have = game.character_stat(stat);
        if have < *needed {
            return Err(format!("You need {needed} {stat} but only have {have}."));
        }
    }

    let mut updates = Vec::new();
    for (item, needed) in &costs.items {
        updates.push(Patch::set(
            game.item_path(item),
            game.item_count(item) - needed,
        ));
    }
    for (stat, needed) in &costs.stats {
        updates.push(Patch::set(
            game.character_stat_path(stat),
            game.character_stat(stat) - needed,
        ));
    }
    if costs.money != 0 {
        updates.push(Patch::set(
            crate::state::paths::money(),
            game.instance.money - costs.money,
        ));
    }
    Ok(updates)
}

/// Rolls an output table and produces inventory addition patches.
///
/// Returns the patches plus the rolled quantities for narration.
pub(super) fn grant_items<R: Rng + ?Sized>(
    game: &Game,
    outputs: &BTreeMap<String, Amount>,
    rng: &mut R,
) -> (Vec<Patch>, Vec<(String, i64)>) {
    let mut updates = Vec::new();
    let mut gained = Vec::new();
    for (item, amount) in outputs {
        let quantity = amount.roll(rng);
        if quantity == 0 {
            continue;
        }
        updates.push(Patch::set(
            game.item_path(item),
            game.item_count(item) + quantity,
        ));
        gained.push((item.clone(), quantity));
    }
    (updates, gained)
}

/// Clock advance plus energy depletion for one action definition.
pub(super) fn advance_time(game: &Game, action: &ActionDef, is_sleeping: bool) -> Vec<Patch> {
    advance_time_hours(game, action.duration_hours(), is_sleeping)
}

pub(super) fn advance_time_hours(game: &Game, hours: f64, is_sleeping: bool) -> Vec<Patch> {
    let Some(update) = calculate_time_update(&game.instance.clock, hours) else {
        return Vec::new();
    };
    let mut updates = vec![update.patch()];
    updates.extend(apply_energy_depletion(
        game,
        update.hours_elapsed,
        &game.instance.active_character,
        is_sleeping,
    ));
    updates
}

/// "3 Wood and 1 Sap"
pub(super) fn describe_gains(gained: &[(String, i64)]) -> String {
    let parts: Vec<String> = gained
        .iter()
        .map(|(item, quantity)| format!("{quantity} {item}"))
        .collect();
    match parts.len() {
        0 => String::from("nothing"),
        1 => parts.into_iter().next().unwrap_or_default(),
        _ => {
            let last = parts.last().cloned().unwrap_or_default();
            format!("{} and {last}", parts[..parts.len() - 1].join(", "))
        }
    }
}

/// Allocates an instance id unique within the location.
pub(super) fn next_instance_id(game: &Game, element: &str) -> String {
    let slug = element.to_lowercase().replace(' ', "-");
    let taken = game
        .active_location()
        .map(|location| &location.element_instances);
    let mut n = 1;
    loop {
        let id = format!("{slug}-{n}");
        let free = taken.map_or(true, |instances| !instances.contains_key(&id));
        if free {
            return id;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{lemonade_game, rng};

    #[test]
    fn insufficient_items_yield_a_message_and_no_patches() {
        let game = lemonade_game();
        let costs = Costs {
            items: [("Lemon".to_string(), 500)].into(),
            ..Default::default()
        };
        let err = charge_costs(&game, &costs, &ResolveOptions::default()).unwrap_err();
        assert!(err.contains("Lemon"), "message names the item: {err}");
    }

    #[test]
    fn disable_costs_skips_checks_and_deductions() {
        let game = lemonade_game();
        let costs = Costs {
            items: [("Lemon".to_string(), 500)].into(),
            ..Default::default()
        };
        let updates = charge_costs(
            &game,
            &costs,
            &ResolveOptions {
                disable_costs: true,
            },
        )
        .unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn gains_read_naturally() {
        assert_eq!(describe_gains(&[]), "nothing");
        assert_eq!(describe_gains(&[("Wood".into(), 3)]), "3 Wood");
        assert_eq!(
            describe_gains(&[("Wood".into(), 3), ("Sap".into(), 1)]),
            "3 Wood and 1 Sap"
        );
    }

    #[test]
    fn instance_ids_never_collide() {
        let game = lemonade_game();
        let id = next_instance_id(&game, "Lemonade Stand");
        assert_eq!(id, "lemonade-stand-1");
    }

    #[test]
    fn outputs_roll_and_accumulate() {
        let game = lemonade_game();
        let outputs: BTreeMap<String, Amount> =
            [("Lemon".to_string(), Amount::Fixed(2))].into();
        let (updates, gained) = grant_items(&game, &outputs, &mut rng());
        assert_eq!(gained, vec![("Lemon".to_string(), 2)]);
        let Patch::Set { path, value } = &updates[0] else {
            panic!("expected set");
        };
        assert_eq!(path, "instance.inventory.Lemon");
        assert_eq!(value.as_i64(), Some(102));
    }
}
