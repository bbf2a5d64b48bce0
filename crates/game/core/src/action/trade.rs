//! Buy and Sell against the money balance.
//!
//! Buying never checks the balance first: games may start the player in debt
//! on purpose, and a vendor extending credit is a story beat, not an error.
//! Selling does check what leaves the inventory.

use rand::Rng;

use crate::def::{ActionKind, CollectionKind, Costs};
use crate::game::Game;
use crate::state::{paths, Patch};

use super::common::{advance_time, charge_costs, describe_gains, grant_items};
use super::{ResolveOptions, ResolverResult};

pub(super) fn buy<R: Rng + ?Sized>(
    game: &Game,
    element: &str,
    opts: &ResolveOptions,
    rng: &mut R,
) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(CollectionKind::Items, element, ActionKind::Buy)
    else {
        return ResolverResult::fail(format!("{element} is not for sale."));
    };
    let price = action.price.unwrap_or(0);

    let mut updates = Vec::new();
    if price != 0 && !opts.disable_costs {
        updates.push(Patch::set(paths::money(), game.instance.money - price));
    }

    let gained = if action.outputs.is_empty() {
        updates.push(Patch::set(
            game.item_path(element),
            game.item_count(element) + 1,
        ));
        vec![(element.to_string(), 1)]
    } else {
        let (output_patches, gained) = grant_items(game, &action.outputs, rng);
        updates.extend(output_patches);
        gained
    };
    updates.extend(advance_time(game, action, false));

    ResolverResult::ok(
        format!("You buy {} for ${price}.", describe_gains(&gained)),
        updates,
    )
}

pub(super) fn sell<R: Rng + ?Sized>(
    game: &Game,
    element: &str,
    opts: &ResolveOptions,
    _rng: &mut R,
) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(CollectionKind::Items, element, ActionKind::Sell)
    else {
        return ResolverResult::fail(format!("Nobody here wants to buy {element}."));
    };
    let price = action.price.unwrap_or(0);

    // Selling hands over the item itself unless the definition says otherwise.
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
    if price != 0 {
        updates.push(Patch::set(paths::money(), game.instance.money + price));
    }
    updates.extend(advance_time(game, action, false));

    ResolverResult::ok(format!("You sell the {element} for ${price}."), updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::apply_patches;
    use crate::testutil::{lemonade_game, rng};

    #[test]
    fn buying_while_in_debt_still_works() {
        let game = lemonade_game();
        assert!(game.instance.money < 0);
        let result = buy(&game, "Sugar", &ResolveOptions::default(), &mut rng());
        assert!(result.success, "{:?}", result.message);
        let next = apply_patches(&game.instance, &result.updates).unwrap();
        // One $4 unit delivers 10 Sugar.
        assert_eq!(next.money, game.instance.money - 4);
        assert_eq!(next.inventory["Sugar"], 10);
    }

    #[test]
    fn selling_requires_the_item() {
        let game = lemonade_game();
        let result = sell(&game, "Lemonade", &ResolveOptions::default(), &mut rng());
        assert!(!result.success);
        assert!(result.updates.is_empty());
    }

    #[test]
    fn selling_credits_the_price() {
        let mut game = lemonade_game();
        game.instance.inventory.insert("Lemonade".into(), 1);
        let result = sell(&game, "Lemonade", &ResolveOptions::default(), &mut rng());
        assert!(result.success, "{:?}", result.message);
        let next = apply_patches(&game.instance, &result.updates).unwrap();
        assert_eq!(next.money, game.instance.money + 2);
        assert_eq!(next.inventory["Lemonade"], 0);
    }
}
