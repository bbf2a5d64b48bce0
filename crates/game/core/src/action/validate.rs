//! Pre-flight checks shared by the UI layer and the session driver.

use std::str::FromStr;

use crate::config::GameConfig;
use crate::def::{ActionKind, Costs};
use crate::game::Game;

/// Checks an action's costs against the ledger without deducting anything.
///
/// Returns the first failure message, or `None` when everything is covered.
/// Unlike the resolvers, this advisory check does flag a short money balance:
/// the UI uses it to grey out options, and "can't afford it" is better
/// surfaced before the vendor takes the order.
pub fn validate_costs(game: &Game, costs: &Costs) -> Option<String> {
    for (item, needed) in &costs.items {
        let have = game.item_count(item);
        if have < *needed {
            return Some(format!("You need {needed} {item} but only have {have}."));
        }
    }
    for (stat, needed) in &costs.stats {
        let have = game.character_stat(stat);
        if have < *needed {
            return Some(format!("You need {needed} {stat} but only have {have}."));
        }
    }
    if costs.money > 0 && game.instance.money < costs.money {
        return Some(format!(
            "You need ${} but only have ${}.",
            costs.money, game.instance.money
        ));
    }
    None
}

/// Whether an action type string resolves deterministically, without going
/// through the narrator.
pub fn can_handle_client_side(game: &Game, action_type: &str) -> bool {
    ActionKind::from_str(action_type)
        .map(|kind| game.definition.action_enabled(kind))
        .unwrap_or(false)
}

/// Checks the active character's vital stats.
///
/// A stat only ends the game if the definition declares it; a game with no
/// Health stat cannot be lost to damage.
pub fn check_game_over(game: &Game) -> Option<String> {
    let character = game.active_character()?;
    for (stat, message) in [
        (
            GameConfig::HEALTH_STAT,
            "You have succumbed to your wounds.",
        ),
        (GameConfig::ENERGY_STAT, "You collapse from exhaustion."),
    ] {
        if game.definition.stat(stat).is_some() && character.stat(stat) <= 0 {
            return Some(message.to_string());
        }
    }
    None
}
