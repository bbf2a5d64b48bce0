//! Craft and the deferred completion step.
//!
//! Crafting is two-phase: costs are paid the moment work begins, but the
//! crafted item is only granted when the governing minigame reports success
//! and the caller feeds the [`PendingAction`] back into [`complete_action`].

use crate::def::{ActionKind, CollectionKind};
use crate::game::Game;
use crate::state::Patch;

use super::common::{advance_time, charge_costs};
use super::{PendingAction, ResolveOptions, ResolverResult};

pub(super) fn craft(game: &Game, element: &str, opts: &ResolveOptions) -> ResolverResult {
    let Some(action) = game
        .definition
        .action(CollectionKind::Items, element, ActionKind::Craft)
    else {
        return ResolverResult::fail(format!("You don't know how to craft {element}."));
    };

    let mut updates = match charge_costs(game, &action.costs, opts) {
        Ok(updates) => updates,
        Err(message) => return ResolverResult::fail(message),
    };
    updates.extend(advance_time(game, action, false));

    ResolverResult::ok(format!("You set to work crafting {element}."), updates).with_pending(
        PendingAction {
            kind: ActionKind::Craft,
            target_element: element.to_string(),
            instance_id: None,
        },
    )
}

/// Grants the deferred reward of a pending Craft/Build/Upgrade.
///
/// Only Craft adds to inventory; Build and Upgrade completions are purely
/// narrative, their world changes having been made when work began.
pub fn complete_action(game: &Game, pending: &PendingAction) -> ResolverResult {
    match pending.kind {
        ActionKind::Craft => {
            let updates = vec![Patch::set(
                game.item_path(&pending.target_element),
                game.item_count(&pending.target_element) + 1,
            )];
            ResolverResult::ok(
                format!("You finish crafting the {}.", pending.target_element),
                updates,
            )
        }
        ActionKind::Build => ResolverResult::ok(
            format!("The {} is finished.", pending.target_element),
            Vec::new(),
        ),
        ActionKind::Upgrade => ResolverResult::ok(
            format!("The {} has been upgraded.", pending.target_element),
            Vec::new(),
        ),
        _ => ResolverResult::fail("Nothing to complete."),
    }
}
