//! Declarative quest tracking.
//!
//! Conditions are checked against live state, never an event log: "Craft 1
//! Lemonade" means "a Lemonade is in the inventory right now". Free-text
//! quests belong to the AI narrator and always read incomplete here.

use crate::def::{ActionKind, QuestDef};
use crate::game::Game;
use crate::state::{paths, CompletedQuest, Patch};

/// Result of one quest scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestScan {
    pub updates: Vec<Patch>,
    pub newly_completed: Vec<String>,
}

/// Whether every condition of a quest currently holds.
pub fn is_quest_complete(quest: &QuestDef, game: &Game) -> bool {
    match quest {
        QuestDef::AiTracked(_) => false,
        QuestDef::Tracked(tracked) => tracked
            .conditions
            .iter()
            .all(|condition| condition_count(game, condition.action, &condition.target)
                >= condition.quantity),
    }
}

fn condition_count(game: &Game, action: ActionKind, target: &str) -> i64 {
    match action {
        // Acquisition conditions count what the player holds now.
        ActionKind::Harvest | ActionKind::Forage | ActionKind::Craft | ActionKind::Buy => {
            game.item_count(target)
        }
        ActionKind::Build => count_instances(game, target, |_| true),
        ActionKind::Plant => count_instances(game, target, |i| i.was_planted),
        ActionKind::Attack => count_instances(game, target, |i| i.was_attacked),
        // No state trace exists for these; the narrator must judge them.
        _ => 0,
    }
}

fn count_instances(
    game: &Game,
    element: &str,
    predicate: impl Fn(&crate::state::ElementInstance) -> bool,
) -> i64 {
    let Some(location) = game.active_location() else {
        return 0;
    };
    location
        .element_instances
        .values()
        .filter(|instance| instance.element == element && predicate(instance))
        .count() as i64
}

/// Scans every quest once and stamps the newly-completed ones.
///
/// Already-completed quests are skipped, so repeated scans are idempotent.
pub fn update_completed_quests(game: &Game) -> QuestScan {
    let mut scan = QuestScan::default();
    for (id, quest) in &game.definition.quests {
        if game.instance.completed_quests.contains_key(id) {
            continue;
        }
        if is_quest_complete(quest, game) {
            scan.updates.push(Patch::set(
                paths::completed_quest(id),
                CompletedQuest {
                    day: game.instance.clock.day,
                    time: game.instance.clock.time,
                },
            ));
            scan.newly_completed.push(id.clone());
        }
    }
    scan
}
