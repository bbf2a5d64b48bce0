//! 12-hour clock arithmetic and time-driven energy depletion.

use serde::Serialize;

use crate::config::GameConfig;
use crate::game::Game;
use crate::state::patch::Patch;
use crate::state::paths;
use crate::state::types::{Clock, ClockTime};

/// Outcome of advancing the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeUpdate {
    pub clock: Clock,
    /// Whole hours that passed, for energy depletion.
    pub hours_elapsed: i64,
}

/// Wire value of the clock patch. Carries `hoursElapsed` alongside the new
/// clock so a patch consumer can apply depletion without recomputing it; the
/// extra key is ignored when the patch is applied to the typed tree.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClockPatchValue {
    day: u32,
    time: ClockTime,
    hours_elapsed: i64,
}

/// Advances the clock by fractional hours, rolling the day over at midnight.
///
/// Returns `None` when there is nothing to add, in which case no patch should
/// be emitted at all.
pub fn calculate_time_update(clock: &Clock, hours_to_add: f64) -> Option<TimeUpdate> {
    if hours_to_add <= 0.0 {
        return None;
    }

    let added_minutes = (hours_to_add * 60.0) as i64;
    let total = clock.total_minutes() + added_minutes;
    let day = (total / GameConfig::MINUTES_PER_DAY) as u32;
    let time = ClockTime::from_minutes(total % GameConfig::MINUTES_PER_DAY);

    Some(TimeUpdate {
        clock: Clock::new(day, time),
        hours_elapsed: hours_to_add.floor() as i64,
    })
}

impl TimeUpdate {
    /// The single `set instance.clock` patch for this update.
    pub fn patch(&self) -> Patch {
        Patch::set(
            paths::clock(),
            ClockPatchValue {
                day: self.clock.day,
                time: self.clock.time,
                hours_elapsed: self.hours_elapsed,
            },
        )
    }
}

/// Energy lost to the passage of time.
///
/// No-op while sleeping, when the game does not declare an Energy stat, or
/// when no whole hour passed. Energy floors at zero.
pub fn apply_energy_depletion(
    game: &Game,
    hours_elapsed: i64,
    character: &str,
    is_sleeping: bool,
) -> Vec<Patch> {
    if is_sleeping || hours_elapsed <= 0 {
        return Vec::new();
    }
    if game.definition.stat(GameConfig::ENERGY_STAT).is_none() {
        return Vec::new();
    }
    let Some(state) = game.instance.characters.get(character) else {
        return Vec::new();
    };

    let current = state.stat(GameConfig::ENERGY_STAT);
    let next = (current - hours_elapsed).max(0);
    vec![Patch::set(
        paths::character_stat(character, GameConfig::ENERGY_STAT),
        next,
    )]
}
