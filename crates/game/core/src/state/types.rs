//! The mutable game-state tree.
//!
//! Every field here is reachable from a patch path, so serde names are kept
//! camelCase to match the wire vocabulary shared with the AI narrator
//! (`activeCharacter`, `elementInstances`, `energyFromEatingSinceLastSlept`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::def::CollectionKind;

/// am/pm half of the 12-hour clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::Am => write!(f, "am"),
            Meridiem::Pm => write!(f, "pm"),
        }
    }
}

/// Time of day, serialized as the wire triple `[hour, minute, "am"]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u8, u8, Meridiem)", into = "(u8, u8, Meridiem)")]
pub struct ClockTime {
    /// 1..=12
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    pub meridiem: Meridiem,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Self {
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    /// Minutes since midnight, treating 12am as hour zero.
    pub fn minutes_since_midnight(&self) -> i64 {
        let mut hour = i64::from(self.hour) % 12;
        if self.meridiem == Meridiem::Pm {
            hour += 12;
        }
        hour * 60 + i64::from(self.minute)
    }

    /// Builds a clock time from minutes since midnight.
    pub fn from_minutes(minutes: i64) -> Self {
        let minutes = minutes.rem_euclid(GameConfig::MINUTES_PER_DAY);
        let hour24 = minutes / 60;
        let minute = (minutes % 60) as u8;
        let meridiem = if hour24 < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        };
        let mut hour = (hour24 % 12) as u8;
        if hour == 0 {
            hour = 12;
        }
        Self::new(hour, minute, meridiem)
    }
}

impl From<(u8, u8, Meridiem)> for ClockTime {
    fn from((hour, minute, meridiem): (u8, u8, Meridiem)) -> Self {
        Self::new(hour, minute, meridiem)
    }
}

impl From<ClockTime> for (u8, u8, Meridiem) {
    fn from(time: ClockTime) -> Self {
        (time.hour, time.minute, time.meridiem)
    }
}

/// The in-game calendar: day number plus 12-hour time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clock {
    /// Monotonically non-decreasing, starting at 1.
    pub day: u32,
    pub time: ClockTime,
}

impl Clock {
    pub fn new(day: u32, time: ClockTime) -> Self {
        Self { day, time }
    }

    /// Absolute in-game minutes, used for timestamps and cooldowns.
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.day) * GameConfig::MINUTES_PER_DAY + self.time.minutes_since_midnight()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1, ClockTime::new(8, 0, Meridiem::Am))
    }
}

/// Axis-aligned bounds confining an animal's autonomous movement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patrol {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// A placed occurrence of an element definition.
///
/// Created by Build/Plant resolvers or world seeding, removed by Harvest or
/// Deconstruct, mutated in place by Attack and the animal simulator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInstance {
    pub x: f64,
    pub y: f64,
    pub collection: CollectionKind,
    pub element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_dead: bool,
    /// Day this instance was last foraged; gates one forage per day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_foraged: Option<u32>,
    /// Absolute minute of this animal's last attack (player or animal target).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attack_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol: Option<Patrol>,
    /// Heading in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_timer: Option<i32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_paused: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_right: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_frame: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub was_attacked: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub was_planted: bool,
}

impl ElementInstance {
    pub fn new(collection: CollectionKind, element: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            collection,
            element: element.into(),
            level: None,
            progress: None,
            health: None,
            is_dead: false,
            last_foraged: None,
            last_attack_time: None,
            planted_at: None,
            patrol: None,
            movement_angle: None,
            movement_timer: None,
            is_paused: false,
            facing_right: None,
            animation_frame: None,
            was_attacked: false,
            was_planted: false,
        }
    }

    /// A living thing: has health left and is not flagged dead.
    pub fn is_alive(&self) -> bool {
        !self.is_dead && self.health.map_or(true, |h| h > 0)
    }
}

/// One playable or narrated character.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterState {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub location: String,
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,
    /// Rolling energy-from-food counter, reset by Sleep.
    #[serde(default)]
    pub energy_from_eating_since_last_slept: i64,
}

impl CharacterState {
    pub fn stat(&self, name: &str) -> i64 {
        self.stats.get(name).copied().unwrap_or(0)
    }
}

/// One location's mutable contents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationState {
    /// Used only when the game runs location-based inventories.
    #[serde(default)]
    pub inventory: BTreeMap<String, i64>,
    #[serde(default)]
    pub element_instances: BTreeMap<String, ElementInstance>,
}

/// Completion stamp recorded when a quest's conditions all hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedQuest {
    pub day: u32,
    pub time: ClockTime,
}

/// The whole mutable play-through state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default)]
    pub clock: Clock,
    pub active_character: String,
    pub active_location: String,
    #[serde(default)]
    pub characters: BTreeMap<String, CharacterState>,
    #[serde(default)]
    pub locations: BTreeMap<String, LocationState>,
    /// Global inventory, used unless the game is location-based.
    #[serde(default)]
    pub inventory: BTreeMap<String, i64>,
    /// Signed balance; debt is a legal state.
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub completed_quests: BTreeMap<String, CompletedQuest>,
}

impl GameState {
    pub fn active_character(&self) -> Option<&CharacterState> {
        self.characters.get(&self.active_character)
    }

    pub fn active_location(&self) -> Option<&LocationState> {
        self.locations.get(&self.active_location)
    }

    pub fn element_instance(&self, location: &str, id: &str) -> Option<&ElementInstance> {
        self.locations.get(location)?.element_instances.get(id)
    }

    /// The instance in the active location, the common resolver lookup.
    pub fn active_instance(&self, id: &str) -> Option<&ElementInstance> {
        self.element_instance(&self.active_location, id)
    }
}
