//! Static game content: the author-provided [`GameDefinition`].
//!
//! A definition is data-driven in the same spirit as the runtime's element
//! instances: the engine never hardcodes a specific game's element names.
//! Definitions are immutable at runtime; everything mutable lives in
//! [`crate::state::GameState`].

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::state::ElementInstance;

/// Every action kind the deterministic engine can resolve.
///
/// Anything outside this closed set is deferred to the AI narrator.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum ActionKind {
    Harvest,
    Forage,
    Attack,
    Eat,
    Sleep,
    Craft,
    Upgrade,
    Build,
    Plant,
    Buy,
    Sell,
    Deconstruct,
}

/// The element collections a definition may declare.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum CollectionKind {
    Items,
    Plants,
    Buildings,
    Animals,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Items,
        CollectionKind::Plants,
        CollectionKind::Buildings,
        CollectionKind::Animals,
    ];
}

/// A quantity that is either fixed or rolled from an inclusive range.
///
/// Authored as `3` or `[1, 3]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Fixed(i64),
    Range(i64, i64),
}

impl Amount {
    /// Resolves the amount, rolling uniformly over `[min, max]` inclusive.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        match *self {
            Amount::Fixed(n) => n,
            Amount::Range(min, max) => {
                if min >= max {
                    min
                } else {
                    rng.gen_range(min..=max)
                }
            }
        }
    }
}

/// Item, stat, and money costs of one action.
///
/// Money is a signed balance on the instance; deducting it may drive the
/// player into debt, so only items and stats are pre-validated here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costs {
    #[serde(default, rename = "Items")]
    pub items: BTreeMap<String, i64>,
    #[serde(default, rename = "Stats")]
    pub stats: BTreeMap<String, i64>,
    #[serde(default, rename = "Money")]
    pub money: i64,
}

impl Costs {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.stats.is_empty() && self.money == 0
    }
}

/// How one action kind behaves for one element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDef {
    #[serde(default)]
    pub costs: Costs,
    /// Items produced, e.g. what a harvest yields or what a Buy delivers.
    #[serde(default)]
    pub outputs: BTreeMap<String, Amount>,
    /// Stat changes granted when eating, capped at each stat's `maxAmount`.
    #[serde(default)]
    pub stat_gains: BTreeMap<String, i64>,
    /// Tool that must be present in inventory before the action runs.
    #[serde(default)]
    pub required_item: Option<String>,
    /// Damage dealt when this element (weapon or animal) attacks.
    #[serde(default)]
    pub damage: Option<Amount>,
    /// Reach of an animal's autonomous attack, in world units.
    #[serde(default)]
    pub attack_range: Option<f64>,
    /// Unit price: money paid per Buy, or received per Sell.
    #[serde(default)]
    pub price: Option<i64>,
    /// In-game time the action consumes.
    #[serde(default)]
    pub time_in_hours: Option<f64>,
    #[serde(default)]
    pub time_in_minutes: Option<f64>,
}

impl ActionDef {
    /// Total in-game hours this action advances the clock by.
    pub fn duration_hours(&self) -> f64 {
        self.time_in_hours.unwrap_or(0.0) + self.time_in_minutes.unwrap_or(0.0) / 60.0
    }
}

/// One authored element (item, plant, building, or animal).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDef {
    #[serde(default)]
    pub actions: BTreeMap<ActionKind, ActionDef>,
    /// Starting health for animals and attackable plants.
    #[serde(default)]
    pub health: Option<i64>,
    /// Highest level a building can be upgraded to.
    #[serde(default)]
    pub max_level: Option<i64>,
    /// Items a crafting station exposes instead of its own Craft action.
    #[serde(default)]
    pub compatible_items: Vec<String>,
    /// Footprint in cells. Defaults to a single cell.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// Stat declaration, e.g. Energy or Health.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDef {
    #[serde(default)]
    pub max_amount: Option<i64>,
}

/// The element collections of a definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Elements {
    #[serde(default, rename = "Items")]
    pub items: BTreeMap<String, ElementDef>,
    #[serde(default, rename = "Plants")]
    pub plants: BTreeMap<String, ElementDef>,
    #[serde(default, rename = "Buildings")]
    pub buildings: BTreeMap<String, ElementDef>,
    #[serde(default, rename = "Animals")]
    pub animals: BTreeMap<String, ElementDef>,
    #[serde(default, rename = "Stats")]
    pub stats: BTreeMap<String, StatDef>,
}

impl Elements {
    /// Elements of one collection.
    pub fn collection(&self, kind: CollectionKind) -> &BTreeMap<String, ElementDef> {
        match kind {
            CollectionKind::Items => &self.items,
            CollectionKind::Plants => &self.plants,
            CollectionKind::Buildings => &self.buildings,
            CollectionKind::Animals => &self.animals,
        }
    }
}

/// One declarative quest condition: "did the player X at least N of Y".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCondition {
    pub action: ActionKind,
    /// Item or element name the condition counts.
    pub target: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// A quest is either narrator-tracked prose or a conjunction of conditions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestDef {
    /// Free-text quests are judged by the AI narrator, never client-side.
    AiTracked(String),
    Tracked(TrackedQuest),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedQuest {
    #[serde(default)]
    pub title: Option<String>,
    pub conditions: Vec<QuestCondition>,
}

/// Seed data used to build the initial [`crate::state::GameState`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartBlock {
    pub active_character: String,
    pub active_location: String,
    #[serde(default)]
    pub money: i64,
    #[serde(default)]
    pub inventory: BTreeMap<String, i64>,
    #[serde(default)]
    pub characters: BTreeMap<String, StartCharacter>,
    #[serde(default)]
    pub locations: BTreeMap<String, StartLocation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCharacter {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub location: String,
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLocation {
    #[serde(default)]
    pub inventory: BTreeMap<String, i64>,
    #[serde(default)]
    pub element_instances: BTreeMap<String, ElementInstance>,
}

/// A complete authored game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDefinition {
    #[serde(default)]
    pub name: String,
    /// When true, inventories are scoped per location instead of global.
    #[serde(default)]
    pub use_location_based_inventory: bool,
    /// Action kinds this game exposes. Empty means all kinds are enabled.
    #[serde(default)]
    pub enabled_actions: Vec<ActionKind>,
    #[serde(default)]
    pub elements: Elements,
    #[serde(default)]
    pub quests: BTreeMap<String, QuestDef>,
    #[serde(default)]
    pub start: Option<StartBlock>,
}

impl GameDefinition {
    /// Looks up an element definition within one collection.
    pub fn element(&self, collection: CollectionKind, name: &str) -> Option<&ElementDef> {
        self.elements.collection(collection).get(name)
    }

    /// Searches all collections for an element by name.
    pub fn find_element(&self, name: &str) -> Option<(CollectionKind, &ElementDef)> {
        CollectionKind::ALL
            .iter()
            .find_map(|&kind| self.element(kind, name).map(|def| (kind, def)))
    }

    /// The action definition of `kind` on the named element, if any.
    pub fn action(
        &self,
        collection: CollectionKind,
        element: &str,
        kind: ActionKind,
    ) -> Option<&ActionDef> {
        self.element(collection, element)?.actions.get(&kind)
    }

    pub fn stat(&self, name: &str) -> Option<&StatDef> {
        self.elements.stats.get(name)
    }

    /// Whether the game exposes an action kind at all.
    pub fn action_enabled(&self, kind: ActionKind) -> bool {
        self.enabled_actions.is_empty() || self.enabled_actions.contains(&kind)
    }
}
