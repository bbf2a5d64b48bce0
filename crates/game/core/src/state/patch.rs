//! The patch protocol: the sole mutation channel for game state.
//!
//! Both deterministic resolvers and the AI narrator produce the same wire
//! unit, `{type: set|unset, path, value}`. On the wire the path is an untyped
//! dot-string; applying a patch parses it into the closed [`PatchTarget`]
//! enum and mutates the typed tree through known accessors, so a malformed
//! path is rejected instead of silently growing the tree.
//!
//! Batches are atomic: any bad patch rejects the whole batch before a single
//! field changes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::types::{
    CharacterState, CompletedQuest, ElementInstance, GameState, LocationState, Patrol,
};

/// A single state mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Patch {
    /// Create or overwrite the value at `path`.
    Set { path: String, value: Value },
    /// Remove the value at `path`. No-op when already absent.
    Unset { path: String },
}

impl Patch {
    /// Builds a `set` patch from any serializable value.
    ///
    /// # Panics
    ///
    /// Panics if `value` fails to serialize, which cannot happen for the
    /// engine's own state types (string-keyed maps throughout).
    pub fn set<T: Serialize>(path: impl Into<String>, value: T) -> Self {
        Self::Set {
            path: path.into(),
            value: serde_json::to_value(value).expect("patch value serializes"),
        }
    }

    pub fn unset(path: impl Into<String>) -> Self {
        Self::Unset { path: path.into() }
    }

    pub fn path(&self) -> &str {
        match self {
            Patch::Set { path, .. } | Patch::Unset { path } => path,
        }
    }
}

/// Errors raised while parsing or applying a patch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("patch path must start with 'instance.': {0}")]
    BadRoot(String),

    #[error("patch path does not name a known state field: {0}")]
    UnknownPath(String),

    #[error("value at {path} must be {expected}")]
    ValueType { path: String, expected: &'static str },

    #[error("cannot set field on missing element instance {location}/{id}")]
    MissingInstance { location: String, id: String },

    #[error("cannot set field on missing character {0}")]
    MissingCharacter(String),

    #[error("cannot unset required field at {0}")]
    CannotUnset(String),
}

/// Scalar fields of a character addressable by path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharacterField {
    X,
    Y,
    Location,
    EnergyFromEating,
    Stat(String),
}

/// Every state location a patch path may address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchTarget {
    Clock,
    Money,
    ActiveCharacter,
    ActiveLocation,
    GlobalInventoryItem(String),
    Character(String),
    CharacterField {
        character: String,
        field: CharacterField,
    },
    Location(String),
    LocationInventoryItem {
        location: String,
        item: String,
    },
    ElementInstance {
        location: String,
        id: String,
    },
    ElementInstanceField {
        location: String,
        id: String,
        field: String,
    },
    CompletedQuest(String),
}

impl PatchTarget {
    /// Parses a wire dot-path into a typed target.
    pub fn parse(path: &str) -> Result<Self, PatchError> {
        let rest = path
            .strip_prefix("instance.")
            .ok_or_else(|| PatchError::BadRoot(path.to_string()))?;
        let segments: Vec<&str> = rest.split('.').collect();

        let target = match segments.as_slice() {
            ["clock"] => PatchTarget::Clock,
            ["money"] => PatchTarget::Money,
            ["activeCharacter"] => PatchTarget::ActiveCharacter,
            ["activeLocation"] => PatchTarget::ActiveLocation,
            ["inventory", item] => PatchTarget::GlobalInventoryItem(item.to_string()),
            ["completedQuests", id] => PatchTarget::CompletedQuest(id.to_string()),
            ["characters", name] => PatchTarget::Character(name.to_string()),
            ["characters", name, "x"] => PatchTarget::CharacterField {
                character: name.to_string(),
                field: CharacterField::X,
            },
            ["characters", name, "y"] => PatchTarget::CharacterField {
                character: name.to_string(),
                field: CharacterField::Y,
            },
            ["characters", name, "location"] => PatchTarget::CharacterField {
                character: name.to_string(),
                field: CharacterField::Location,
            },
            ["characters", name, "energyFromEatingSinceLastSlept"] => {
                PatchTarget::CharacterField {
                    character: name.to_string(),
                    field: CharacterField::EnergyFromEating,
                }
            }
            ["characters", name, "stats", stat] => PatchTarget::CharacterField {
                character: name.to_string(),
                field: CharacterField::Stat(stat.to_string()),
            },
            ["locations", location] => PatchTarget::Location(location.to_string()),
            ["locations", location, "inventory", item] => PatchTarget::LocationInventoryItem {
                location: location.to_string(),
                item: item.to_string(),
            },
            ["locations", location, "elementInstances", id] => PatchTarget::ElementInstance {
                location: location.to_string(),
                id: id.to_string(),
            },
            ["locations", location, "elementInstances", id, field] => {
                PatchTarget::ElementInstanceField {
                    location: location.to_string(),
                    id: id.to_string(),
                    field: field.to_string(),
                }
            }
            _ => return Err(PatchError::UnknownPath(path.to_string())),
        };
        Ok(target)
    }
}

/// Applies a batch in order, returning the next state.
///
/// Later patches may depend on earlier ones. The input state is never touched
/// on failure, so the caller gets all-or-nothing semantics.
pub fn apply_patches(state: &GameState, patches: &[Patch]) -> Result<GameState, PatchError> {
    let mut next = state.clone();
    for patch in patches {
        apply_one(&mut next, patch)?;
    }
    Ok(next)
}

fn apply_one(state: &mut GameState, patch: &Patch) -> Result<(), PatchError> {
    let target = PatchTarget::parse(patch.path())?;
    match patch {
        Patch::Set { path, value } => apply_set(state, &target, path, value),
        Patch::Unset { path } => apply_unset(state, &target, path),
    }
}

fn apply_set(
    state: &mut GameState,
    target: &PatchTarget,
    path: &str,
    value: &Value,
) -> Result<(), PatchError> {
    match target {
        PatchTarget::Clock => {
            state.clock = from_value(path, value, "a clock object")?;
        }
        PatchTarget::Money => {
            state.money = as_i64(path, value)?;
        }
        PatchTarget::ActiveCharacter => {
            state.active_character = as_string(path, value)?;
        }
        PatchTarget::ActiveLocation => {
            state.active_location = as_string(path, value)?;
        }
        PatchTarget::GlobalInventoryItem(item) => {
            state.inventory.insert(item.clone(), as_i64(path, value)?);
        }
        PatchTarget::Character(name) => {
            let character: CharacterState = from_value(path, value, "a character object")?;
            state.characters.insert(name.clone(), character);
        }
        PatchTarget::CharacterField { character, field } => {
            let entry = state
                .characters
                .get_mut(character)
                .ok_or_else(|| PatchError::MissingCharacter(character.clone()))?;
            match field {
                CharacterField::X => entry.x = as_f64(path, value)?,
                CharacterField::Y => entry.y = as_f64(path, value)?,
                CharacterField::Location => entry.location = as_string(path, value)?,
                CharacterField::EnergyFromEating => {
                    entry.energy_from_eating_since_last_slept = as_i64(path, value)?;
                }
                CharacterField::Stat(stat) => {
                    entry.stats.insert(stat.clone(), as_i64(path, value)?);
                }
            }
        }
        PatchTarget::Location(location) => {
            let parsed: LocationState = from_value(path, value, "a location object")?;
            state.locations.insert(location.clone(), parsed);
        }
        PatchTarget::LocationInventoryItem { location, item } => {
            state
                .locations
                .entry(location.clone())
                .or_default()
                .inventory
                .insert(item.clone(), as_i64(path, value)?);
        }
        PatchTarget::ElementInstance { location, id } => {
            let instance: ElementInstance = from_value(path, value, "an element instance")?;
            state
                .locations
                .entry(location.clone())
                .or_default()
                .element_instances
                .insert(id.clone(), instance);
        }
        PatchTarget::ElementInstanceField {
            location,
            id,
            field,
        } => {
            let instance = state
                .locations
                .get_mut(location)
                .and_then(|l| l.element_instances.get_mut(id))
                .ok_or_else(|| PatchError::MissingInstance {
                    location: location.clone(),
                    id: id.clone(),
                })?;
            set_instance_field(instance, field, path, value)?;
        }
        PatchTarget::CompletedQuest(id) => {
            // The narrator sometimes marks quests with a bare `true`; stamp
            // those with the current clock.
            let stamp = if value.as_bool() == Some(true) {
                CompletedQuest {
                    day: state.clock.day,
                    time: state.clock.time,
                }
            } else {
                from_value(path, value, "a completion stamp")?
            };
            state.completed_quests.insert(id.clone(), stamp);
        }
    }
    Ok(())
}

fn set_instance_field(
    instance: &mut ElementInstance,
    field: &str,
    path: &str,
    value: &Value,
) -> Result<(), PatchError> {
    match field {
        "x" => instance.x = as_f64(path, value)?,
        "y" => instance.y = as_f64(path, value)?,
        "level" => instance.level = Some(as_i64(path, value)?),
        "progress" => instance.progress = Some(as_f64(path, value)?),
        "health" => instance.health = Some(as_i64(path, value)?),
        "isDead" => instance.is_dead = as_bool(path, value)?,
        "lastForaged" => instance.last_foraged = Some(as_i64(path, value)? as u32),
        "lastAttackTime" => instance.last_attack_time = Some(as_i64(path, value)?),
        "plantedAt" => instance.planted_at = Some(as_i64(path, value)?),
        "patrol" => {
            let patrol: Patrol = from_value(path, value, "a patrol rectangle")?;
            instance.patrol = Some(patrol);
        }
        "movementAngle" => instance.movement_angle = Some(as_f64(path, value)?),
        "movementTimer" => instance.movement_timer = Some(as_i64(path, value)? as i32),
        "isPaused" => instance.is_paused = as_bool(path, value)?,
        "facingRight" => instance.facing_right = Some(as_bool(path, value)?),
        "animationFrame" => instance.animation_frame = Some(as_i64(path, value)? as u32),
        "wasAttacked" => instance.was_attacked = as_bool(path, value)?,
        "wasPlanted" => instance.was_planted = as_bool(path, value)?,
        _ => return Err(PatchError::UnknownPath(path.to_string())),
    }
    Ok(())
}

fn apply_unset(state: &mut GameState, target: &PatchTarget, path: &str) -> Result<(), PatchError> {
    match target {
        PatchTarget::GlobalInventoryItem(item) => {
            state.inventory.remove(item);
        }
        PatchTarget::CompletedQuest(id) => {
            state.completed_quests.remove(id);
        }
        PatchTarget::Character(name) => {
            state.characters.remove(name);
        }
        PatchTarget::Location(location) => {
            state.locations.remove(location);
        }
        PatchTarget::LocationInventoryItem { location, item } => {
            if let Some(entry) = state.locations.get_mut(location) {
                entry.inventory.remove(item);
            }
        }
        PatchTarget::ElementInstance { location, id } => {
            if let Some(entry) = state.locations.get_mut(location) {
                entry.element_instances.remove(id);
            }
        }
        PatchTarget::ElementInstanceField {
            location,
            id,
            field,
        } => {
            let Some(instance) = state
                .locations
                .get_mut(location)
                .and_then(|l| l.element_instances.get_mut(id))
            else {
                return Ok(());
            };
            unset_instance_field(instance, field, path)?;
        }
        PatchTarget::CharacterField { character, field } => {
            let Some(entry) = state.characters.get_mut(character) else {
                return Ok(());
            };
            match field {
                CharacterField::Stat(stat) => {
                    entry.stats.remove(stat);
                }
                CharacterField::EnergyFromEating => {
                    entry.energy_from_eating_since_last_slept = 0;
                }
                _ => return Err(PatchError::CannotUnset(path.to_string())),
            }
        }
        PatchTarget::Clock
        | PatchTarget::Money
        | PatchTarget::ActiveCharacter
        | PatchTarget::ActiveLocation => {
            return Err(PatchError::CannotUnset(path.to_string()));
        }
    }
    Ok(())
}

fn unset_instance_field(
    instance: &mut ElementInstance,
    field: &str,
    path: &str,
) -> Result<(), PatchError> {
    match field {
        "level" => instance.level = None,
        "progress" => instance.progress = None,
        "health" => instance.health = None,
        "isDead" => instance.is_dead = false,
        "lastForaged" => instance.last_foraged = None,
        "lastAttackTime" => instance.last_attack_time = None,
        "plantedAt" => instance.planted_at = None,
        "patrol" => instance.patrol = None,
        "movementAngle" => instance.movement_angle = None,
        "movementTimer" => instance.movement_timer = None,
        "isPaused" => instance.is_paused = false,
        "facingRight" => instance.facing_right = None,
        "animationFrame" => instance.animation_frame = None,
        "wasAttacked" => instance.was_attacked = false,
        "wasPlanted" => instance.was_planted = false,
        "x" | "y" => return Err(PatchError::CannotUnset(path.to_string())),
        _ => return Err(PatchError::UnknownPath(path.to_string())),
    }
    Ok(())
}

// ===== value coercions =====

fn as_i64(path: &str, value: &Value) -> Result<i64, PatchError> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .ok_or(PatchError::ValueType {
            path: path.to_string(),
            expected: "a number",
        })
}

fn as_f64(path: &str, value: &Value) -> Result<f64, PatchError> {
    value.as_f64().ok_or(PatchError::ValueType {
        path: path.to_string(),
        expected: "a number",
    })
}

fn as_bool(path: &str, value: &Value) -> Result<bool, PatchError> {
    value.as_bool().ok_or(PatchError::ValueType {
        path: path.to_string(),
        expected: "a boolean",
    })
}

fn as_string(path: &str, value: &Value) -> Result<String, PatchError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(PatchError::ValueType {
            path: path.to_string(),
            expected: "a string",
        })
}

fn from_value<T: serde::de::DeserializeOwned>(
    path: &str,
    value: &Value,
    expected: &'static str,
) -> Result<T, PatchError> {
    serde_json::from_value(value.clone()).map_err(|_| PatchError::ValueType {
        path: path.to_string(),
        expected,
    })
}
