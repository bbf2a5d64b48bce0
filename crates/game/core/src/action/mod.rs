//! Action domain: one resolver per deterministic action kind.
//!
//! Every resolver follows the same shape: look up the definition, check the
//! domain precondition, compute costs and outputs, and emit a patch list plus
//! narrative text. Validation always happens before any patch is produced, so
//! a failed action provably leaves state untouched.

pub mod available;
mod build;
mod combat;
mod common;
mod consume;
mod craft;
mod harvest;
mod trade;
pub mod validate;

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::def::{ActionKind, CollectionKind};
use crate::game::Game;
use crate::state::Patch;

pub use available::{calculate_available_actions, ActionOption, AvailableAction};
pub use craft::complete_action;
pub use validate::{can_handle_client_side, check_game_over, validate_costs};

/// A fully identified element instance an action works on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTarget {
    pub element: String,
    pub instance_id: String,
    pub collection: CollectionKind,
}

/// The closed set of deterministic actions.
///
/// Anything that cannot be expressed here is the narrator's business.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Harvest { target: ActionTarget },
    Forage { target: ActionTarget },
    Attack { target: ActionTarget, weapon: Option<String> },
    Eat { element: String },
    Sleep { element: Option<String> },
    Craft { element: String },
    Plant { element: String },
    Build { element: String, existing_instance_id: Option<String> },
    Buy { element: String },
    Sell { element: String },
    Deconstruct { target: ActionTarget },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Harvest { .. } => ActionKind::Harvest,
            Action::Forage { .. } => ActionKind::Forage,
            Action::Attack { .. } => ActionKind::Attack,
            Action::Eat { .. } => ActionKind::Eat,
            Action::Sleep { .. } => ActionKind::Sleep,
            Action::Craft { .. } => ActionKind::Craft,
            Action::Plant { .. } => ActionKind::Plant,
            Action::Build {
                existing_instance_id: Some(_),
                ..
            } => ActionKind::Upgrade,
            Action::Build { .. } => ActionKind::Build,
            Action::Buy { .. } => ActionKind::Buy,
            Action::Sell { .. } => ActionKind::Sell,
            Action::Deconstruct { .. } => ActionKind::Deconstruct,
        }
    }
}

/// Wire payload of an action invocation from the UI layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    #[serde(default)]
    pub target_element: Option<String>,
    #[serde(default)]
    pub target_instance_id: Option<String>,
    #[serde(default)]
    pub target_collection: Option<CollectionKind>,
    #[serde(default)]
    pub target_animal: Option<String>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub existing_instance_id: Option<String>,
}

/// A deferred reward: cost was already paid, the grant happens on completion.
///
/// Returned by Craft/Build/Upgrade and threaded back into
/// [`complete_action`] when the governing minigame succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAction {
    pub kind: ActionKind,
    pub target_element: String,
    #[serde(default)]
    pub instance_id: Option<String>,
}

/// Per-call resolver switches sourced from the debug settings store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Skip every resource check and deduction, keeping only effects.
    pub disable_costs: bool,
}

/// What a resolver returns: a verdict, narration, and the patch batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolverResult {
    pub success: bool,
    pub story_text: Option<String>,
    /// Failure reason when `success` is false.
    pub message: Option<String>,
    pub updates: Vec<Patch>,
    pub pending: Option<PendingAction>,
}

impl ResolverResult {
    pub fn ok(story_text: impl Into<String>, updates: Vec<Patch>) -> Self {
        Self {
            success: true,
            story_text: Some(story_text.into()),
            updates,
            ..Default::default()
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    fn with_pending(mut self, pending: PendingAction) -> Self {
        self.pending = Some(pending);
        self
    }
}

/// Resolves one action against the current game, without mutating it.
pub fn resolve<R: Rng + ?Sized>(
    game: &Game,
    action: &Action,
    opts: &ResolveOptions,
    rng: &mut R,
) -> ResolverResult {
    match action {
        Action::Harvest { target } => harvest::harvest(game, target, opts, rng),
        Action::Forage { target } => harvest::forage(game, target, opts, rng),
        Action::Attack { target, weapon } => {
            combat::attack(game, target, weapon.as_deref(), opts, rng)
        }
        Action::Eat { element } => consume::eat(game, element, opts),
        Action::Sleep { element } => consume::sleep(game, element.as_deref(), opts),
        Action::Craft { element } => craft::craft(game, element, opts),
        Action::Plant { element } => build::plant(game, element, opts),
        Action::Build {
            element,
            existing_instance_id,
        } => build::build(game, element, existing_instance_id.as_deref(), opts),
        Action::Buy { element } => trade::buy(game, element, opts, rng),
        Action::Sell { element } => trade::sell(game, element, opts, rng),
        Action::Deconstruct { target } => build::deconstruct(game, target, opts, rng),
    }
}

/// The UI-facing invocation surface.
///
/// Returns `None` when `action_type` is not a deterministic kind (or the game
/// has it disabled), signalling "defer to the AI narrator". A recognized kind
/// with a malformed payload resolves to a failure result instead.
pub fn handle_client_action<R: Rng + ?Sized>(
    game: &Game,
    action_type: &str,
    payload: &ActionPayload,
    opts: &ResolveOptions,
    rng: &mut R,
) -> Option<ResolverResult> {
    let kind = ActionKind::from_str(action_type).ok()?;
    if !game.definition.action_enabled(kind) {
        return None;
    }

    let action = match action_from_payload(kind, payload) {
        Ok(action) => action,
        Err(result) => return Some(result),
    };
    Some(resolve(game, &action, opts, rng))
}

fn action_from_payload(
    kind: ActionKind,
    payload: &ActionPayload,
) -> Result<Action, ResolverResult> {
    let target = || -> Result<ActionTarget, ResolverResult> {
        match (
            &payload.target_element,
            &payload.target_instance_id,
            payload.target_collection,
        ) {
            (Some(element), Some(id), Some(collection)) => Ok(ActionTarget {
                element: element.clone(),
                instance_id: id.clone(),
                collection,
            }),
            _ => Err(ResolverResult::fail("No target selected.")),
        }
    };
    let element = || -> Result<String, ResolverResult> {
        payload
            .target_element
            .clone()
            .ok_or_else(|| ResolverResult::fail("No target selected."))
    };

    let action = match kind {
        ActionKind::Harvest => Action::Harvest { target: target()? },
        ActionKind::Forage => Action::Forage { target: target()? },
        ActionKind::Attack => {
            let mut target = target()?;
            if let Some(animal) = &payload.target_animal {
                target.element = animal.clone();
            }
            Action::Attack {
                target,
                weapon: payload.weapon.clone(),
            }
        }
        ActionKind::Eat => Action::Eat { element: element()? },
        ActionKind::Sleep => Action::Sleep {
            element: payload.target_element.clone(),
        },
        ActionKind::Craft => Action::Craft { element: element()? },
        ActionKind::Plant => Action::Plant { element: element()? },
        ActionKind::Build => Action::Build {
            element: element()?,
            existing_instance_id: payload.existing_instance_id.clone(),
        },
        ActionKind::Upgrade => {
            let id = payload
                .existing_instance_id
                .clone()
                .or_else(|| payload.target_instance_id.clone())
                .ok_or_else(|| ResolverResult::fail("Nothing here to upgrade."))?;
            Action::Build {
                element: element()?,
                existing_instance_id: Some(id),
            }
        }
        ActionKind::Buy => Action::Buy { element: element()? },
        ActionKind::Sell => Action::Sell { element: element()? },
        ActionKind::Deconstruct => Action::Deconstruct { target: target()? },
    };
    Ok(action)
}
