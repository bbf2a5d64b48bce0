//! Deterministic sandbox-RPG rules engine, shared by the runtime and tools.
//!
//! `fable-core` holds everything that must behave identically no matter who
//! drives it: the patch protocol, the clock, the action resolvers, action
//! discovery, the animal simulation, and quest tracking. All state mutation
//! flows through [`engine::GameEngine`] as atomic patch batches, whether the
//! patches come from a resolver here or from the AI narrator upstream.

pub mod action;
pub mod config;
pub mod def;
pub mod engine;
pub mod game;
pub mod quest;
pub mod sim;
pub mod state;

pub use action::{
    calculate_available_actions, can_handle_client_side, check_game_over, complete_action,
    handle_client_action, validate_costs, Action, ActionOption, ActionPayload, ActionTarget,
    AvailableAction, PendingAction, ResolveOptions, ResolverResult,
};
pub use config::GameConfig;
pub use def::{
    ActionDef, ActionKind, Amount, CollectionKind, Costs, ElementDef, Elements, GameDefinition,
    QuestCondition, QuestDef, StatDef, TrackedQuest,
};
pub use engine::{GameEngine, TickOutcome};
pub use game::Game;
pub use quest::{is_quest_complete, update_completed_quests, QuestScan};
pub use sim::{
    calculate_viewport_bounds, update_animal_positions, SimulationUpdate, StageSize,
    ViewportBounds,
};
pub use state::{
    apply_patches, CharacterState, Clock, ClockTime, CompletedQuest, ElementInstance, GameState,
    LocationState, Meridiem, Patch, PatchError, Patrol,
};

#[cfg(test)]
pub(crate) mod testutil;
