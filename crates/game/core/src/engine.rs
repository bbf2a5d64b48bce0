//! The engine facade: resolve, apply, and tick in one place.
//!
//! Resolvers are pure and return patch batches; the engine is the single
//! owner of mutation. Every batch is applied atomically through the patch
//! interpreter, so a failed application leaves the previous state intact.
//! World simulation and quest tracking run inside one tick in a fixed order,
//! which removes any possibility of the two racing each other over state.

use rand::Rng;

use crate::action::{
    self, check_game_over, Action, ActionPayload, PendingAction, ResolveOptions, ResolverResult,
};
use crate::game::Game;
use crate::quest::update_completed_quests;
use crate::sim::{update_animal_positions, ViewportBounds};
use crate::state::{apply_patches, Patch, PatchError};

/// What one simulation tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Narrative lines from the animal simulation (attacks, mostly).
    pub messages: Vec<String>,
    /// Quests that completed during this tick.
    pub newly_completed: Vec<String>,
    /// A game-over message when a vital stat bottomed out.
    pub game_over: Option<String>,
}

/// Exclusive driver over one [`Game`].
pub struct GameEngine<'a> {
    game: &'a mut Game,
}

impl<'a> GameEngine<'a> {
    pub fn new(game: &'a mut Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    /// Applies a patch batch atomically; on error nothing changes.
    pub fn apply(&mut self, patches: &[Patch]) -> Result<(), PatchError> {
        if patches.is_empty() {
            return Ok(());
        }
        self.game.instance = apply_patches(&self.game.instance, patches)?;
        Ok(())
    }

    /// Resolves an action and, when it succeeds, applies its updates.
    pub fn perform<R: Rng + ?Sized>(
        &mut self,
        action: &Action,
        opts: &ResolveOptions,
        rng: &mut R,
    ) -> Result<ResolverResult, PatchError> {
        let result = action::resolve(self.game, action, opts, rng);
        if result.success {
            self.apply(&result.updates)?;
        }
        Ok(result)
    }

    /// The string-typed invocation surface; `Ok(None)` defers to the narrator.
    pub fn handle_client_action<R: Rng + ?Sized>(
        &mut self,
        action_type: &str,
        payload: &ActionPayload,
        opts: &ResolveOptions,
        rng: &mut R,
    ) -> Result<Option<ResolverResult>, PatchError> {
        let Some(result) = action::handle_client_action(self.game, action_type, payload, opts, rng)
        else {
            return Ok(None);
        };
        if result.success {
            self.apply(&result.updates)?;
        }
        Ok(Some(result))
    }

    /// Grants the deferred reward of a two-phase action.
    pub fn complete_pending(
        &mut self,
        pending: &PendingAction,
    ) -> Result<ResolverResult, PatchError> {
        let result = action::complete_action(self.game, pending);
        if result.success {
            self.apply(&result.updates)?;
        }
        Ok(result)
    }

    /// One scheduler tick: animal simulation, then quest tracking, then the
    /// game-over check, always in that order.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        viewport: Option<&ViewportBounds>,
        rng: &mut R,
    ) -> Result<TickOutcome, PatchError> {
        let sim = update_animal_positions(self.game, viewport, rng);
        self.apply(&sim.updates)?;

        let scan = update_completed_quests(self.game);
        self.apply(&scan.updates)?;

        Ok(TickOutcome {
            messages: sim.messages,
            newly_completed: scan.newly_completed,
            game_over: check_game_over(self.game),
        })
    }
}
