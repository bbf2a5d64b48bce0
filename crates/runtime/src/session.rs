//! A running play-through: deterministic engine first, narrator fallback.
//!
//! Every player action goes through the same funnel. If the action type is
//! one the deterministic engine owns, the resolver runs and its patches are
//! applied atomically. Anything else is sent to the narrator, whose response
//! is validated strictly and applied through the very same patch interpreter.
//! After either path, quests are re-scanned and vital stats checked, so the
//! caller sees one uniform outcome type.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use fable_core::{
    ActionPayload, Game, GameEngine, PendingAction, TickOutcome, ViewportBounds,
};

use crate::error::Result;
use crate::narrator::Narrator;
use crate::settings::DebugSettings;

/// What one player action produced, whichever path resolved it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionOutcome {
    pub success: bool,
    pub story_text: Option<String>,
    /// Failure reason when `success` is false.
    pub message: Option<String>,
    /// Set when the action defers its reward to a completion call.
    pub pending: Option<PendingAction>,
    pub newly_completed: Vec<String>,
    pub game_over: Option<String>,
}

pub struct GameSession<N: Narrator> {
    game: Game,
    narrator: N,
    settings: DebugSettings,
    rng: StdRng,
}

impl<N: Narrator> GameSession<N> {
    pub fn new(game: Game, narrator: N) -> Self {
        Self::with_seed(game, narrator, rand::random())
    }

    /// A session with a fixed RNG seed, for reproducible runs.
    pub fn with_seed(game: Game, narrator: N, seed: u64) -> Self {
        Self {
            game,
            narrator,
            settings: DebugSettings::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn settings_mut(&mut self) -> &mut DebugSettings {
        &mut self.settings
    }

    /// Resolves one player action, deterministically when possible.
    pub async fn act(&mut self, action_type: &str, payload: &ActionPayload) -> Result<SessionOutcome> {
        let opts = self.settings.resolve_options();

        let deterministic = {
            let mut engine = GameEngine::new(&mut self.game);
            engine.handle_client_action(action_type, payload, &opts, &mut self.rng)?
        };
        if let Some(result) = deterministic {
            debug!(action_type, success = result.success, "resolved client-side");
            return Ok(self.finish(SessionOutcome {
                success: result.success,
                story_text: result.story_text,
                message: result.message,
                pending: result.pending,
                ..Default::default()
            }));
        }

        // Not a deterministic kind: hand the whole request to the narrator.
        info!(action_type, "deferring to narrator");
        let response = self
            .narrator
            .narrate(&self.game, action_type, payload)
            .await?;
        if response.success {
            let mut engine = GameEngine::new(&mut self.game);
            engine.apply(&response.updates)?;
        } else if !response.updates.is_empty() {
            warn!(action_type, "discarding updates from failed narrator response");
        }
        let game_over = response.game_over_message.clone();
        let mut outcome = self.finish(SessionOutcome {
            success: response.success,
            story_text: Some(response.story_text),
            ..Default::default()
        });
        if outcome.game_over.is_none() {
            outcome.game_over = game_over;
        }
        Ok(outcome)
    }

    /// Grants the deferred reward of a two-phase action.
    pub fn complete_pending(&mut self, pending: &PendingAction) -> Result<SessionOutcome> {
        let result = GameEngine::new(&mut self.game).complete_pending(pending)?;
        Ok(self.finish(SessionOutcome {
            success: result.success,
            story_text: result.story_text,
            message: result.message,
            ..Default::default()
        }))
    }

    /// One simulation tick: animals, then quests, then the game-over check.
    pub fn tick(&mut self, viewport: Option<&ViewportBounds>) -> Result<TickOutcome> {
        let outcome = GameEngine::new(&mut self.game).tick(viewport, &mut self.rng)?;
        for quest in &outcome.newly_completed {
            info!(quest, "quest completed");
        }
        Ok(outcome)
    }

    /// Quest scan plus game-over check shared by every action path.
    fn finish(&mut self, mut outcome: SessionOutcome) -> SessionOutcome {
        let scan = fable_core::update_completed_quests(&self.game);
        if !scan.updates.is_empty() {
            // Quest stamps are resolver-shaped patches; application cannot
            // fail for paths we construct ourselves.
            if let Err(error) = GameEngine::new(&mut self.game).apply(&scan.updates) {
                warn!(%error, "failed to record quest completion");
            } else {
                outcome.newly_completed = scan.newly_completed;
            }
        }
        outcome.game_over = fable_core::check_game_over(&self.game);
        outcome
    }
}
