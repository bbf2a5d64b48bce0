//! The AI narrator boundary.
//!
//! The narrator is an external collaborator: it receives the game and the
//! player's free-form request and answers with narrative text plus a patch
//! batch in the exact same format the deterministic resolvers produce. The
//! runtime validates the shape strictly and applies the updates through the
//! same interpreter, so narrator-driven and resolver-driven mutations are
//! interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use fable_core::{ActionPayload, Game, Patch};

use crate::error::{Result, RuntimeError};

/// The wire shape a narrator must answer with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarratorResponse {
    pub story_text: String,
    #[serde(default)]
    pub updates: Vec<Patch>,
    pub success: bool,
    #[serde(default)]
    pub game_over_message: Option<String>,
}

impl NarratorResponse {
    /// Parses a raw narrator reply. A parse failure means the whole response
    /// is discarded; partial trust is never extended to external output.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(RuntimeError::MalformedNarratorResponse)
    }
}

/// Anything that can answer a non-deterministic action.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(
        &self,
        game: &Game,
        action_type: &str,
        payload: &ActionPayload,
    ) -> Result<NarratorResponse>;
}

/// A narrator that refuses everything. Useful for purely deterministic
/// sessions and as a safe default.
pub struct NullNarrator;

#[async_trait]
impl Narrator for NullNarrator {
    async fn narrate(
        &self,
        _game: &Game,
        action_type: &str,
        _payload: &ActionPayload,
    ) -> Result<NarratorResponse> {
        Ok(NarratorResponse {
            story_text: format!("Nothing happens when you try to {action_type}."),
            updates: Vec::new(),
            success: false,
            game_over_message: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_documented_shape() {
        let raw = r#"{
            "storyText": "A cool breeze rolls in.",
            "updates": [{"type": "set", "path": "instance.money", "value": 10}],
            "success": true,
            "gameOverMessage": null
        }"#;
        let response = NarratorResponse::parse(raw).unwrap();
        assert!(response.success);
        assert_eq!(response.updates.len(), 1);
        assert!(response.game_over_message.is_none());
    }

    #[test]
    fn missing_updates_default_to_empty() {
        let raw = r#"{"storyText": "Nothing happens.", "success": false}"#;
        let response = NarratorResponse::parse(raw).unwrap();
        assert!(response.updates.is_empty());
    }

    #[test]
    fn malformed_json_is_rejected_outright() {
        assert!(NarratorResponse::parse("the wolf eats you").is_err());
        assert!(NarratorResponse::parse(r#"{"storyText": 7, "success": true}"#).is_err());
    }
}
