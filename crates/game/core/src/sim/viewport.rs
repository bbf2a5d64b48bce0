//! Viewport culling bounds for the simulation loop.
//!
//! Off-screen animals are frozen rather than simulated; the bounds carry a
//! generous buffer so animals resume well before they scroll into view.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Pixel dimensions of the visible stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSize {
    pub width: f64,
    pub height: f64,
}

/// An axis-aligned rectangle in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ViewportBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Bounds centered on the player covering the visible cells plus a fixed
/// buffer. Vertical extent is squashed by the isometric Y scale to match
/// what is actually drawn.
pub fn calculate_viewport_bounds(
    player_x: f64,
    player_y: f64,
    stage: &StageSize,
) -> ViewportBounds {
    let cell = GameConfig::CELL_SIZE;
    let cell_y = cell * GameConfig::ISO_Y_SCALE;
    let half_width = (stage.width / cell / 2.0 + GameConfig::VIEWPORT_BUFFER_CELLS) * cell;
    let half_height = (stage.height / cell_y / 2.0 + GameConfig::VIEWPORT_BUFFER_CELLS) * cell_y;

    ViewportBounds {
        min_x: player_x - half_width,
        max_x: player_x + half_width,
        min_y: player_y - half_height,
        max_y: player_y + half_height,
    }
}
