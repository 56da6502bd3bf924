//! Table layout configuration.
//!
//! Plain data describing a board: dimensions, hole placement, ball and
//! player start positions (normalized to [0, 1] so one layout scales to
//! any board size), hole radius and the starting shot count. Loadable
//! from JSON at runtime; games may also build one in code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::body::BallKind;

/// One ball to place at game start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallSpawn {
    pub kind: BallKind,
    /// Ball center, normalized to the board size.
    pub pos: [f32; 2],
}

/// Full description of a playable table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Board size in world units (pixels).
    pub size: [f32; 2],
    /// Hole centers, normalized. Values slightly outside [0, 1] tuck a
    /// hole into the rail.
    pub holes: Vec<[f32; 2]>,
    /// Hole radius in world units.
    pub hole_radius: f32,
    /// Player (cue ball) start center, normalized.
    pub player: [f32; 2],
    /// Scoring balls to place.
    pub balls: Vec<BallSpawn>,
    /// Shots the player starts with.
    pub shots: u32,
}

impl LayoutConfig {
    /// Parse a layout from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size[0]
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size[1]
    }

    /// Map a normalized position to world coordinates.
    pub fn resolve(&self, normalized: [f32; 2]) -> Vec2 {
        Vec2::new(normalized[0] * self.size[0], normalized[1] * self.size[1])
    }

    /// Hole centers in world coordinates.
    pub fn hole_positions(&self) -> Vec<Vec2> {
        self.holes.iter().map(|h| self.resolve(*h)).collect()
    }
}
