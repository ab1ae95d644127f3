//! Recorded gesture samples for headless runs.
//!
//! ```json
//! { "frames": [
//!     { "hands": [ { "hand": "right", "gesture": "open-palm", "center": [0.5, 0.5] } ] },
//!     { "hands": [] }
//! ] }
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use super::hand::{Gesture, HandSummary, Handedness};
use crate::error::SceneResult;

fn default_pointing() -> f32 {
    -FRAC_PI_2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedHand {
    pub hand: Handedness,
    pub gesture: Gesture,
    pub center: [f32; 2],
    /// Wrist to index-tip direction in radians, screen space
    #[serde(default = "default_pointing")]
    pub pointing: f32,
}

impl ScriptedHand {
    pub fn summary(&self) -> HandSummary {
        HandSummary::synthetic(self.hand, self.gesture, Vec2::from_array(self.center), self.pointing)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    #[serde(default)]
    pub hands: Vec<ScriptedHand>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    pub frames: Vec<ScriptFrame>,
}

impl GestureScript {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Hands for a frame; past the end the script reports no hands
    pub fn sample(&self, frame: usize) -> Vec<HandSummary> {
        self.frames
            .get(frame)
            .map(|f| f.hands.iter().map(ScriptedHand::summary).collect())
            .unwrap_or_default()
    }
}
