//! Simulator tuning, loadable from a JSON file.
//!
//! Every field has a default so a config file only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SceneResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Seconds for an object to reveal all of its points
    pub materialize_duration: f32,
    /// Lifetime range in seconds, sampled once per object
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    /// Fraction of target points removed per frame once an object expires
    pub removal_fraction: f32,
    /// Trailing fraction of points that diffuse away after settling
    pub diffuse_fraction: f32,
    /// Seconds between the reveal completing and diffusion starting
    pub diffuse_delay: f32,
    pub diffuse_duration: f32,
    /// Max per-axis jitter applied to a diffusing point each frame
    pub diffuse_jitter: f32,
    /// Pull back toward the snapshot position each frame, in (0, 1]
    pub diffuse_damping: f32,
    /// Environment crossfade length in seconds
    pub fade_duration: f32,
    /// World units the scene travels toward the camera per frame
    pub scroll_speed: f32,
    /// Objects past this depth wrap backward by `wrap_distance`
    pub respawn_z: f32,
    pub wrap_distance: f32,
    pub point_size: f32,
    pub highlight_point_size: f32,
    /// Fixed seed for lifetimes and jitter; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            materialize_duration: 3.0,
            lifetime_min: 25.0,
            lifetime_max: 45.0,
            removal_fraction: 0.02,
            diffuse_fraction: 0.1,
            diffuse_delay: 1.0,
            diffuse_duration: 2.0,
            diffuse_jitter: 0.02,
            diffuse_damping: 0.15,
            fade_duration: 2.5,
            scroll_speed: 0.02,
            respawn_z: 12.0,
            wrap_distance: 100.0,
            point_size: 2.0,
            highlight_point_size: 4.0,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Config with a fixed seed and no world scroll, for reproducible runs
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            scroll_speed: 0.0,
            ..Self::default()
        }
    }
}
