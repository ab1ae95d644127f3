//! Frame snapshots and the renderers that consume them.

mod rasterizer;

pub use rasterizer::{PointRasterizer, Rgba8};

use glam::{Mat4, Vec3};

use crate::error::SceneResult;
use crate::math::Rgb;
use crate::scene::{Environment, ObjectId};

/// One object's drawable state for a single frame
#[derive(Debug, Clone)]
pub struct ObjectView<'a> {
    pub id: &'a ObjectId,
    pub model: Mat4,
    /// Local-space points, already cut to the visible range
    pub points: &'a [Vec3],
    pub color: Rgb,
    pub point_size: f32,
}

/// Everything a renderer needs for one frame, borrowed from the simulator
#[derive(Debug, Clone)]
pub struct SceneFrame<'a> {
    pub view_projection: Mat4,
    pub eye: Vec3,
    pub environment: &'a Environment,
    /// World units the terrain has travelled, wrapped
    pub terrain_scroll: f32,
    pub objects: Vec<ObjectView<'a>>,
}

/// Draws a frame snapshot
pub trait SceneRenderer {
    fn render(&mut self, frame: &SceneFrame<'_>) -> SceneResult<()>;
}
