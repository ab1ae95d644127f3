//! CPU point splatter producing an RGBA8 frame buffer.
//!
//! Draw order: sky layers, then the terrain grid, then objects. Terrain and
//! objects share a depth buffer; the sky is always behind.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::{SceneFrame, SceneRenderer};
use crate::error::SceneResult;
use crate::math::{lerp_rgb, Rgb};
use crate::scene::EnvironmentPair;

const TERRAIN_GRID: usize = 50;
const TERRAIN_SPACING: f32 = 2.0;
const TERRAIN_HEIGHT: f32 = -1.0;
const TERRAIN_POINT_SIZE: f32 = 2.0;
/// How far the terrain grid extends behind the camera pivot
const TERRAIN_NEAR_Z: f32 = 10.0;
const HORIZON_HAZE: f32 = 0.35;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8 { r: 0, g: 0, b: 0, a: 255 };

    pub fn from_rgb(color: Rgb) -> Self {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: channel(color[0]),
            g: channel(color[1]),
            b: channel(color[2]),
            a: 255,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

pub struct PointRasterizer {
    width: u32,
    height: u32,
    color: Vec<Rgba8>,
    depth: Vec<f32>,
    points_drawn: usize,
}

impl PointRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            color: vec![Rgba8::BLACK; len],
            depth: vec![f32::INFINITY; len],
            points_drawn: 0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.color
    }

    /// Frame buffer as raw bytes, ready for a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        (x < self.width && y < self.height).then(|| self.color[(y * self.width + x) as usize])
    }

    /// Points that landed on screen during the last frame
    pub fn points_drawn(&self) -> usize {
        self.points_drawn
    }

    fn draw_sky(&mut self, layers: &[&EnvironmentPair]) {
        let (w, h) = (self.width as usize, self.height as usize);
        for y in 0..h {
            let v = (y as f32 + 0.5) / h as f32;
            for x in 0..w {
                let u = (x as f32 + 0.5) / w as f32;
                let color = blend_layers(layers, |pair| sky_color(pair, u, v));
                self.color[y * w + x] = Rgba8::from_rgb(color);
            }
        }
    }

    fn draw_terrain(&mut self, view_projection: Mat4, layers: &[&EnvironmentPair], scroll: f32) {
        if layers.is_empty() {
            return;
        }

        let depth_span = TERRAIN_GRID as f32 * TERRAIN_SPACING;
        let half_width = depth_span * 0.5;

        for row in 0..TERRAIN_GRID {
            let z = (row as f32 * TERRAIN_SPACING + scroll).rem_euclid(depth_span) - depth_span + TERRAIN_NEAR_Z;
            let v = (z - TERRAIN_NEAR_Z) / -depth_span;
            for col in 0..TERRAIN_GRID {
                let x = col as f32 * TERRAIN_SPACING - half_width;
                let u = col as f32 / TERRAIN_GRID as f32;
                let color = blend_layers(layers, |pair| pair.terrain.color_at(u, v));
                self.splat(view_projection, Vec3::new(x, TERRAIN_HEIGHT, z), color, TERRAIN_POINT_SIZE);
            }
        }
    }

    /// Project one world-space point and fill a square of `size` pixels
    fn splat(&mut self, view_projection: Mat4, point: Vec3, color: Rgb, size: f32) {
        let clip = view_projection * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return;
        }

        let sx = (ndc.x * 0.5 + 0.5) * self.width as f32;
        let sy = (0.5 - ndc.y * 0.5) * self.height as f32;
        let half = size.max(1.0) * 0.5;

        let x0 = (sx - half).floor().max(0.0) as i64;
        let y0 = (sy - half).floor().max(0.0) as i64;
        let x1 = ((sx + half).floor() as i64).min(self.width as i64);
        let y1 = ((sy + half).floor() as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let pixel = Rgba8::from_rgb(color);
        for y in y0..y1 {
            for x in x0..x1 {
                let i = y as usize * self.width as usize + x as usize;
                if ndc.z < self.depth[i] {
                    self.depth[i] = ndc.z;
                    self.color[i] = pixel;
                }
            }
        }
        self.points_drawn += 1;
    }
}

impl SceneRenderer for PointRasterizer {
    fn render(&mut self, frame: &SceneFrame<'_>) -> SceneResult<()> {
        self.depth.fill(f32::INFINITY);
        self.points_drawn = 0;

        let layers: Vec<&EnvironmentPair> = frame.environment.layers().collect();
        self.draw_sky(&layers);
        self.draw_terrain(frame.view_projection, &layers, frame.terrain_scroll);

        for object in &frame.objects {
            let mvp = frame.view_projection * object.model;
            for point in object.points {
                self.splat(mvp, *point, object.color, object.point_size);
            }
        }

        Ok(())
    }
}

/// Oldest layer is the base, each newer one is blended over it by its opacity
fn blend_layers(layers: &[&EnvironmentPair], color_of: impl Fn(&EnvironmentPair) -> Rgb) -> Rgb {
    let mut layers = layers.iter();
    let Some(base) = layers.next() else {
        return [0.0; 3];
    };

    layers.fold(color_of(base), |acc, pair| lerp_rgb(acc, color_of(pair), pair.opacity))
}

fn sky_color(pair: &EnvironmentPair, u: f32, v: f32) -> Rgb {
    if pair.sky.texture.is_some() {
        return pair.sky.color_at(u, v);
    }
    // Lighter toward the horizon
    lerp_rgb(pair.sky.color, [1.0; 3], v * HORIZON_HAZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ObjectView;
    use crate::scene::{CameraRig, Environment, ObjectId, Surface};

    fn environment(sky: Rgb) -> Environment {
        let mut env = Environment::new(1.0);
        env.set(Surface::new(sky, None), Surface::new([0.0, 1.0, 0.0], None));
        env
    }

    fn frame<'a>(env: &'a Environment, objects: Vec<ObjectView<'a>>) -> SceneFrame<'a> {
        let rig = CameraRig::new();
        SceneFrame {
            view_projection: rig.view_projection(1.0),
            eye: rig.eye(),
            environment: env,
            terrain_scroll: 0.0,
            objects,
        }
    }

    #[test]
    fn sky_fills_top_row() {
        let env = environment([0.0, 0.0, 1.0]);
        let mut raster = PointRasterizer::new(16, 16);
        raster.render(&frame(&env, Vec::new())).unwrap();

        let top = raster.pixel(8, 0).unwrap();
        assert!(top.b > 200);
        assert_eq!(raster.as_bytes().len(), 16 * 16 * 4);
    }

    #[test]
    fn object_point_lands_at_center() {
        let env = environment([0.0; 3]);
        let id = ObjectId::from("dot");
        let points = [Vec3::ZERO];
        let view = ObjectView {
            id: &id,
            model: Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)),
            points: &points,
            color: [1.0, 0.0, 0.0],
            point_size: 4.0,
        };

        let mut raster = PointRasterizer::new(64, 64);
        raster.render(&frame(&env, vec![view])).unwrap();

        assert_eq!(raster.pixel(32, 32), Some(Rgba8::from_rgb([1.0, 0.0, 0.0])));
    }

    #[test]
    fn nearer_point_wins_depth_test() {
        let env = environment([0.0; 3]);
        let (far_id, near_id) = (ObjectId::from("far"), ObjectId::from("near"));
        let far_points = [Vec3::new(0.0, 1.0, -5.0)];
        let near_points = [Vec3::new(0.0, 1.0, 2.0)];
        let views = vec![
            ObjectView {
                id: &near_id,
                model: Mat4::IDENTITY,
                points: &near_points,
                color: [0.0, 1.0, 0.0],
                point_size: 6.0,
            },
            ObjectView {
                id: &far_id,
                model: Mat4::IDENTITY,
                points: &far_points,
                color: [1.0, 0.0, 0.0],
                point_size: 6.0,
            },
        ];

        let mut raster = PointRasterizer::new(64, 64);
        raster.render(&frame(&env, views)).unwrap();

        assert_eq!(raster.pixel(32, 32), Some(Rgba8::from_rgb([0.0, 1.0, 0.0])));
    }

    #[test]
    fn crossfade_blends_sky() {
        let mut env = environment([0.0; 3]);
        env.set(Surface::new([1.0; 3], None), Surface::new([0.0; 3], None));
        env.advance(0.5);

        let mut raster = PointRasterizer::new(4, 4);
        raster.render(&frame(&env, Vec::new())).unwrap();

        let top = raster.pixel(0, 0).unwrap().to_rgb();
        assert!(top[0] > 0.3 && top[0] < 0.8, "blended {:?}", top);
    }
}
