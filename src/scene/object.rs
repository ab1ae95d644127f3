//! A single point-cloud object and its lifecycle.
//!
//! Phases are not a strict state machine. Each frame the object checks its
//! conditions independently:
//!
//! * materialize while the reveal is incomplete,
//! * diffuse once, a little after the reveal completes,
//! * start removal whenever age passes the lifetime, which cancels both of
//!   the above.

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::command::Manipulation;
use super::graph::{Geometry, ObjectSpec};
use crate::config::SimulatorConfig;
use crate::core::timer::Countdown;
use crate::math::Rgb;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Materializing,
    Settled,
    Diffusing,
    Removing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Alive,
    /// Removal reached zero points; the owner should delete the object
    Expired,
}

#[derive(Debug, Clone)]
struct Diffusion {
    start: usize,
    originals: Vec<Vec3>,
    timer: Countdown,
}

#[derive(Debug, Clone, Copy)]
struct Removal {
    remaining: usize,
    step: usize,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    name: String,
    geometry: Geometry,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: Rgb,
    /// Local-space points; length is the target count
    points: Vec<Vec3>,
    revealed: f32,
    hidden_tail: usize,
    born_at: f32,
    lifetime: f32,
    settled_at: Option<f32>,
    diffusion: Option<Diffusion>,
    diffused: bool,
    removal: Option<Removal>,
    highlighted: bool,
}

impl SceneObject {
    /// Build an object that starts materializing from zero points at `born_at`
    pub fn new(spec: &ObjectSpec, points: Vec<Vec3>, born_at: f32, lifetime: f32) -> Self {
        Self {
            id: ObjectId::new(spec.id.clone()),
            name: spec.display_name().to_string(),
            geometry: spec.geometry(),
            position: Vec3::from_array(spec.position),
            rotation: Vec3::from_array(spec.rotation),
            scale: Vec3::from_array(spec.scale),
            color: spec.base_color(),
            points,
            revealed: 0.0,
            hidden_tail: 0,
            born_at,
            lifetime,
            settled_at: None,
            diffusion: None,
            diffused: false,
            removal: None,
            highlighted: false,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn target_point_count(&self) -> usize {
        self.points.len()
    }

    /// Points currently drawn, always within [0, target]
    pub fn visible_point_count(&self) -> usize {
        match self.removal {
            Some(removal) => removal.remaining,
            None => {
                let revealed = (self.revealed.floor() as usize).min(self.points.len());
                revealed.saturating_sub(self.hidden_tail)
            }
        }
    }

    /// Visible points, a prefix of the full cloud
    pub fn visible_points(&self) -> &[Vec3] {
        &self.points[..self.visible_point_count()]
    }

    pub fn phase(&self) -> Phase {
        if self.removal.is_some() {
            Phase::Removing
        } else if self.diffusion.is_some() {
            Phase::Diffusing
        } else if self.revealed < self.points.len() as f32 {
            Phase::Materializing
        } else {
            Phase::Settled
        }
    }

    pub fn age(&self, now: f32) -> f32 {
        now - self.born_at
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    /// Apply a transform change; results that are not finite are rejected
    pub fn apply(&mut self, manipulation: Manipulation) {
        let (position, rotation, scale) = match manipulation {
            Manipulation::Translate(delta) => (self.position + delta, self.rotation, self.scale),
            Manipulation::Rotate(delta) => (self.position, self.rotation + delta, self.scale),
            Manipulation::Scale(factor) => (self.position, self.rotation, self.scale * factor),
        };

        if position.is_finite() && rotation.is_finite() && scale.is_finite() {
            self.position = position;
            self.rotation = rotation;
            self.scale = scale;
        } else {
            log::warn!("ignoring non-finite {:?} on '{}'", manipulation, self.id);
        }
    }

    /// Replay the reveal from zero points, dropping diffusion and removal
    pub fn restart_materialize(&mut self, now: f32) {
        self.cancel_diffusion();
        self.revealed = 0.0;
        self.hidden_tail = 0;
        self.diffused = false;
        self.settled_at = None;
        self.removal = None;
        self.born_at = now;
    }

    /// Move toward the camera by one frame of world scroll.
    /// Returns true when the object wrapped back behind the horizon.
    pub fn scroll(&mut self, speed: f32, respawn_z: f32, wrap_distance: f32) -> bool {
        self.position.z += speed;
        if self.position.z > respawn_z {
            self.position.z -= wrap_distance;
            true
        } else {
            false
        }
    }

    /// Advance one frame at simulator time `now`
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        delta: f32,
        config: &SimulatorConfig,
        rng: &mut R,
    ) -> StepOutcome {
        if self.removal.is_none() {
            self.materialize(now, delta, config);
            self.diffuse(now, delta, config, rng);

            if self.age(now) > self.lifetime {
                self.begin_removal(config);
            }
        }

        match &mut self.removal {
            Some(removal) => {
                removal.remaining = removal.remaining.saturating_sub(removal.step);
                if removal.remaining == 0 {
                    StepOutcome::Expired
                } else {
                    StepOutcome::Alive
                }
            }
            None => StepOutcome::Alive,
        }
    }

    fn materialize(&mut self, now: f32, delta: f32, config: &SimulatorConfig) {
        let target = self.points.len() as f32;
        if self.revealed >= target {
            return;
        }

        self.revealed = if config.materialize_duration <= 0.0 {
            target
        } else {
            (self.revealed + target / config.materialize_duration * delta).min(target)
        };

        if self.revealed >= target && self.settled_at.is_none() {
            self.settled_at = Some(now);
        }
    }

    fn diffuse<R: Rng + ?Sized>(&mut self, now: f32, delta: f32, config: &SimulatorConfig, rng: &mut R) {
        if self.diffusion.is_none() {
            let ready = !self.diffused
                && self
                    .settled_at
                    .is_some_and(|settled| now - settled >= config.diffuse_delay);
            if ready {
                self.begin_diffusion(config);
            }
            return;
        }

        let jitter = config.diffuse_jitter.abs();
        let damping = config.diffuse_damping.clamp(0.0, 1.0);
        let Some(diffusion) = self.diffusion.as_mut() else {
            return;
        };

        let tail = &mut self.points[diffusion.start..];
        for (point, original) in tail.iter_mut().zip(&diffusion.originals) {
            let kick = Vec3::new(
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            );
            *point = (*point + kick).lerp(*original, damping);
        }

        if diffusion.timer.tick(delta) {
            let hidden = self.points.len() - diffusion.start;
            self.cancel_diffusion();
            self.hidden_tail = hidden;
            self.diffused = true;
            log::debug!("'{}' diffused {} trailing points", self.id, hidden);
        }
    }

    fn begin_diffusion(&mut self, config: &SimulatorConfig) {
        let count = (self.points.len() as f32 * config.diffuse_fraction.clamp(0.0, 1.0)).floor() as usize;
        if count == 0 {
            self.diffused = true;
            return;
        }

        let start = self.points.len() - count;
        self.diffusion = Some(Diffusion {
            start,
            originals: self.points[start..].to_vec(),
            timer: Countdown::started(config.diffuse_duration),
        });
    }

    /// Put diffusing points back where they started
    fn cancel_diffusion(&mut self) {
        if let Some(diffusion) = self.diffusion.take() {
            self.points[diffusion.start..].copy_from_slice(&diffusion.originals);
        }
    }

    fn begin_removal(&mut self, config: &SimulatorConfig) {
        let remaining = self.visible_point_count();
        self.cancel_diffusion();

        let step = (self.points.len() as f32 * config.removal_fraction).ceil() as usize;
        self.removal = Some(Removal {
            remaining,
            step: step.max(1),
        });
        log::debug!("'{}' expired after {:.1}s, removing {} points", self.id, self.lifetime, remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn object(points: usize, lifetime: f32) -> SceneObject {
        let spec = ObjectSpec::new("obj", "cube").with_point_count(points);
        SceneObject::new(&spec, vec![Vec3::ONE; points], 0.0, lifetime)
    }

    /// Step from `*now` for `seconds`, leaving `*now` at the last frame time
    fn run(
        obj: &mut SceneObject,
        config: &SimulatorConfig,
        now: &mut f32,
        seconds: f32,
        dt: f32,
    ) -> StepOutcome {
        let mut rng = StdRng::seed_from_u64(5);
        let frames = (seconds / dt).round() as usize;
        for _ in 0..frames {
            *now += dt;
            if obj.step(*now, dt, config, &mut rng) == StepOutcome::Expired {
                return StepOutcome::Expired;
            }
        }
        StepOutcome::Alive
    }

    #[test]
    fn starts_invisible_and_materializing() {
        let obj = object(100, 10.0);
        assert_eq!(obj.visible_point_count(), 0);
        assert_eq!(obj.phase(), Phase::Materializing);
    }

    #[test]
    fn materializes_at_constant_rate() {
        let config = SimulatorConfig {
            materialize_duration: 2.0,
            ..SimulatorConfig::default()
        };
        let mut obj = object(200, 100.0);

        run(&mut obj, &config, &mut 0.0, 1.0, 0.01);
        let visible = obj.visible_point_count() as i64;
        assert!((visible - 100).abs() <= 1, "visible {}", visible);
    }

    #[test]
    fn diffusion_hides_trailing_fraction() {
        let config = SimulatorConfig {
            materialize_duration: 0.5,
            diffuse_delay: 0.5,
            diffuse_duration: 0.5,
            diffuse_fraction: 0.1,
            ..SimulatorConfig::default()
        };
        let mut obj = object(100, 100.0);

        let mut now = 0.0;
        run(&mut obj, &config, &mut now, 1.2, 0.01);
        assert_eq!(obj.phase(), Phase::Diffusing);
        assert_eq!(obj.visible_point_count(), 100);

        run(&mut obj, &config, &mut now, 1.0, 0.01);
        assert_eq!(obj.phase(), Phase::Settled);
        assert_eq!(obj.visible_point_count(), 90);
    }

    #[test]
    fn diffusion_stays_near_original_positions() {
        let config = SimulatorConfig {
            materialize_duration: 0.0,
            diffuse_delay: 0.0,
            diffuse_duration: 10.0,
            diffuse_jitter: 0.05,
            diffuse_damping: 0.2,
            ..SimulatorConfig::default()
        };
        let mut obj = object(50, 100.0);

        run(&mut obj, &config, &mut 0.0, 5.0, 0.01);
        assert_eq!(obj.phase(), Phase::Diffusing);
        // Damped drift is bounded by jitter / damping
        for p in &obj.points {
            assert!(p.distance(Vec3::ONE) < 0.05 * 3f32.sqrt() / 0.2 + 1e-4);
        }
    }

    #[test]
    fn removal_shrinks_then_expires() {
        let config = SimulatorConfig {
            materialize_duration: 0.1,
            removal_fraction: 0.1,
            ..SimulatorConfig::default()
        };
        let mut obj = object(100, 1.0);

        let mut now = 0.0;
        assert_eq!(run(&mut obj, &config, &mut now, 0.9, 0.05), StepOutcome::Alive);
        assert_eq!(obj.visible_point_count(), 100);

        let mut rng = StdRng::seed_from_u64(1);
        let mut last = obj.visible_point_count();
        let mut removal_frames = 0;
        for _ in 0..100 {
            now += 0.05;
            let outcome = obj.step(now, 0.05, &config, &mut rng);
            if obj.phase() == Phase::Removing || outcome == StepOutcome::Expired {
                removal_frames += 1;
            }
            if outcome == StepOutcome::Expired {
                break;
            }
            if obj.phase() == Phase::Removing {
                assert!(obj.visible_point_count() < last);
            }
            last = obj.visible_point_count();
        }
        assert_eq!(removal_frames, 10);
        assert_eq!(obj.visible_point_count(), 0);
    }

    #[test]
    fn expiry_preempts_materialize() {
        let config = SimulatorConfig {
            materialize_duration: 100.0,
            removal_fraction: 0.5,
            ..SimulatorConfig::default()
        };
        let mut obj = object(1000, 0.5);

        let outcome = run(&mut obj, &config, &mut 0.0, 2.0, 0.1);
        assert_eq!(outcome, StepOutcome::Expired);
    }

    #[test]
    fn restart_replays_reveal() {
        let config = SimulatorConfig {
            materialize_duration: 0.1,
            ..SimulatorConfig::default()
        };
        let mut obj = object(10, 100.0);
        let mut now = 0.0;
        run(&mut obj, &config, &mut now, 0.5, 0.05);
        assert_eq!(obj.visible_point_count(), 10);

        obj.restart_materialize(now);
        assert_eq!(obj.visible_point_count(), 0);
        assert_eq!(obj.phase(), Phase::Materializing);
    }

    #[test]
    fn manipulation_rejects_non_finite() {
        let mut obj = object(1, 10.0);
        obj.apply(Manipulation::Translate(Vec3::new(1.0, 0.0, 0.0)));
        obj.apply(Manipulation::Translate(Vec3::new(f32::NAN, 0.0, 0.0)));
        assert_eq!(obj.position, Vec3::new(1.0, 0.0, 0.0));

        obj.apply(Manipulation::Scale(Vec3::splat(2.0)));
        assert_eq!(obj.scale, Vec3::splat(2.0));
    }

    #[test]
    fn scroll_wraps_past_threshold() {
        let mut obj = object(1, 10.0);
        obj.position.z = 11.99;
        assert!(!obj.scroll(0.005, 12.0, 100.0));
        assert!(obj.scroll(0.01, 12.0, 100.0));
        assert!((obj.position.z - (12.005 - 100.0)).abs() < 1e-3);
    }
}
