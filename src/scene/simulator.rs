//! Owns the world: camera rig, environment and the object registry.
//!
//! All mutation happens through `advance` once per frame or through the
//! synchronous operations below, called by the gesture dispatcher between
//! frames.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::camera_rig::CameraRig;
use super::command::{Manipulation, SceneCommand, SceneControl};
use super::environment::{Environment, Surface, TextureImage};
use super::graph::{EnvironmentSpec, Geometry, ObjectSpec, SceneGraph};
use super::object::{ObjectId, SceneObject, StepOutcome};
use super::primitives;
use crate::config::SimulatorConfig;
use crate::error::SceneResult;
use crate::loaders::{AssetRequest, LoadedAssets, PendingLoads};
use crate::math::{ndc_distance, Rgb};
use crate::render::{ObjectView, SceneFrame, SceneRenderer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatorStats {
    /// Calls to `advance`
    pub frames: u64,
    pub objects_created: usize,
    /// Objects removed after their lifetime ran out
    pub objects_expired: usize,
    /// Objects thrown away by `replace_objects`
    pub objects_discarded: usize,
    /// Asset results that were stale or had no points
    pub loads_dropped: usize,
}

/// Owns the scene and advances it once per frame
pub struct Simulator {
    config: SimulatorConfig,
    rig: CameraRig,
    environment: Environment,
    objects: Vec<SceneObject>,
    selected: Option<ObjectId>,
    generation: u64,
    elapsed: f32,
    terrain_scroll: f32,
    aspect: f32,
    rng: StdRng,
    stats: SimulatorStats,
}

impl Simulator {
    /// Create an empty scene; seeded configs give repeatable runs
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            environment: Environment::new(config.fade_duration),
            config,
            rig: CameraRig::new(),
            objects: Vec::new(),
            selected: None,
            generation: 0,
            elapsed: 0.0,
            terrain_scroll: 0.0,
            aspect: 16.0 / 9.0,
            rng,
            stats: SimulatorStats::default(),
        }
    }

    /// Update the aspect ratio used for projection and picking
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Crossfade to a new sky and terrain; images override the colors
    pub fn set_environment(
        &mut self,
        sky: Rgb,
        terrain: Rgb,
        sky_image: Option<TextureImage>,
        terrain_image: Option<TextureImage>,
    ) {
        self.environment
            .set(Surface::new(sky, sky_image), Surface::new(terrain, terrain_image));
    }

    /// Crossfade to the colors of a parsed environment
    pub fn apply_environment_spec(&mut self, spec: &EnvironmentSpec) {
        log::info!("Environment: {}", if spec.ambience.is_empty() { "unnamed" } else { &spec.ambience });
        self.set_environment(spec.sky(), spec.terrain(), None, None);
    }

    /// Apply a full parser result: environment first, then the object set
    pub fn load_scene_graph(&mut self, graph: &SceneGraph) -> PendingLoads {
        if let Some(environment) = &graph.environment {
            self.apply_environment_spec(environment);
        }
        self.replace_objects(&graph.objects)
    }

    /// Discard every object and build the new set.
    ///
    /// Primitive objects exist as soon as this returns. Asset-backed objects
    /// are returned for the caller to fetch and hand back via `commit_loads`.
    pub fn replace_objects(&mut self, specs: &[ObjectSpec]) -> PendingLoads {
        self.stats.objects_discarded += self.objects.len();
        self.objects.clear();
        self.selected = None;
        self.generation += 1;

        let mut seen = HashSet::new();
        let mut requests = Vec::new();

        for spec in specs {
            if !seen.insert(spec.id.as_str()) {
                log::warn!("duplicate object id '{}' skipped", spec.id);
                continue;
            }

            match spec.geometry() {
                Geometry::Primitive(kind) => {
                    if spec.point_count == 0 {
                        log::warn!("object '{}' has no points, skipped", spec.id);
                        continue;
                    }
                    let points = primitives::generate(kind, spec.point_count, &mut self.rng);
                    self.spawn(spec, points);
                }
                Geometry::Asset(location) => requests.push(AssetRequest {
                    spec: spec.clone(),
                    location,
                }),
            }
        }

        log::info!(
            "Scene generation {}: {} primitive objects, {} assets pending",
            self.generation,
            self.objects.len(),
            requests.len()
        );
        PendingLoads::new(self.generation, requests)
    }

    /// Commit a finished load batch; returns how many objects were added.
    /// Batches from an older generation are dropped whole.
    pub fn commit_loads(&mut self, loaded: LoadedAssets) -> usize {
        if loaded.generation() != self.generation {
            log::warn!(
                "dropping {} loads from stale generation {} (current {})",
                loaded.len(),
                loaded.generation(),
                self.generation
            );
            self.stats.loads_dropped += loaded.len();
            return 0;
        }

        let mut added = 0;
        for asset in loaded.into_results() {
            match asset.points {
                Ok(points) if !points.is_empty() => {
                    if self.object(&ObjectId::new(asset.spec.id.as_str())).is_some() {
                        log::warn!("object '{}' already exists, load ignored", asset.spec.id);
                        self.stats.loads_dropped += 1;
                        continue;
                    }
                    self.spawn(&asset.spec, points);
                    added += 1;
                }
                Ok(_) | Err(_) => self.stats.loads_dropped += 1,
            }
        }
        added
    }

    fn spawn(&mut self, spec: &ObjectSpec, points: Vec<glam::Vec3>) {
        let lifetime = self.sample_lifetime();
        let object = SceneObject::new(spec, points, self.elapsed, lifetime);
        log::debug!(
            "spawned '{}' ({} points, lifetime {:.1}s)",
            object.id(),
            object.target_point_count(),
            lifetime
        );
        self.objects.push(object);
        self.stats.objects_created += 1;
    }

    fn sample_lifetime(&mut self) -> f32 {
        let (min, max) = (self.config.lifetime_min, self.config.lifetime_max);
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Apply a transform change; unknown ids are ignored
    pub fn manipulate_object(&mut self, id: &ObjectId, manipulation: Manipulation) {
        match self.object_mut(id) {
            Some(object) => object.apply(manipulation),
            None => log::debug!("manipulate: no object '{}'", id),
        }
    }

    /// Turn the camera, limited per frame and by range
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.rig.orbit(yaw_delta, pitch_delta);
    }

    /// Move the camera along its view direction
    pub fn dolly(&mut self, delta: f32) {
        self.rig.dolly(delta);
    }

    /// Replay an object's reveal from zero points
    pub fn restart_materialize(&mut self, id: &ObjectId) {
        let now = self.elapsed;
        if let Some(object) = self.object_mut(id) {
            object.restart_materialize(now);
        }
    }

    /// Object whose projected center is nearest the NDC point
    pub fn find_closest_at_screen_point(&self, x: f32, y: f32) -> Option<ObjectId> {
        let target = Vec2::new(x, y);
        self.objects
            .iter()
            .map(|object| {
                let (ndc, _) = self.rig.project_to_ndc(object.position, self.aspect);
                (object, ndc_distance(ndc, target))
            })
            .filter(|(_, distance)| distance.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(object, _)| object.id().clone())
    }

    /// Highlight one object; unknown ids clear the selection
    pub fn set_selected(&mut self, id: Option<&ObjectId>) {
        if self.selected.as_ref() == id {
            return;
        }

        for object in &mut self.objects {
            object.set_highlighted(Some(object.id()) == id);
        }
        self.selected = id.filter(|id| self.objects.iter().any(|o| o.id() == *id)).cloned();
    }

    /// Advance crossfade, world scroll and every object's lifecycle
    pub fn advance(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.elapsed += delta;
        self.stats.frames += 1;
        self.rig.begin_frame();

        self.environment.advance(delta);
        self.scroll_world();

        let now = self.elapsed;
        let config = &self.config;
        let rng = &mut self.rng;
        let mut expired = Vec::new();

        self.objects.retain_mut(|object| match object.step(now, delta, config, rng) {
            StepOutcome::Alive => true,
            StepOutcome::Expired => {
                expired.push(object.id().clone());
                false
            }
        });

        for id in expired {
            log::debug!("'{}' removed", id);
            self.stats.objects_expired += 1;
            if self.selected.as_ref() == Some(&id) {
                self.selected = None;
            }
        }
    }

    fn scroll_world(&mut self) {
        let speed = self.config.scroll_speed;
        if speed == 0.0 {
            return;
        }

        let wrap = self.config.wrap_distance;
        self.terrain_scroll += speed;
        if wrap > 0.0 {
            self.terrain_scroll = self.terrain_scroll.rem_euclid(wrap);
        }

        for object in &mut self.objects {
            if object.scroll(speed, self.config.respawn_z, wrap) {
                log::debug!("'{}' wrapped to z={:.1}", object.id(), object.position.z);
            }
        }
    }

    /// Borrowed snapshot of what should be drawn right now
    pub fn snapshot(&self) -> SceneFrame<'_> {
        let objects = self
            .objects
            .iter()
            .filter(|object| object.visible_point_count() > 0)
            .map(|object| ObjectView {
                id: object.id(),
                model: object.model_matrix(),
                points: object.visible_points(),
                color: object.color,
                point_size: if object.is_highlighted() {
                    self.config.highlight_point_size
                } else {
                    self.config.point_size
                },
            })
            .collect();

        SceneFrame {
            view_projection: self.rig.view_projection(self.aspect),
            eye: self.rig.eye(),
            environment: &self.environment,
            terrain_scroll: self.terrain_scroll,
            objects,
        }
    }

    /// Draw the current snapshot
    pub fn render(&self, renderer: &mut dyn SceneRenderer) -> SceneResult<()> {
        renderer.render(&self.snapshot())
    }

    /// Advance then draw, the usual per-frame call
    pub fn frame(&mut self, delta: f32, renderer: &mut dyn SceneRenderer) -> SceneResult<()> {
        self.advance(delta);
        self.render(renderer)
    }

    /// Active configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Camera rig state
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Sky and terrain pairs, including any fade in progress
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Live objects in creation order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Look up a live object by id
    pub fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    fn object_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Highlighted object, if any
    pub fn selected(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// Incremented by every `replace_objects`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Simulated seconds since creation
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Terrain offset along the travel axis, wrapped
    pub fn terrain_scroll(&self) -> f32 {
        self.terrain_scroll
    }

    /// Counters since creation
    pub fn stats(&self) -> SimulatorStats {
        self.stats
    }

    /// Environment pairs released after a fade
    pub fn environments_disposed(&self) -> usize {
        self.environment.disposed_count()
    }
}

impl SceneControl for Simulator {
    fn find_closest_at_screen_point(&self, x: f32, y: f32) -> Option<ObjectId> {
        Simulator::find_closest_at_screen_point(self, x, y)
    }

    fn set_selected(&mut self, id: Option<&ObjectId>) {
        Simulator::set_selected(self, id)
    }

    fn selected(&self) -> Option<&ObjectId> {
        Simulator::selected(self)
    }

    fn apply_command(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::Orbit { yaw, pitch } => self.orbit(yaw, pitch),
            SceneCommand::Dolly(delta) => self.dolly(delta),
            SceneCommand::Manipulate { id, manipulation } => self.manipulate_object(&id, manipulation),
        }
    }
}
