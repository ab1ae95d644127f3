use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

pub const MAX_YAW: f32 = 85.0 * PI / 180.0;
pub const MAX_PITCH: f32 = 45.0 * PI / 180.0;
/// Largest yaw or pitch change accepted within one frame, radians
pub const MAX_ORBIT_STEP: f32 = 0.05;
/// Largest dolly change accepted within one frame, world units
pub const MAX_DOLLY_STEP: f32 = 0.5;
/// Dolly offset range; the eye never reaches the pivot
pub const DOLLY_RANGE: (f32, f32) = (-40.0, 8.0);

const PIVOT: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const ORBIT_DISTANCE: f32 = 10.0;
const FOV_Y: f32 = 60.0 * PI / 180.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 500.0;

/// Orbit camera around a fixed pivot.
///
/// Every change is rate-limited per frame, then range-limited. Calls made
/// between two `begin_frame`s share one rate budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    yaw: f32,
    pitch: f32,
    dolly: f32,
    /// Change already applied since the last `begin_frame`
    frame_yaw: f32,
    frame_pitch: f32,
    frame_dolly: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    /// Create a rig looking straight at the pivot
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            dolly: 0.0,
            frame_yaw: 0.0,
            frame_pitch: 0.0,
            frame_dolly: 0.0,
        }
    }

    /// Current yaw, radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch, radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Distance moved toward the pivot, world units
    pub fn dolly_offset(&self) -> f32 {
        self.dolly
    }

    /// Refill the per-frame rate budget
    pub fn begin_frame(&mut self) {
        self.frame_yaw = 0.0;
        self.frame_pitch = 0.0;
        self.frame_dolly = 0.0;
    }

    /// Turn around the pivot by whatever the frame budget still allows
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if !yaw_delta.is_finite() || !pitch_delta.is_finite() {
            log::warn!("ignoring non-finite orbit ({}, {})", yaw_delta, pitch_delta);
            return;
        }

        let yaw = step_within(self.yaw, yaw_delta, &mut self.frame_yaw, MAX_ORBIT_STEP, MAX_YAW);
        let pitch = step_within(self.pitch, pitch_delta, &mut self.frame_pitch, MAX_ORBIT_STEP, MAX_PITCH);
        self.yaw = yaw;
        self.pitch = pitch;
    }

    /// Positive moves toward the pivot
    pub fn dolly(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::warn!("ignoring non-finite dolly {}", delta);
            return;
        }
        let step = (self.frame_dolly + delta).clamp(-MAX_DOLLY_STEP, MAX_DOLLY_STEP) - self.frame_dolly;
        let dolly = (self.dolly + step).clamp(DOLLY_RANGE.0, DOLLY_RANGE.1);
        self.frame_dolly += dolly - self.dolly;
        self.dolly = dolly;
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Eye position, pulled toward the pivot by the dolly offset
    pub fn eye(&self) -> Vec3 {
        PIVOT - self.forward() * (ORBIT_DISTANCE - self.dolly)
    }

    /// World to view transform
    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye(), self.forward(), Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y, aspect.max(f32::EPSILON), Z_NEAR, Z_FAR)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Project a world point to NDC x/y.
    /// Points behind the eye still project (mirrored); callers that care
    /// check the returned clip w.
    pub fn project_to_ndc(&self, point: Vec3, aspect: f32) -> (Vec2, f32) {
        let clip = self.view_projection(aspect) * point.extend(1.0);
        let w = if clip.w.abs() < f32::EPSILON { f32::EPSILON } else { clip.w };
        (Vec2::new(clip.x / w, clip.y / w), clip.w)
    }
}

/// Move `value` by `delta`, limited by what is left of the frame budget and
/// then by the symmetric `range`
fn step_within(value: f32, delta: f32, used: &mut f32, budget: f32, range: f32) -> f32 {
    let step = (*used + delta).clamp(-budget, budget) - *used;
    let next = (value + step).clamp(-range, range);
    *used += next - value;
    next
}
