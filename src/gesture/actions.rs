//! Built-in gesture bindings.
//!
//! Right hand navigates the camera, left hand manipulates the highlighted
//! object, and both hands pinching scale it.

use glam::{Vec2, Vec3};

use super::action::{Action, ActionContext, HandSlot};
use super::hand::Gesture;
use crate::math::wrap_angle;
use crate::scene::{Manipulation, SceneCommand};

/// Radians of orbit per unit of normalized hand movement
pub const ORBIT_SENSITIVITY: f32 = 2.0;
pub const DOLLY_SENSITIVITY: f32 = 10.0;
pub const TRANSLATE_SPEED: f32 = 5.0;
pub const ROTATE_SPEED: f32 = 1.0;
/// Bounds on the per-sample two-hand scale ratio
pub const MIN_SCALE_RATIO: f32 = 0.7;
pub const MAX_SCALE_RATIO: f32 = 1.4;

pub const ORBIT_CAMERA: Action = Action {
    name: "orbit-camera",
    hand: HandSlot::Right,
    gesture: Gesture::OpenPalm,
    run: orbit_camera,
};

pub const DOLLY_CAMERA: Action = Action {
    name: "dolly-camera",
    hand: HandSlot::Right,
    gesture: Gesture::Fist,
    run: dolly_camera,
};

pub const TRANSLATE_OBJECT: Action = Action {
    name: "translate-object",
    hand: HandSlot::Left,
    gesture: Gesture::Pinch,
    run: translate_object,
};

pub const ROTATE_OBJECT: Action = Action {
    name: "rotate-object",
    hand: HandSlot::Left,
    gesture: Gesture::Fist,
    run: rotate_object,
};

/// Open left palm lets go; highlighting alone already tracks the hand
pub const RELEASE_OBJECT: Action = Action {
    name: "release-object",
    hand: HandSlot::Left,
    gesture: Gesture::OpenPalm,
    run: release_object,
};

pub const SCALE_OBJECT: Action = Action {
    name: "scale-object",
    hand: HandSlot::Both,
    gesture: Gesture::Pinch,
    run: scale_object,
};

pub fn all() -> [Action; 6] {
    [
        ORBIT_CAMERA,
        DOLLY_CAMERA,
        TRANSLATE_OBJECT,
        ROTATE_OBJECT,
        RELEASE_OBJECT,
        SCALE_OBJECT,
    ]
}

fn orbit_camera(ctx: &ActionContext<'_>) -> Option<SceneCommand> {
    if ctx.delta == Vec2::ZERO {
        return None;
    }
    // Grab-and-turn: moving the hand right swings the view left
    Some(SceneCommand::Orbit {
        yaw: -ctx.delta.x * ORBIT_SENSITIVITY,
        pitch: -ctx.delta.y * ORBIT_SENSITIVITY,
    })
}

fn dolly_camera(ctx: &ActionContext<'_>) -> Option<SceneCommand> {
    if ctx.delta.y == 0.0 {
        return None;
    }
    Some(SceneCommand::Dolly(-ctx.delta.y * DOLLY_SENSITIVITY))
}

fn translate_object(ctx: &ActionContext<'_>) -> Option<SceneCommand> {
    let id = ctx.selected.clone()?;
    if ctx.delta == Vec2::ZERO {
        return None;
    }
    let offset = Vec3::new(ctx.delta.x, -ctx.delta.y, 0.0) * TRANSLATE_SPEED;
    Some(SceneCommand::Manipulate {
        id,
        manipulation: Manipulation::Translate(offset),
    })
}

fn rotate_object(ctx: &ActionContext<'_>) -> Option<SceneCommand> {
    let id = ctx.selected.clone()?;
    let previous = ctx.prev_left_angle?;
    let current = ctx.left?.pointing_angle();

    let change = wrap_angle(current - previous);
    if change == 0.0 {
        return None;
    }
    Some(SceneCommand::Manipulate {
        id,
        manipulation: Manipulation::Rotate(Vec3::new(0.0, change * ROTATE_SPEED, 0.0)),
    })
}

fn release_object(_ctx: &ActionContext<'_>) -> Option<SceneCommand> {
    None
}

fn scale_object(ctx: &ActionContext<'_>) -> Option<SceneCommand> {
    let id = ctx.selected.clone()?;
    if ctx.left.is_none() || ctx.right.is_none() {
        return None;
    }
    if ctx.prev_hand_distance <= 0.0 || !ctx.prev_hand_distance.is_finite() {
        return None;
    }

    let ratio = (ctx.hand_distance / ctx.prev_hand_distance).clamp(MIN_SCALE_RATIO, MAX_SCALE_RATIO);
    Some(SceneCommand::Manipulate {
        id,
        manipulation: Manipulation::Scale(Vec3::splat(ratio)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::hand::{HandSummary, Handedness};
    use crate::scene::ObjectId;

    fn context<'a>(left: Option<&'a HandSummary>, right: Option<&'a HandSummary>) -> ActionContext<'a> {
        ActionContext {
            left,
            right,
            delta: Vec2::ZERO,
            hand_distance: 0.0,
            prev_hand_distance: 0.0,
            prev_left_center: None,
            prev_left_angle: None,
            selected: Some(ObjectId::from("obj")),
        }
    }

    #[test]
    fn orbit_inverts_hand_motion() {
        let mut ctx = context(None, None);
        ctx.delta = Vec2::new(0.1, -0.05);

        match ORBIT_CAMERA.execute(&ctx) {
            Some(SceneCommand::Orbit { yaw, pitch }) => {
                assert!((yaw + 0.1 * ORBIT_SENSITIVITY).abs() < 1e-6);
                assert!((pitch - 0.05 * ORBIT_SENSITIVITY).abs() < 1e-6);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn translate_needs_selection() {
        let mut ctx = context(None, None);
        ctx.delta = Vec2::new(0.1, 0.1);
        ctx.selected = None;
        assert!(TRANSLATE_OBJECT.execute(&ctx).is_none());
    }

    #[test]
    fn translate_flips_screen_y() {
        let mut ctx = context(None, None);
        ctx.delta = Vec2::new(0.0, 0.2);
        match TRANSLATE_OBJECT.execute(&ctx) {
            Some(SceneCommand::Manipulate {
                manipulation: Manipulation::Translate(offset),
                ..
            }) => assert!(offset.y < 0.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rotate_wraps_across_pi() {
        let left = HandSummary::synthetic(Handedness::Left, Gesture::Fist, Vec2::splat(0.5), 3.1);
        let mut ctx = context(Some(&left), None);
        ctx.prev_left_angle = Some(wrap_angle(left.pointing_angle() - 0.1));

        match ROTATE_OBJECT.execute(&ctx) {
            Some(SceneCommand::Manipulate {
                manipulation: Manipulation::Rotate(r),
                ..
            }) => assert!((r.y - 0.1 * ROTATE_SPEED).abs() < 1e-4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rotate_without_previous_angle_is_noop() {
        let left = HandSummary::synthetic(Handedness::Left, Gesture::Fist, Vec2::splat(0.5), 0.0);
        let ctx = context(Some(&left), None);
        assert!(ROTATE_OBJECT.execute(&ctx).is_none());
    }

    #[test]
    fn scale_ratio_is_clamped() {
        let left = HandSummary::synthetic(Handedness::Left, Gesture::Pinch, Vec2::new(0.3, 0.5), 0.0);
        let right = HandSummary::synthetic(Handedness::Right, Gesture::Pinch, Vec2::new(0.7, 0.5), 0.0);
        let mut ctx = context(Some(&left), Some(&right));

        ctx.prev_hand_distance = 0.1;
        ctx.hand_distance = 1.0;
        assert_eq!(
            SCALE_OBJECT.execute(&ctx),
            Some(SceneCommand::Manipulate {
                id: ObjectId::from("obj"),
                manipulation: Manipulation::Scale(Vec3::splat(MAX_SCALE_RATIO)),
            })
        );

        ctx.hand_distance = 0.01;
        assert_eq!(
            SCALE_OBJECT.execute(&ctx),
            Some(SceneCommand::Manipulate {
                id: ObjectId::from("obj"),
                manipulation: Manipulation::Scale(Vec3::splat(MIN_SCALE_RATIO)),
            })
        );

        ctx.prev_hand_distance = 0.0;
        assert!(SCALE_OBJECT.execute(&ctx).is_none());
    }

    #[test]
    fn release_is_inert() {
        assert!(RELEASE_OBJECT.execute(&context(None, None)).is_none());
    }
}
