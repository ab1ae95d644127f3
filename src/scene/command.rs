use glam::Vec3;

use super::object::ObjectId;

/// Immediate change to one object's transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Manipulation {
    /// Added to the position
    Translate(Vec3),
    /// Added to the Euler rotation, radians
    Rotate(Vec3),
    /// Multiplies the scale component-wise
    Scale(Vec3),
}

/// Mutation produced by a gesture action
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Orbit { yaw: f32, pitch: f32 },
    Dolly(f32),
    Manipulate {
        id: ObjectId,
        manipulation: Manipulation,
    },
}

/// The part of the simulator the gesture layer is allowed to touch
pub trait SceneControl {
    /// Object whose projected position is nearest to an NDC point
    fn find_closest_at_screen_point(&self, x: f32, y: f32) -> Option<ObjectId>;

    /// Highlight one object, or none
    fn set_selected(&mut self, id: Option<&ObjectId>);

    /// Currently highlighted object, if any
    fn selected(&self) -> Option<&ObjectId>;

    /// Carry out one action's command immediately
    fn apply_command(&mut self, command: SceneCommand);
}
