use glam::Vec2;
use std::fmt;

use super::hand::{Gesture, HandSummary};
use crate::scene::{ObjectId, SceneCommand};

/// Which hand (or both) an action listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSlot {
    Left,
    Right,
    Both,
}

/// Inputs an action sees on one dispatch step
#[derive(Debug, Clone)]
pub struct ActionContext<'a> {
    pub left: Option<&'a HandSummary>,
    pub right: Option<&'a HandSummary>,
    /// Frame-to-frame center movement of the acting hand; zero on first sight
    pub delta: Vec2,
    /// Distance between the two hand centers, zero unless both are present
    pub hand_distance: f32,
    pub prev_hand_distance: f32,
    pub prev_left_center: Option<Vec2>,
    pub prev_left_angle: Option<f32>,
    pub selected: Option<ObjectId>,
}

/// A (hand, gesture) binding to a pure scene command
#[derive(Clone, Copy)]
pub struct Action {
    pub name: &'static str,
    pub hand: HandSlot,
    pub gesture: Gesture,
    pub run: fn(&ActionContext<'_>) -> Option<SceneCommand>,
}

impl Action {
    pub fn matches(&self, hand: HandSlot, gesture: Gesture) -> bool {
        self.hand == hand && self.gesture == gesture
    }

    pub fn execute(&self, context: &ActionContext<'_>) -> Option<SceneCommand> {
        (self.run)(context)
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.hand == other.hand && self.gesture == other.gesture
    }
}

impl Eq for Action {}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("hand", &self.hand)
            .field("gesture", &self.gesture)
            .finish()
    }
}
