//! Priority-ordered gesture dispatch.
//!
//! One `process` call per gesture sample, in this order:
//!
//! 1. highlight the object nearest the left hand, or clear the highlight
//! 2. two-hand actions
//! 3. left-hand actions
//! 4. right-hand actions, skipped whenever a left hand is present
//!
//! Cross-sample memory lives in `TrackingState`, owned by the caller.

use glam::Vec2;

use super::action::{Action, ActionContext, HandSlot};
use super::actions;
use super::hand::{HandSummary, Handedness};
use crate::math::normalized_to_ndc;
use crate::scene::{ObjectId, SceneControl};

/// What the dispatcher remembers between samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingState {
    pub prev_left_center: Option<Vec2>,
    pub prev_right_center: Option<Vec2>,
    pub prev_left_angle: Option<f32>,
    /// Zero whenever fewer than two hands were seen last sample
    pub prev_hand_distance: f32,
}

impl TrackingState {
    /// Forget every hand
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub highlighted: Option<ObjectId>,
    /// A left hand was present, so right-hand navigation was skipped
    pub manipulation_mode: bool,
    /// Names of the actions that ran, in execution order
    pub executed: Vec<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    actions: Vec<Action>,
}

impl Dispatcher {
    /// Create a dispatcher with no actions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with every built-in binding registered
    pub fn with_default_actions() -> Self {
        let mut dispatcher = Self::new();
        for action in actions::all() {
            dispatcher.register(action);
        }
        dispatcher
    }

    /// Add an action; returns false if an equal one is already registered
    pub fn register(&mut self, action: Action) -> bool {
        if self.actions.contains(&action) {
            return false;
        }
        self.actions.push(action);
        true
    }

    pub fn unregister(&mut self, action: &Action) -> bool {
        let before = self.actions.len();
        self.actions.retain(|a| a != action);
        self.actions.len() != before
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Run one gesture sample: update the highlight from the left hand, then
    /// execute matching actions in priority order and update `tracking`
    pub fn process<S: SceneControl + ?Sized>(
        &self,
        tracking: &mut TrackingState,
        hands: &[HandSummary],
        scene: &mut S,
    ) -> DispatchReport {
        let left = hands.iter().find(|h| h.handedness == Handedness::Left);
        let right = hands.iter().find(|h| h.handedness == Handedness::Right);
        let mut report = DispatchReport::default();

        match left {
            Some(hand) => {
                let ndc = normalized_to_ndc(hand.center);
                let closest = scene.find_closest_at_screen_point(ndc.x, ndc.y);
                scene.set_selected(closest.as_ref());
            }
            None => scene.set_selected(None),
        }
        report.highlighted = scene.selected().cloned();
        report.manipulation_mode = left.is_some();

        let base = ActionContext {
            left,
            right,
            delta: Vec2::ZERO,
            hand_distance: 0.0,
            prev_hand_distance: tracking.prev_hand_distance,
            prev_left_center: tracking.prev_left_center,
            prev_left_angle: tracking.prev_left_angle,
            selected: report.highlighted.clone(),
        };

        match (left, right) {
            (Some(l), Some(r)) => {
                let distance = l.center.distance(r.center);
                let context = ActionContext {
                    hand_distance: distance,
                    ..base.clone()
                };
                self.run_matching(&context, scene, &mut report, |action| {
                    action.hand == HandSlot::Both && action.gesture == l.gesture && action.gesture == r.gesture
                });
                tracking.prev_hand_distance = distance;
            }
            _ => tracking.prev_hand_distance = 0.0,
        }

        match left {
            Some(hand) => {
                let context = ActionContext {
                    delta: delta_from(tracking.prev_left_center, hand.center),
                    ..base.clone()
                };
                self.run_matching(&context, scene, &mut report, |action| {
                    action.matches(HandSlot::Left, hand.gesture)
                });
                tracking.prev_left_center = Some(hand.center);
                tracking.prev_left_angle = Some(hand.pointing_angle());
            }
            None => {
                tracking.prev_left_center = None;
                tracking.prev_left_angle = None;
            }
        }

        match right {
            Some(hand) => {
                if !report.manipulation_mode {
                    let context = ActionContext {
                        delta: delta_from(tracking.prev_right_center, hand.center),
                        ..base
                    };
                    self.run_matching(&context, scene, &mut report, |action| {
                        action.matches(HandSlot::Right, hand.gesture)
                    });
                }
                tracking.prev_right_center = Some(hand.center);
            }
            None => tracking.prev_right_center = None,
        }

        report
    }

    fn run_matching<S: SceneControl + ?Sized>(
        &self,
        context: &ActionContext<'_>,
        scene: &mut S,
        report: &mut DispatchReport,
        matches: impl Fn(&Action) -> bool,
    ) {
        for action in self.actions.iter().filter(|a| matches(*a)) {
            report.executed.push(action.name);
            if let Some(command) = action.execute(context) {
                log::trace!("{} -> {:?}", action.name, command);
                scene.apply_command(command);
            }
        }
    }
}

fn delta_from(previous: Option<Vec2>, current: Vec2) -> Vec2 {
    previous.map_or(Vec2::ZERO, |p| current - p)
}
