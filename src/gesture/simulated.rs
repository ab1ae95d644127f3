//! Mouse and keyboard stand-in for a hand tracker.
//!
//! The cursor drives the active hand. Keys:
//!
//! | key     | effect                                  |
//! |---------|-----------------------------------------|
//! | Tab     | switch active hand                      |
//! | 1 2 3   | open palm, fist, pinch                  |
//! | 0       | hide the active hand                    |
//! | B       | toggle two-hand mode around the cursor  |
//! | Q / E   | rotate the pointing direction           |
//!
//! The mouse wheel changes the spread between hands in two-hand mode.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::hand::{Gesture, HandSummary, Handedness};

const ROTATE_STEP: f32 = 0.15;
const SPREAD_STEP: f32 = 0.02;
const SPREAD_RANGE: (f32, f32) = (0.05, 0.9);
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimKey {
    SwitchHand,
    Gesture(Gesture),
    Hide,
    ToggleBoth,
    RotateLeft,
    RotateRight,
}

#[derive(Debug, Clone, Copy)]
struct SimHand {
    visible: bool,
    gesture: Gesture,
    center: Vec2,
}

impl SimHand {
    fn hidden() -> Self {
        Self {
            visible: false,
            gesture: Gesture::OpenPalm,
            center: Vec2::splat(0.5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedHands {
    active: Handedness,
    left: SimHand,
    right: SimHand,
    both: bool,
    spread: f32,
    /// Pointing direction, screen space; straight up by default
    angle: f32,
    cursor: Vec2,
}

impl Default for SimulatedHands {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHands {
    /// Starts with the right hand active and no hands visible
    pub fn new() -> Self {
        Self {
            active: Handedness::Right,
            left: SimHand::hidden(),
            right: SimHand::hidden(),
            both: false,
            spread: 0.3,
            angle: -FRAC_PI_2,
            cursor: Vec2::splat(0.5),
        }
    }

    pub fn active(&self) -> Handedness {
        self.active
    }

    pub fn spread(&self) -> f32 {
        self.spread
    }

    pub fn process_event(&mut self, event: &WindowEvent, size: PhysicalSize<u32>) {
        match event {
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed && !event.repeat => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = Self::keycode_to_key(code) {
                        self.press(key);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if size.width > 0 && size.height > 0 {
                    self.set_cursor(Vec2::new(
                        position.x as f32 / size.width as f32,
                        position.y as f32 / size.height as f32,
                    ));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.adjust_spread(lines * SPREAD_STEP);
            }
            _ => {}
        }
    }

    pub fn press(&mut self, key: SimKey) {
        match key {
            SimKey::SwitchHand => self.active = self.active.other(),
            SimKey::Gesture(gesture) => {
                for hand in self.acting_hands() {
                    hand.visible = true;
                    hand.gesture = gesture;
                }
            }
            SimKey::Hide => {
                for hand in self.acting_hands() {
                    hand.visible = false;
                }
            }
            SimKey::ToggleBoth => {
                self.both = !self.both;
                if self.both {
                    let gesture = self.hand(self.active).gesture;
                    for hand in [&mut self.left, &mut self.right] {
                        hand.visible = true;
                        hand.gesture = gesture;
                    }
                }
            }
            SimKey::RotateLeft => self.angle -= ROTATE_STEP,
            SimKey::RotateRight => self.angle += ROTATE_STEP,
        }
        self.place_hands();
    }

    /// Cursor in normalized window coordinates, y down
    pub fn set_cursor(&mut self, cursor: Vec2) {
        self.cursor = cursor.clamp(Vec2::ZERO, Vec2::ONE);
        self.place_hands();
    }

    pub fn adjust_spread(&mut self, delta: f32) {
        self.spread = (self.spread + delta).clamp(SPREAD_RANGE.0, SPREAD_RANGE.1);
        self.place_hands();
    }

    /// Current sample, as a tracker would report it
    pub fn hands(&self) -> Vec<HandSummary> {
        [(Handedness::Left, &self.left), (Handedness::Right, &self.right)]
            .into_iter()
            .filter(|(_, hand)| hand.visible)
            .map(|(handedness, hand)| HandSummary::synthetic(handedness, hand.gesture, hand.center, self.angle))
            .collect()
    }

    fn hand(&self, handedness: Handedness) -> &SimHand {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    fn acting_hands(&mut self) -> Vec<&mut SimHand> {
        if self.both {
            vec![&mut self.left, &mut self.right]
        } else {
            match self.active {
                Handedness::Left => vec![&mut self.left],
                Handedness::Right => vec![&mut self.right],
            }
        }
    }

    fn place_hands(&mut self) {
        if self.both {
            let half = Vec2::new(self.spread * 0.5, 0.0);
            self.left.center = self.cursor - half;
            self.right.center = self.cursor + half;
        } else {
            match self.active {
                Handedness::Left => self.left.center = self.cursor,
                Handedness::Right => self.right.center = self.cursor,
            }
        }
    }

    fn keycode_to_key(code: KeyCode) -> Option<SimKey> {
        match code {
            KeyCode::Tab => Some(SimKey::SwitchHand),
            KeyCode::Digit1 => Some(SimKey::Gesture(Gesture::OpenPalm)),
            KeyCode::Digit2 => Some(SimKey::Gesture(Gesture::Fist)),
            KeyCode::Digit3 => Some(SimKey::Gesture(Gesture::Pinch)),
            KeyCode::Digit0 => Some(SimKey::Hide),
            KeyCode::KeyB => Some(SimKey::ToggleBoth),
            KeyCode::KeyQ => Some(SimKey::RotateLeft),
            KeyCode::KeyE => Some(SimKey::RotateRight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_hands() {
        assert!(SimulatedHands::new().hands().is_empty());
    }

    #[test]
    fn gesture_key_shows_active_hand_at_cursor() {
        let mut sim = SimulatedHands::new();
        sim.set_cursor(Vec2::new(0.2, 0.8));
        sim.press(SimKey::Gesture(Gesture::Fist));

        let hands = sim.hands();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].handedness, Handedness::Right);
        assert_eq!(hands[0].gesture, Gesture::Fist);
        assert_eq!(hands[0].center, Vec2::new(0.2, 0.8));
    }

    #[test]
    fn switching_hand_leaves_other_in_place() {
        let mut sim = SimulatedHands::new();
        sim.press(SimKey::Gesture(Gesture::OpenPalm));
        sim.press(SimKey::SwitchHand);
        sim.set_cursor(Vec2::new(0.1, 0.1));
        sim.press(SimKey::Gesture(Gesture::Pinch));

        let hands = sim.hands();
        assert_eq!(hands.len(), 2);
        let right = hands.iter().find(|h| h.handedness == Handedness::Right).unwrap();
        assert_eq!(right.center, Vec2::splat(0.5));
    }

    #[test]
    fn both_mode_spreads_around_cursor() {
        let mut sim = SimulatedHands::new();
        sim.press(SimKey::Gesture(Gesture::Pinch));
        sim.press(SimKey::ToggleBoth);
        sim.adjust_spread(10.0);

        let hands = sim.hands();
        assert_eq!(hands.len(), 2);
        assert!(hands.iter().all(|h| h.gesture == Gesture::Pinch));
        let distance = hands[0].center.distance(hands[1].center);
        assert!((distance - SPREAD_RANGE.1).abs() < 1e-5);
    }

    #[test]
    fn hide_removes_active_hand() {
        let mut sim = SimulatedHands::new();
        sim.press(SimKey::Gesture(Gesture::OpenPalm));
        sim.press(SimKey::Hide);
        assert!(sim.hands().is_empty());
    }
}
