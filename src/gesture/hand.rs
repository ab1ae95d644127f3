//! Per-hand summaries and the landmark classifier that produces them.
//!
//! Landmarks follow the common 21-point hand layout: wrist at 0, then four
//! joints per finger from thumb to pinky, fingertip last.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub const LANDMARK_COUNT: usize = 21;

const WRIST: usize = 0;
const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
const MIDDLE_MCP: usize = 9;
/// (MCP, PIP, tip) for index, middle, ring, pinky
const FINGERS: [(usize, usize, usize); 4] = [(5, 6, 8), (9, 10, 12), (13, 14, 16), (17, 18, 20)];

/// Thumb-to-index distance, relative to palm size, below which the hand pinches
pub const PINCH_THRESHOLD: f32 = 0.35;
/// A finger is curled when its tip is closer to the wrist than this times its PIP
pub const FIST_CURL_RATIO: f32 = 1.0;
const MIN_CURLED_FINGERS: usize = 3;
const MIN_PALM_SIZE: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    OpenPalm,
    Fist,
    Pinch,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse a tracker label such as "Left" or "right"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Some(Handedness::Left),
            "right" | "r" => Some(Handedness::Right),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

/// Normalized tracker coordinates: x and y in [0, 1] with y down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks(pub [Vec3; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            return None;
        }
        let mut landmarks = [Vec3::ZERO; LANDMARK_COUNT];
        for (slot, p) in landmarks.iter_mut().zip(points) {
            *slot = Vec3::from_array(*p);
        }
        Some(Self(landmarks))
    }

    fn at(&self, index: usize) -> Vec3 {
        self.0[index]
    }

    /// Wrist to middle-finger knuckle, the scale every ratio is relative to
    pub fn palm_size(&self) -> f32 {
        self.at(WRIST).distance(self.at(MIDDLE_MCP))
    }

    /// Mean of the wrist and the four finger knuckles, x/y only
    pub fn palm_center(&self) -> Vec2 {
        let sum = FINGERS
            .iter()
            .fold(self.at(WRIST), |acc, (mcp, _, _)| acc + self.at(*mcp));
        (sum / (FINGERS.len() + 1) as f32).truncate()
    }

    /// Screen-space angle of the wrist to index-fingertip vector
    pub fn pointing_angle(&self) -> f32 {
        let v = (self.at(INDEX_TIP) - self.at(WRIST)).truncate();
        v.y.atan2(v.x)
    }
}

/// Everything the dispatcher knows about one hand on one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSummary {
    pub handedness: Handedness,
    pub gesture: Gesture,
    pub center: Vec2,
    pub landmarks: HandLandmarks,
    /// Thumb to index distance relative to palm size
    pub pinch_distance: f32,
}

impl HandSummary {
    pub fn pointing_angle(&self) -> f32 {
        self.landmarks.pointing_angle()
    }

    /// Hand posed in a given gesture, centered at `center` and pointing along
    /// `angle` (radians, screen space). Classifying the generated landmarks
    /// gives back `gesture`.
    pub fn synthetic(handedness: Handedness, gesture: Gesture, center: Vec2, angle: f32) -> Self {
        let landmarks = pose(gesture, center, angle);
        Self {
            handedness,
            gesture,
            center,
            pinch_distance: pinch_distance(&landmarks),
            landmarks,
        }
    }
}

/// Classify raw landmarks into a summary
pub fn summarize(landmarks: HandLandmarks, handedness: Handedness) -> HandSummary {
    HandSummary {
        handedness,
        gesture: classify(&landmarks),
        center: landmarks.palm_center(),
        pinch_distance: pinch_distance(&landmarks),
        landmarks,
    }
}

/// Pinch wins over fist; anything that is neither is an open palm
pub fn classify(landmarks: &HandLandmarks) -> Gesture {
    let palm = landmarks.palm_size();
    if palm < MIN_PALM_SIZE || !palm.is_finite() {
        return Gesture::Unknown;
    }

    if pinch_distance(landmarks) < PINCH_THRESHOLD {
        return Gesture::Pinch;
    }

    let wrist = landmarks.at(WRIST);
    let curled = FINGERS
        .iter()
        .filter(|(_, pip, tip)| {
            let tip_reach = landmarks.at(*tip).distance(wrist) / palm;
            let pip_reach = landmarks.at(*pip).distance(wrist) / palm;
            tip_reach < FIST_CURL_RATIO * pip_reach
        })
        .count();

    if curled >= MIN_CURLED_FINGERS {
        Gesture::Fist
    } else {
        Gesture::OpenPalm
    }
}

fn pinch_distance(landmarks: &HandLandmarks) -> f32 {
    let palm = landmarks.palm_size();
    if palm < MIN_PALM_SIZE {
        return f32::INFINITY;
    }
    landmarks.at(THUMB_TIP).distance(landmarks.at(INDEX_TIP)) / palm
}

const SYNTHETIC_PALM: f32 = 0.1;
/// Knuckle offsets across the palm, index to pinky
const KNUCKLE_SPREAD: [f32; 4] = [0.3, 0.1, -0.1, -0.3];
const WRIST_BACK: f32 = 0.8;

fn pose(gesture: Gesture, center: Vec2, angle: f32) -> HandLandmarks {
    let s = SYNTHETIC_PALM;
    let d = Vec2::new(angle.cos(), angle.sin());
    let n = d.perp();

    // Shift so the palm center (wrist + knuckles mean) lands on `center`
    let anchor = center + d * (s * WRIST_BACK / (FINGERS.len() + 1) as f32);
    if gesture == Gesture::Unknown {
        return HandLandmarks([anchor.extend(0.0); LANDMARK_COUNT]);
    }

    let wrist = anchor - d * (s * WRIST_BACK);
    let curled = gesture == Gesture::Fist;
    let mut points = [Vec2::ZERO; LANDMARK_COUNT];
    points[WRIST] = wrist;

    for ((mcp, pip, tip), spread) in FINGERS.iter().zip(KNUCKLE_SPREAD) {
        let knuckle = anchor + n * (spread * s);
        let (pip_at, tip_at) = if curled {
            (knuckle + d * (0.3 * s), knuckle - d * (0.1 * s))
        } else {
            (knuckle + d * (0.4 * s), knuckle + d * (0.8 * s))
        };
        points[*mcp] = knuckle;
        points[*pip] = pip_at;
        points[pip + 1] = (pip_at + tip_at) * 0.5;
        points[*tip] = tip_at;
    }

    let thumb_tip = match gesture {
        Gesture::Pinch => points[INDEX_TIP] + n * (0.1 * s),
        Gesture::Fist => wrist + d * (0.6 * s) + n * (0.7 * s),
        _ => wrist + d * (0.8 * s) + n * (0.9 * s),
    };
    for (joint, t) in (1..THUMB_TIP).zip([0.25, 0.5, 0.75]) {
        let base = wrist + n * (0.3 * s);
        points[joint] = base.lerp(thumb_tip, t);
    }
    points[THUMB_TIP] = thumb_tip;

    HandLandmarks(points.map(|p| p.extend(0.0)))
}
