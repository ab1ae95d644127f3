use glam::Vec2;

/// Convert a tracker-normalized point ([0, 1], y down) to NDC ([-1, 1], y up)
pub fn normalized_to_ndc(point: Vec2) -> Vec2 {
    Vec2::new(point.x * 2.0 - 1.0, 1.0 - point.y * 2.0)
}

pub fn ndc_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
