use glam::Vec3;

/// Axis-aligned bounds of a point set
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of all points, or `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let bounds = rest.iter().fold(Self::new(*first, *first), |acc, &p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        });
        Some(bounds)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest side length
    pub fn max_extent(&self) -> f32 {
        self.extent().max_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_all_points() {
        let points = [
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
        ];

        let bounds = AABB::from_points(&points).unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.center(), Vec3::ZERO);
        assert_eq!(bounds.max_extent(), 6.0);
    }

    #[test]
    fn from_points_empty() {
        assert!(AABB::from_points(&[]).is_none());
    }
}
