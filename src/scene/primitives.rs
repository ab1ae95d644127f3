//! Synthetic point-cloud shapes for objects without an external asset.
//!
//! Every generator fills roughly the cube [-1, 1]^3 so the object's scale
//! means the same thing regardless of shape.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Sphere,
    Cube,
    Cylinder,
    Cone,
    Torus,
    Pyramid,
    Plane,
    Cloud,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Sphere,
        PrimitiveKind::Cube,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::Torus,
        PrimitiveKind::Pyramid,
        PrimitiveKind::Plane,
        PrimitiveKind::Cloud,
    ];

    /// Map a parser type tag to a shape; unrecognized tags become spheres
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "sphere" | "ball" | "orb" | "planet" | "moon" => Self::Sphere,
            "cube" | "box" | "building" | "house" | "crate" => Self::Cube,
            "cylinder" | "column" | "pillar" | "tower" | "trunk" => Self::Cylinder,
            "cone" | "tree" | "pine" | "mountain" | "spire" => Self::Cone,
            "torus" | "ring" | "donut" | "portal" => Self::Torus,
            "pyramid" | "tent" => Self::Pyramid,
            "plane" | "ground" | "floor" | "lake" => Self::Plane,
            "cloud" | "rock" | "bush" | "particles" | "fog" => Self::Cloud,
            other => {
                log::debug!("unknown object type '{}', using sphere", other);
                Self::Sphere
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Cube => "cube",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Torus => "torus",
            Self::Pyramid => "pyramid",
            Self::Plane => "plane",
            Self::Cloud => "cloud",
        }
    }
}

/// Generate `count` surface points for a shape
pub fn generate<R: Rng + ?Sized>(kind: PrimitiveKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| match kind {
            PrimitiveKind::Sphere => sphere_point(rng),
            PrimitiveKind::Cube => cube_point(rng),
            PrimitiveKind::Cylinder => cylinder_point(rng),
            PrimitiveKind::Cone => cone_point(rng),
            PrimitiveKind::Torus => torus_point(rng),
            PrimitiveKind::Pyramid => pyramid_point(rng),
            PrimitiveKind::Plane => plane_point(rng),
            PrimitiveKind::Cloud => cloud_point(rng),
        })
        .collect()
}

fn sphere_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let phi: f32 = rng.random_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    let radius: f32 = rng.random_range(0.95..=1.0);
    Vec3::new(ring * phi.cos(), z, ring * phi.sin()) * radius
}

fn cube_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let face = rng.random_range(0..6);
    let u: f32 = rng.random_range(-1.0..=1.0);
    let v: f32 = rng.random_range(-1.0..=1.0);
    let p = match face {
        0 => Vec3::new(1.0, u, v),
        1 => Vec3::new(-1.0, u, v),
        2 => Vec3::new(u, 1.0, v),
        3 => Vec3::new(u, -1.0, v),
        4 => Vec3::new(u, v, 1.0),
        _ => Vec3::new(u, v, -1.0),
    };
    p * 0.8
}

fn cylinder_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const RADIUS: f32 = 0.6;
    let angle: f32 = rng.random_range(0.0..TAU);
    // One point in five lands on a cap
    if rng.random_range(0..5) == 0 {
        let r = RADIUS * rng.random_range(0.0f32..=1.0).sqrt();
        let y = if rng.random::<bool>() { 1.0 } else { -1.0 };
        Vec3::new(r * angle.cos(), y, r * angle.sin())
    } else {
        let y: f32 = rng.random_range(-1.0..=1.0);
        Vec3::new(RADIUS * angle.cos(), y, RADIUS * angle.sin())
    }
}

fn cone_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const BASE_RADIUS: f32 = 0.7;
    // sqrt biases samples toward the wide base so density looks even
    let t = 1.0 - rng.random_range(0.0f32..=1.0).sqrt();
    let angle: f32 = rng.random_range(0.0..TAU);
    let r = BASE_RADIUS * (1.0 - t);
    Vec3::new(r * angle.cos(), t * 2.0 - 1.0, r * angle.sin())
}

fn torus_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    const MAJOR: f32 = 0.75;
    const MINOR: f32 = 0.25;
    let theta: f32 = rng.random_range(0.0..TAU);
    let phi: f32 = rng.random_range(0.0..TAU);
    let ring = MAJOR + MINOR * phi.cos();
    Vec3::new(ring * theta.cos(), MINOR * phi.sin(), ring * theta.sin())
}

fn pyramid_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = 1.0 - rng.random_range(0.0f32..=1.0).sqrt();
    let half = 1.0 - t;
    let edge: f32 = rng.random_range(-1.0..=1.0) * half;
    let y = t * 2.0 - 1.0;
    match rng.random_range(0..4) {
        0 => Vec3::new(half, y, edge),
        1 => Vec3::new(-half, y, edge),
        2 => Vec3::new(edge, y, half),
        _ => Vec3::new(edge, y, -half),
    }
}

fn plane_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.random_range(-1.0..=1.0),
        rng.random_range(-0.02..=0.02),
        rng.random_range(-1.0..=1.0),
    )
}

fn cloud_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // Sum of uniforms approximates a gaussian blob
    let mut axis = || -> f32 { (0..3).map(|_| rng.random_range(-1.0f32..=1.0)).sum::<f32>() / 3.0 };
    let p = Vec3::new(axis(), axis() * 0.7, axis());
    p.clamp(Vec3::splat(-1.0), Vec3::splat(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for kind in PrimitiveKind::ALL {
            assert_eq!(generate(kind, 250, &mut rng).len(), 250, "{}", kind.name());
        }
    }

    #[test]
    fn points_stay_in_unit_cube() {
        let mut rng = StdRng::seed_from_u64(2);
        for kind in PrimitiveKind::ALL {
            for p in generate(kind, 500, &mut rng) {
                assert!(p.abs().max_element() <= 1.0 + 1e-5, "{} produced {:?}", kind.name(), p);
            }
        }
    }

    #[test]
    fn same_seed_same_points() {
        let a = generate(PrimitiveKind::Torus, 64, &mut StdRng::seed_from_u64(9));
        let b = generate(PrimitiveKind::Torus, 64, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn tags_map_with_aliases_and_fallback() {
        assert_eq!(PrimitiveKind::from_tag("Tree"), PrimitiveKind::Cone);
        assert_eq!(PrimitiveKind::from_tag(" box "), PrimitiveKind::Cube);
        assert_eq!(PrimitiveKind::from_tag("rock"), PrimitiveKind::Cloud);
        assert_eq!(PrimitiveKind::from_tag("spaceship"), PrimitiveKind::Sphere);
        assert_eq!(PrimitiveKind::from_tag(""), PrimitiveKind::Sphere);
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate(PrimitiveKind::Cube, 0, &mut rng).is_empty());
    }
}
