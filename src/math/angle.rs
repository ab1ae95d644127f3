use std::f32::consts::{PI, TAU};

/// Wrap an angle in radians into (-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Hermite ease on [0, 1], input clamped
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_keeps_small_angles() {
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn wrap_angle_folds_across_seam() {
        // Just past +PI wraps to just past -PI
        let a = wrap_angle(PI + 0.1);
        assert!((a - (-PI + 0.1)).abs() < 1e-5);

        let b = wrap_angle(-PI - 0.1);
        assert!((b - (PI - 0.1)).abs() < 1e-5);
    }

    #[test]
    fn wrap_angle_minus_pi_maps_to_pi() {
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(PI) - PI).abs() < 1e-5);
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
    }
}
