/// Linear RGB triple in [0, 1]
pub type Rgb = [f32; 3];

/// Neutral gray used when a scene graph color does not parse
pub const DEFAULT_OBJECT_COLOR: Rgb = [0.8, 0.8, 0.8];

/// Parse `#rrggbb`, `rrggbb` or `#rgb`
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);

    match digits.len() {
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        3 => {
            let expand = |i: usize| {
                let c = &digits[i..i + 1];
                channel(&format!("{c}{c}"))
            };
            Some([expand(0)?, expand(1)?, expand(2)?])
        }
        _ => None,
    }
}

pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_six_digit_hex() {
        let rgb = parse_hex_color("#ff8000").unwrap();
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!((rgb[1] - 0.5).abs() < 0.01);
        assert!(rgb[2].abs() < 0.01);
    }

    #[test]
    fn parse_short_hex() {
        let rgb = parse_hex_color("#fff").unwrap();
        assert_eq!(rgb, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_hex_color("purple").is_none());
        assert!(parse_hex_color("#12345").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
    }

    #[test]
    fn lerp_midpoint() {
        let mid = lerp_rgb([0.0, 0.0, 0.0], [1.0, 0.5, 0.0], 0.5);
        assert_eq!(mid, [0.5, 0.25, 0.0]);
    }
}
