mod aabb;
mod angle;
mod color;
mod screen;

pub use aabb::AABB;
pub use angle::{smoothstep, wrap_angle};
pub use color::{lerp_rgb, parse_hex_color, Rgb, DEFAULT_OBJECT_COLOR};
pub use screen::{normalized_to_ndc, ndc_distance};
