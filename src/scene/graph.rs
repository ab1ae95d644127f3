//! Structured scene description handed over by the prompt parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::primitives::PrimitiveKind;
use crate::error::SceneResult;
use crate::math::{parse_hex_color, Rgb, DEFAULT_OBJECT_COLOR};

pub const DEFAULT_POINT_COUNT: usize = 2000;
/// Prefix on a type tag that names an external point-cloud asset
pub const ASSET_TAG_PREFIX: &str = "asset:";

const DEFAULT_SKY_COLOR: Rgb = [0.05, 0.07, 0.15];
const DEFAULT_TERRAIN_COLOR: Rgb = [0.2, 0.25, 0.2];

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_point_count() -> usize {
    DEFAULT_POINT_COUNT
}

/// Where an object's points come from
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Primitive(PrimitiveKind),
    Asset(String),
}

/// One object as described by the scene parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Hex color such as `#88ccff`
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_point_count")]
    pub point_count: usize,
    /// External point-cloud location, overrides `kind`
    #[serde(default)]
    pub asset: Option<String>,
}

impl ObjectSpec {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: String::new(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
            color: String::new(),
            point_count: DEFAULT_POINT_COUNT,
            asset: None,
        }
    }

    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_asset(mut self, location: impl Into<String>) -> Self {
        self.asset = Some(location.into());
        self
    }

    pub fn geometry(&self) -> Geometry {
        if let Some(location) = &self.asset {
            return Geometry::Asset(location.clone());
        }
        match self.kind.strip_prefix(ASSET_TAG_PREFIX) {
            Some(location) => Geometry::Asset(location.trim().to_string()),
            None => Geometry::Primitive(PrimitiveKind::from_tag(&self.kind)),
        }
    }

    pub fn base_color(&self) -> Rgb {
        parse_hex_color(&self.color).unwrap_or(DEFAULT_OBJECT_COLOR)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Ambience and base colors for sky and terrain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    #[serde(default)]
    pub ambience: String,
    #[serde(default)]
    pub sky_color: String,
    #[serde(default)]
    pub terrain_color: String,
}

impl EnvironmentSpec {
    pub fn new(ambience: &str, sky_color: &str, terrain_color: &str) -> Self {
        Self {
            ambience: ambience.to_string(),
            sky_color: sky_color.to_string(),
            terrain_color: terrain_color.to_string(),
        }
    }

    pub fn sky(&self) -> Rgb {
        parse_hex_color(&self.sky_color).unwrap_or(DEFAULT_SKY_COLOR)
    }

    pub fn terrain(&self) -> Rgb {
        parse_hex_color(&self.terrain_color).unwrap_or(DEFAULT_TERRAIN_COLOR)
    }
}

/// Full parser output for one prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub environment: Option<EnvironmentSpec>,
}

impl SceneGraph {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
