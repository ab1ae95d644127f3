//! Where asset-backed objects get their raw points.

use futures::future::{BoxFuture, FutureExt};
use glam::Vec3;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::gltf::load_gltf_points;
use crate::error::{SceneError, SceneResult};

/// Asynchronous point-cloud fetcher keyed by an asset location string
pub trait AssetSource {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, SceneResult<Vec<Vec3>>>;
}

/// Assets held in memory, for tests and built-in scenes
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    clouds: HashMap<String, Vec<Vec3>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, points: Vec<Vec3>) {
        self.clouds.insert(location.into(), points);
    }
}

impl AssetSource for MemoryAssets {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, SceneResult<Vec<Vec3>>> {
        let result = self
            .clouds
            .get(location)
            .cloned()
            .ok_or_else(|| SceneError::MissingAsset(location.to_string()));
        futures::future::ready(result).boxed()
    }
}

/// Assets on disk under a root directory.
///
/// `.gltf`/`.glb` files are read through the glTF loader; `.xyz` files are
/// whitespace-separated `x y z` lines with extra columns ignored.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn load(&self, location: &str) -> SceneResult<Vec<Vec3>> {
        let path = self.root.join(location);
        if !path.is_file() {
            return Err(SceneError::MissingAsset(path.display().to_string()));
        }

        match extension(&path).as_deref() {
            Some("gltf") | Some("glb") => load_gltf_points(&path),
            Some("xyz") => parse_xyz(&std::fs::read_to_string(&path)?),
            _ => Err(SceneError::MissingAsset(format!(
                "{} (unsupported format)",
                path.display()
            ))),
        }
    }
}

impl AssetSource for DirectoryAssets {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, SceneResult<Vec<Vec3>>> {
        async move { self.load(location) }.boxed()
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Parse an ASCII xyz cloud; blank lines, `#` comments and malformed rows are skipped
pub fn parse_xyz(text: &str) -> SceneResult<Vec<Vec3>> {
    let points = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace().map(|f| f.parse::<f32>());
            match (fields.next(), fields.next(), fields.next()) {
                (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) => Some(Vec3::new(x, y, z)),
                _ => None,
            }
        })
        .filter(|p| p.is_finite())
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xyz_skips_noise() {
        let points = parse_xyz("# header\n1 2 3\n\n4 5 6 255 0 0\nbad row\n7 8\n").unwrap();
        assert_eq!(points, vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
    }

    #[test]
    fn memory_source_reports_missing() {
        let assets = MemoryAssets::new();
        let result = pollster::block_on(assets.fetch("nope"));
        assert!(matches!(result, Err(SceneError::MissingAsset(_))));
    }

    #[test]
    fn directory_source_missing_file() {
        let assets = DirectoryAssets::new(std::env::temp_dir());
        let result = pollster::block_on(assets.fetch("dreamfield-missing-asset.xyz"));
        assert!(matches!(result, Err(SceneError::MissingAsset(_))));
    }
}
