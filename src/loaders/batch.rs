//! Generation-tagged batches of asset loads.
//!
//! The simulator hands out a `PendingLoads` every time it replaces its
//! object set. The batch carries the generation it was created for, so a
//! batch that finishes after another replacement is recognised as stale and
//! dropped on commit.

use futures::future::join_all;
use glam::Vec3;

use super::asset_source::AssetSource;
use crate::error::{SceneError, SceneResult};
use crate::math::AABB;
use crate::scene::ObjectSpec;

/// An asset-backed object waiting for its points
#[derive(Debug, Clone)]
pub struct AssetRequest {
    pub spec: ObjectSpec,
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct PendingLoads {
    generation: u64,
    requests: Vec<AssetRequest>,
}

impl PendingLoads {
    pub(crate) fn new(generation: u64, requests: Vec<AssetRequest>) -> Self {
        Self { generation, requests }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[derive(Debug)]
pub struct LoadedAsset {
    pub spec: ObjectSpec,
    /// Fitted local-space points, or why the object was dropped
    pub points: SceneResult<Vec<Vec3>>,
}

#[derive(Debug)]
pub struct LoadedAssets {
    generation: u64,
    results: Vec<LoadedAsset>,
}

impl LoadedAssets {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<LoadedAsset> {
        self.results
    }
}

/// Fetch every asset in the batch concurrently and fit each cloud to its
/// object's point count
pub async fn load_pending(pending: PendingLoads, source: &dyn AssetSource) -> LoadedAssets {
    let PendingLoads { generation, requests } = pending;

    let fetches = requests.iter().map(|request| source.fetch(&request.location));
    let fetched = join_all(fetches).await;

    let results = requests
        .into_iter()
        .zip(fetched)
        .map(|(request, points)| {
            let points = points.and_then(|points| {
                fit_point_cloud(&points, request.spec.point_count, &request.spec.id)
            });
            if let Err(e) = &points {
                log::warn!("failed to load '{}' from {}: {}", request.spec.id, request.location, e);
            }
            LoadedAsset {
                spec: request.spec,
                points,
            }
        })
        .collect();

    LoadedAssets { generation, results }
}

/// Center a cloud on the origin, scale its largest extent to 2 and pick
/// `target` points spread evenly through it
pub fn fit_point_cloud(points: &[Vec3], target: usize, id: &str) -> SceneResult<Vec<Vec3>> {
    let bounds = AABB::from_points(points).ok_or_else(|| SceneError::EmptyGeometry(id.to_string()))?;
    if target == 0 {
        return Err(SceneError::EmptyGeometry(id.to_string()));
    }

    let center = bounds.center();
    let extent = bounds.max_extent();
    let scale = if extent > f32::EPSILON { 2.0 / extent } else { 1.0 };

    let step = points.len() as f64 / target as f64;
    let fitted = (0..target)
        .map(|i| {
            let index = ((i as f64 * step) as usize).min(points.len() - 1);
            (points[index] - center) * scale
        })
        .collect();

    Ok(fitted)
}
