pub mod asset_source;
pub mod batch;
pub mod gltf;

pub use asset_source::{parse_xyz, AssetSource, DirectoryAssets, MemoryAssets};
pub use batch::{fit_point_cloud, load_pending, AssetRequest, LoadedAsset, LoadedAssets, PendingLoads};
pub use gltf::load_gltf_points;
