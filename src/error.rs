//! Error type shared by the loaders, config and renderers.
//!
//! Per-frame simulation never fails; these errors only surface while
//! constructing a scene or presenting a frame.

use std::path::PathBuf;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("glTF error in {path:?}: {source}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("asset '{0}' not found")]
    MissingAsset(String),

    #[error("geometry for '{0}' has no points")]
    EmptyGeometry(String),

    #[error("render target mismatch: {0}")]
    RenderTarget(String),
}

impl SceneError {
    pub fn render_target<T: ToString>(msg: T) -> Self {
        SceneError::RenderTarget(msg.to_string())
    }
}
