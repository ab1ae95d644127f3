pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod gesture;
pub mod loaders;
pub mod math;
pub mod render;
pub mod scene;
pub mod scenes;

pub use config::SimulatorConfig;
pub use error::{SceneError, SceneResult};
pub use scene::Simulator;
