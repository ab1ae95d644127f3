pub mod camera_rig;
pub mod command;
pub mod environment;
pub mod graph;
pub mod object;
pub mod primitives;
pub mod simulator;

pub use camera_rig::CameraRig;
pub use command::{Manipulation, SceneCommand, SceneControl};
pub use environment::{Environment, EnvironmentPair, Surface, TextureImage};
pub use graph::{EnvironmentSpec, Geometry, ObjectSpec, SceneGraph};
pub use object::{ObjectId, Phase, SceneObject, StepOutcome};
pub use primitives::PrimitiveKind;
pub use simulator::{Simulator, SimulatorStats};
