mod meadow;
mod night;
mod ruins;

pub use meadow::create_meadow_scene;
pub use night::create_night_scene;
pub use ruins::create_ruins_scene;

use crate::scene::SceneGraph;

pub const SCENE_NAMES: [&str; 3] = ["meadow", "night", "ruins"];

/// Built-in scene by name; `None` for unknown names
pub fn create_scene(name: &str) -> Option<SceneGraph> {
    match name {
        "meadow" => Some(create_meadow_scene()),
        "night" => Some(create_night_scene()),
        "ruins" => Some(create_ruins_scene()),
        _ => None,
    }
}
