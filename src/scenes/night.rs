use crate::scene::{EnvironmentSpec, ObjectSpec, SceneGraph};

pub fn create_night_scene() -> SceneGraph {
    let objects = vec![
        ObjectSpec::new("moon", "sphere")
            .with_position([4.0, 6.0, -30.0])
            .with_color("#f0f0d8")
            .with_point_count(2500),
        ObjectSpec::new("ring", "torus")
            .with_position([0.0, 2.0, -12.0])
            .with_color("#b48cff")
            .with_point_count(2000),
        ObjectSpec::new("mist", "cloud")
            .with_position([-5.0, 3.0, -18.0])
            .with_color("#6f7a99")
            .with_point_count(1800),
    ];

    SceneGraph {
        objects,
        environment: Some(EnvironmentSpec::new("starlit night", "#0b1026", "#1c2233")),
    }
}
