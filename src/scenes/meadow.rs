use crate::scene::{EnvironmentSpec, ObjectSpec, SceneGraph};

/// Trees scattered over a field with a couple of boulders
pub fn create_meadow_scene() -> SceneGraph {
    let mut objects = Vec::new();

    for (i, x) in [-6.0, -3.5, 3.0, 6.5].into_iter().enumerate() {
        let z = -8.0 - (i as f32) * 4.0;
        objects.push(
            ObjectSpec::new(format!("tree-{}", i), "tree")
                .with_position([x, 1.0, z])
                .with_color("#3f8f4a")
                .with_point_count(1500),
        );
    }

    objects.push(
        ObjectSpec::new("boulder", "rock")
            .with_position([0.0, 0.0, -10.0])
            .with_color("#8a8479")
            .with_point_count(1200),
    );
    objects.push(
        ObjectSpec::new("pond", "plane")
            .with_position([-1.5, -0.9, -5.0])
            .with_color("#5fa8d3")
            .with_point_count(800),
    );

    SceneGraph {
        objects,
        environment: Some(EnvironmentSpec::new("bright meadow", "#87b5e0", "#4a7a3a")),
    }
}
