use crate::scene::{EnvironmentSpec, ObjectSpec, SceneGraph};

/// A colonnade leading up to a pyramid
pub fn create_ruins_scene() -> SceneGraph {
    let mut objects: Vec<ObjectSpec> = (0..6)
        .map(|i| {
            let side = if i % 2 == 0 { -3.0 } else { 3.0 };
            let z = -6.0 - (i / 2) as f32 * 5.0;
            ObjectSpec::new(format!("column-{}", i), "cylinder")
                .with_position([side, 1.0, z])
                .with_color("#d9c9a3")
                .with_point_count(900)
        })
        .collect();

    let mut pyramid = ObjectSpec::new("temple", "pyramid")
        .with_position([0.0, 1.5, -24.0])
        .with_color("#c2a36b")
        .with_point_count(3000);
    pyramid.scale = [3.0, 3.0, 3.0];
    objects.push(pyramid);

    objects.push(
        ObjectSpec::new("altar", "cube")
            .with_position([0.0, 0.0, -14.0])
            .with_color("#9c8f80")
            .with_point_count(1000),
    );

    SceneGraph {
        objects,
        environment: Some(EnvironmentSpec::new("dusty ruins at dusk", "#e0a06a", "#7a6048")),
    }
}
