use dreamfield::gesture::{Dispatcher, GestureScript, TrackingState};
use dreamfield::render::PointRasterizer;
use dreamfield::scene::camera_rig::{DOLLY_RANGE, MAX_PITCH, MAX_YAW};
use dreamfield::scene::{CameraRig, SceneGraph, Simulator};
use dreamfield::scenes::{create_scene, SCENE_NAMES};
use dreamfield::SimulatorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn run_script(sim: &mut Simulator, script: &GestureScript, frames: usize) -> PointRasterizer {
    let dispatcher = Dispatcher::with_default_actions();
    let mut tracking = TrackingState::default();
    let mut raster = PointRasterizer::new(80, 45);
    for frame in 0..frames {
        dispatcher.process(&mut tracking, &script.sample(frame), sim);
        sim.frame(1.0 / 60.0, &mut raster).unwrap();
    }
    raster
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_builtin_scenes_run_headless() {
        for name in SCENE_NAMES {
            let graph = create_scene(name).unwrap();
            let mut sim = Simulator::new(SimulatorConfig::deterministic(9));
            sim.set_viewport(80, 45);
            let pending = sim.load_scene_graph(&graph);
            assert!(pending.is_empty(), "{} should need no assets", name);

            let raster = run_script(&mut sim, &GestureScript::default(), 120);

            assert!(sim.environment().current().is_some(), "{}", name);
            assert!(raster.points_drawn() > 0, "{} drew nothing", name);
            assert_eq!(sim.stats().frames, 120);
        }
    }

    #[test]
    fn test_scripted_gestures_drive_camera() {
        let script = GestureScript::from_json(
            r#"{ "frames": [
                { "hands": [ { "hand": "right", "gesture": "open-palm", "center": [0.5, 0.5] } ] },
                { "hands": [ { "hand": "right", "gesture": "open-palm", "center": [0.6, 0.5] } ] },
                { "hands": [ { "hand": "right", "gesture": "open-palm", "center": [0.7, 0.5] } ] },
                { "hands": [ { "hand": "right", "gesture": "fist", "center": [0.7, 0.5] } ] },
                { "hands": [ { "hand": "right", "gesture": "fist", "center": [0.7, 0.3] } ] }
            ] }"#,
        )
        .unwrap();

        let mut sim = Simulator::new(SimulatorConfig::deterministic(2));
        run_script(&mut sim, &script, 10);

        assert!(sim.rig().yaw() < 0.0);
        assert!(sim.rig().dolly_offset() > 0.0);
    }

    #[test]
    fn test_scene_graph_json_end_to_end() {
        let graph = SceneGraph::from_json(
            r##"{
                "objects": [
                    { "id": "rock", "type": "rock", "position": [0, 1, 0], "color": "#888888", "point_count": 400 }
                ],
                "environment": { "ambience": "grey dawn", "sky_color": "#b0b8c0", "terrain_color": "#505850" }
            }"##,
        )
        .unwrap();

        let mut sim = Simulator::new(SimulatorConfig {
            materialize_duration: 1.0,
            ..SimulatorConfig::deterministic(4)
        });
        sim.load_scene_graph(&graph);
        run_script(&mut sim, &GestureScript::default(), 90);

        let rock = &sim.objects()[0];
        assert_eq!(rock.target_point_count(), 400);
        assert_eq!(rock.visible_point_count(), 400);
    }
}

#[cfg(test)]
mod camera_rig_tests {
    use super::*;

    #[test]
    fn test_adversarial_input_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut rig = CameraRig::new();

        for _ in 0..5000 {
            let magnitude: f32 = if rng.random_bool(0.1) { 1e6 } else { 1.0 };
            let yaw = rng.random_range(-1.0f32..1.0) * magnitude;
            let pitch = rng.random_range(-1.0f32..1.0) * magnitude;
            let dolly = rng.random_range(-1.0f32..1.0) * magnitude;

            let (before_yaw, before_pitch) = (rig.yaw(), rig.pitch());
            rig.begin_frame();
            rig.orbit(yaw, pitch);
            rig.dolly(dolly);

            assert!(rig.yaw().abs() <= MAX_YAW + 1e-6);
            assert!(rig.pitch().abs() <= MAX_PITCH + 1e-6);
            assert!(rig.dolly_offset() >= DOLLY_RANGE.0 && rig.dolly_offset() <= DOLLY_RANGE.1);
            assert!((rig.yaw() - before_yaw).abs() <= 0.05 + 1e-6);
            assert!((rig.pitch() - before_pitch).abs() <= 0.05 + 1e-6);
            assert!(rig.eye().is_finite());
        }
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut rig = CameraRig::new();
        rig.orbit(0.02, 0.01);
        rig.dolly(0.3);
        let before = rig;

        rig.orbit(f32::NAN, 0.0);
        rig.orbit(0.0, f32::INFINITY);
        rig.dolly(f32::NEG_INFINITY);

        assert_eq!(rig, before);
    }
}
