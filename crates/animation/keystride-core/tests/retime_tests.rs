use keystride_core::{
    data::{Animation, Channel, Handle, HandleMode, Interpolation, Keyframe},
    host::{AnimationHost, Scene},
    load_scene, parse_scene_json, retime, save_scene, Preset, RetimeConfig, RetimeError, Settings,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn hip_sway() -> Scene {
    let json = keystride_test_fixtures::scenes::json("hip-sway").expect("load hip-sway fixture");
    parse_scene_json(&json).expect("parse hip-sway scene")
}

fn times(ch: &Channel) -> Vec<f64> {
    ch.keyframes.iter().map(|k| k.time).collect()
}

fn cfg(start: f64, spacing: f64, frame_rate: u32) -> RetimeConfig {
    RetimeConfig {
        start,
        spacing,
        frame_rate,
    }
}

#[test]
fn unordered_duplicate_times_become_progression() {
    let keys = [0.3, 5.0, 5.0, 2.1]
        .iter()
        .enumerate()
        .map(|(i, &t)| Keyframe::new(t, i as f64 * 10.0))
        .collect();
    let mut scene = Scene::with_animation(
        "Armature",
        Animation::new("clip", vec![Channel::new("location", 0, keys)]),
    );

    let report = retime(&mut scene, &cfg(1.0, 0.5, 15)).expect("retime");

    let ch = &scene.animation().unwrap().channels[0];
    assert_eq!(times(ch), vec![1.0, 1.5, 2.0, 2.5]);
    let values: Vec<f64> = ch.keyframes.iter().map(|k| k.value).collect();
    assert_eq!(values, vec![0.0, 10.0, 20.0, 30.0]);
    assert_eq!(report.channels_processed, 1);
    assert_eq!(report.keyframes_processed, 4);
}

#[test]
fn fixture_channels_retimed_independently() {
    let mut scene = hip_sway();
    let report = retime(&mut scene, &Settings::preset(Preset::Kh2).retime_config()).unwrap();

    let anim = scene.animation().unwrap();
    assert_eq!(times(&anim.channels[0]), vec![1.0, 1.5, 2.0, 2.5]);
    assert_eq!(times(&anim.channels[1]), vec![1.0, 1.5]);
    assert!(anim.channels[2].keyframes.is_empty());
    assert_eq!(times(&anim.channels[3]), vec![1.0, 1.5, 2.0]);

    // Channel order and identity preserved.
    assert_eq!(anim.channels[3].data_path, "pose.bones[\"Spine\"].rotation_euler");
    assert_eq!(anim.channels[1].array_index, 1);

    assert_eq!(report.channels_processed, 4);
    assert_eq!(report.keyframes_processed, 9);
    assert_eq!(report.frame_rate, 15);
    assert_eq!(report.message(), "Keyframes redistributed. FPS = 15");
    assert_eq!(scene.frame_rate(), 15);
}

#[test]
fn every_key_normalized_to_vector_bezier() {
    let mut scene = hip_sway();
    retime(&mut scene, &cfg(1.0, 2.0, 60)).unwrap();

    for ch in &scene.animation().unwrap().channels {
        for k in &ch.keyframes {
            assert_eq!(k.interpolation, Interpolation::Bezier);
            assert_eq!(k.left_handle_mode, HandleMode::Vector);
            assert_eq!(k.right_handle_mode, HandleMode::Vector);
            assert_eq!(k.left_handle.time, k.time);
            assert_eq!(k.right_handle.time, k.time);
        }
    }
}

#[test]
fn handle_values_and_key_values_untouched() {
    let mut scene = hip_sway();
    let before = scene.animation().unwrap().clone();
    retime(&mut scene, &cfg(1.0, 0.5, 15)).unwrap();
    let after = scene.animation().unwrap();

    for (b, a) in before.channels.iter().zip(&after.channels) {
        for (kb, ka) in b.keyframes.iter().zip(&a.keyframes) {
            assert_eq!(kb.value, ka.value);
            assert_eq!(kb.left_handle.value, ka.left_handle.value);
            assert_eq!(kb.right_handle.value, ka.right_handle.value);
        }
    }
    assert_eq!(after.channels[0].keyframes[3].left_handle, Handle::new(2.5, 0.25));
}

#[test]
fn times_match_progression_for_various_grids() {
    for &(start, spacing) in &[(0.0, 1.0), (1.0, 0.5), (-4.0, 0.25), (100.0, 3.0), (1.0, 2.0)] {
        let mut scene = hip_sway();
        retime(&mut scene, &cfg(start, spacing, 24)).unwrap();
        for ch in &scene.animation().unwrap().channels {
            for (i, k) in ch.keyframes.iter().enumerate() {
                approx(k.time, start + i as f64 * spacing, 1e-12);
            }
            for w in ch.keyframes.windows(2) {
                approx(w[1].time - w[0].time, spacing, 1e-12);
            }
        }
    }
}

#[test]
fn retime_is_idempotent() {
    let config = cfg(1.0, 0.5, 15);
    let mut once = hip_sway();
    retime(&mut once, &config).unwrap();
    let mut twice = once.clone();
    retime(&mut twice, &config).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn frame_rate_overwritten_every_call() {
    let mut scene = hip_sway();
    assert_eq!(scene.frame_rate(), 24);
    retime(&mut scene, &cfg(1.0, 0.5, 15)).unwrap();
    assert_eq!(scene.frame_rate(), 15);
    retime(&mut scene, &cfg(1.0, 0.5, 60)).unwrap();
    assert_eq!(scene.frame_rate(), 60);
}

#[test]
fn zero_channels_succeeds_and_sets_frame_rate() {
    let json = keystride_test_fixtures::scenes::json("empty-action").unwrap();
    let mut scene = parse_scene_json(&json).unwrap();
    let report = retime(&mut scene, &cfg(1.0, 0.5, 15)).unwrap();
    assert_eq!(report.channels_processed, 0);
    assert_eq!(report.keyframes_processed, 0);
    assert_eq!(scene.frame_rate(), 15);
}

#[test]
fn missing_animation_leaves_scene_untouched() {
    let json = keystride_test_fixtures::scenes::json("unanimated").unwrap();
    let mut scene = parse_scene_json(&json).unwrap();
    let before = scene.clone();

    let err = retime(&mut scene, &cfg(1.0, 0.5, 15)).unwrap_err();
    assert_eq!(err, RetimeError::NoAnimation);
    assert_eq!(err.to_string(), "No animated object found");
    assert_eq!(scene, before);
    assert_eq!(scene.frame_rate(), 30);
}

#[test]
fn empty_scene_has_no_animation() {
    let mut scene = Scene::default();
    assert_eq!(
        retime(&mut scene, &RetimeConfig::default()),
        Err(RetimeError::NoAnimation)
    );
}

#[test]
fn invalid_config_leaves_scene_untouched() {
    let mut scene = hip_sway();
    let before = scene.clone();
    for bad in [cfg(1.0, 0.0, 15), cfg(1.0, -0.5, 15), cfg(1.0, 0.5, 0)] {
        let err = retime(&mut scene, &bad).unwrap_err();
        assert!(matches!(err, RetimeError::InvalidConfig { .. }), "{err:?}");
        assert_eq!(scene, before);
    }
}

#[test]
fn overflowing_grid_rejected_and_scene_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = hip_sway();
    let before = scene.clone();

    // Four keys at spacing 1e308 would place the last one at infinity.
    let err = retime(&mut scene, &cfg(1.0, 1e308, 15)).unwrap_err();
    assert!(matches!(err, RetimeError::InvalidConfig { .. }), "{err:?}");
    assert_eq!(scene, before);
    assert_eq!(scene.frame_rate(), 24);

    let path = dir.path().join("scene.json");
    save_scene(&scene, &path).unwrap();
    assert_eq!(load_scene(&path).unwrap(), before);
}

#[test]
fn large_spacing_fine_for_short_channels() {
    let mut scene = Scene::with_animation(
        "Armature",
        Animation::new(
            "clip",
            vec![Channel::new("location", 0, vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)])],
        ),
    );
    retime(&mut scene, &cfg(0.0, 1e308, 15)).unwrap();
    assert_eq!(times(&scene.animation().unwrap().channels[0]), vec![0.0, 1e308]);
}
