use keystride_core::{
    data::{Handle, HandleMode, Interpolation},
    load_scene, parse_scene_json, retime, save_scene, scene_to_json, AnimationHost, RetimeConfig,
    Settings,
};

#[test]
fn every_fixture_scene_parses() {
    for key in keystride_test_fixtures::scenes::keys() {
        let json = keystride_test_fixtures::scenes::json(&key).unwrap();
        parse_scene_json(&json).unwrap_or_else(|e| panic!("fixture {key}: {e}"));
    }
}

#[test]
fn parses_hip_sway_with_explicit_handles() {
    let path = keystride_test_fixtures::scenes::path("hip-sway").unwrap();
    let scene = load_scene(&path).expect("load hip-sway");

    assert_eq!(scene.frame_rate, 24);
    assert_eq!(scene.objects.len(), 2);
    let anim = scene.animation().expect("active armature animation");
    assert_eq!(anim.name, "HipSway");
    assert_eq!(anim.channels.len(), 4);

    let hip_x = &anim.channels[0];
    assert_eq!(hip_x.group.as_deref(), Some("Hip"));
    assert_eq!(hip_x.keyframes[1].interpolation, Interpolation::Linear);
    assert_eq!(hip_x.keyframes[2].interpolation, Interpolation::Constant);
    let k3 = &hip_x.keyframes[3];
    assert_eq!(k3.left_handle, Handle::new(1.4, 0.25));
    assert_eq!(k3.right_handle, Handle::new(2.9, 0.75));
    assert_eq!(k3.left_handle_mode, HandleMode::Free);
    assert_eq!(k3.right_handle_mode, HandleMode::Aligned);
}

#[test]
fn retimed_scene_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let json = keystride_test_fixtures::scenes::json("hip-sway").unwrap();
    let mut scene = parse_scene_json(&json).unwrap();
    retime(&mut scene, &RetimeConfig::default()).unwrap();

    let path = dir.path().join("scene.json");
    save_scene(&scene, &path).unwrap();
    let reloaded = load_scene(&path).unwrap();
    assert_eq!(reloaded, scene);
    assert_eq!(parse_scene_json(&scene_to_json(&scene).unwrap()).unwrap(), scene);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_scene(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().starts_with("IO error on"), "{err}");
}

#[test]
fn settings_fixture_loads() {
    let path = keystride_test_fixtures::settings::path("smooth").unwrap();
    let settings = Settings::load(path).unwrap();
    assert_eq!(settings.frame_rate, 60);
    assert_eq!(settings.spacing, 2.0);
    assert_eq!(settings.export_config().output_path.to_str(), Some("smooth.baked.json"));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("settings.json");
    settings.save(&out).unwrap();
    assert_eq!(Settings::load(&out).unwrap(), settings);
}
