// Host-side tests for the bounded orbit rig.

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
use viewer_core::{
    CameraControls, ConfigError, OrbitConfig, OrbitControls, PerspectiveCamera, Spherical,
    CAMERA_TARGET,
};

fn spherical(camera: &PerspectiveCamera) -> Spherical {
    Spherical::from_offset(camera.eye - CAMERA_TARGET)
}

fn undamped() -> OrbitControls {
    OrbitControls::new(OrbitConfig {
        enable_damping: false,
        ..OrbitConfig::default()
    })
    .unwrap()
}

#[test]
fn default_config_is_valid() {
    assert!(OrbitConfig::default().validate().is_ok());
    let controls = OrbitControls::new(OrbitConfig::default()).unwrap();
    assert!(controls.enabled());
    assert!(!controls.is_rotating());
}

#[test]
fn inverted_range_is_rejected() {
    let cfg = OrbitConfig {
        min_distance: 5.0,
        max_distance: 1.0,
        ..OrbitConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::InvertedRange {
            name: "distance",
            min: 5.0,
            max: 1.0
        })
    );
    assert!(OrbitControls::new(cfg).is_err());
}

#[test]
fn out_of_range_values_are_rejected() {
    let zero_damping = OrbitConfig {
        damping_factor: 0.0,
        ..OrbitConfig::default()
    };
    assert!(matches!(
        zero_damping.validate(),
        Err(ConfigError::OutOfRange {
            name: "damping_factor",
            ..
        })
    ));

    let past_pole = OrbitConfig {
        max_polar: 4.0,
        ..OrbitConfig::default()
    };
    assert!(matches!(
        past_pole.validate(),
        Err(ConfigError::OutOfRange { name: "polar", .. })
    ));
}

#[test]
fn first_update_pulls_camera_into_bounds() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::new(OrbitConfig::default()).unwrap();
    assert!(controls.update(&mut camera));

    let s = spherical(&camera);
    assert!((s.radius - 3.6).abs() < 1e-4);
    assert!((s.polar - 1.5).abs() < 1e-4);
    assert!(s.azimuth.abs() < 1e-4);
    assert_eq!(camera.target, CAMERA_TARGET);

    // already inside the window, so nothing moves
    assert!(!controls.update(&mut camera));
}

#[test]
fn horizontal_drag_turns_by_a_fraction_of_a_turn() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = undamped();
    controls.update(&mut camera);

    controls.begin_rotate(Vec2::new(400.0, 300.0));
    assert!(controls.is_rotating());
    // 30 of 600 px is a twentieth of a turn, to the left
    controls.rotate_to(Vec2::new(370.0, 300.0), 600.0);
    controls.update(&mut camera);
    assert!((spherical(&camera).azimuth - TAU / 20.0).abs() < 1e-4);

    controls.end_rotate();
    assert!(!controls.is_rotating());
}

#[test]
fn long_drags_stay_inside_the_window() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::new(OrbitConfig::default()).unwrap();
    controls.begin_rotate(Vec2::ZERO);
    controls.rotate_to(Vec2::new(9000.0, -9000.0), 600.0);
    for _ in 0..300 {
        controls.update(&mut camera);
        let s = spherical(&camera);
        assert!(s.azimuth >= -FRAC_PI_4 - 1e-4 && s.azimuth <= FRAC_PI_4 + 1e-4);
        assert!(s.polar >= 1.3 - 1e-4 && s.polar <= 1.5 + 1e-4);
        assert!(s.radius >= 2.0 - 1e-4 && s.radius <= 3.6 + 1e-4);
    }
    let s = spherical(&camera);
    assert!((s.azimuth + FRAC_PI_4).abs() < 1e-3);
}

#[test]
fn damping_spreads_a_drag_over_frames() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::new(OrbitConfig::default()).unwrap();
    controls.update(&mut camera);

    controls.begin_rotate(Vec2::ZERO);
    controls.rotate_to(Vec2::new(-30.0, 0.0), 600.0);
    controls.update(&mut camera);
    let first = spherical(&camera).azimuth;
    assert!((first - TAU / 20.0 * 0.05).abs() < 1e-4);

    for _ in 0..500 {
        controls.update(&mut camera);
    }
    assert!((spherical(&camera).azimuth - TAU / 20.0).abs() < 1e-3);
}

#[test]
fn wheel_dollies_within_distance_limits() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::new(OrbitConfig::default()).unwrap();
    controls.update(&mut camera);

    controls.dolly(-120.0);
    controls.update(&mut camera);
    assert!((spherical(&camera).radius - 3.6 * 0.95).abs() < 1e-4);

    for _ in 0..100 {
        controls.dolly(-1.0);
        controls.update(&mut camera);
    }
    assert!((spherical(&camera).radius - 2.0).abs() < 1e-4);

    for _ in 0..100 {
        controls.dolly(1.0);
        controls.update(&mut camera);
    }
    assert!((spherical(&camera).radius - 3.6).abs() < 1e-4);
}

#[test]
fn disabled_rig_ignores_input() {
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::new(OrbitConfig::default()).unwrap();
    controls.update(&mut camera);
    let eye = camera.eye;

    controls.begin_rotate(Vec2::ZERO);
    controls.set_enabled(false);
    assert!(!controls.enabled());
    assert!(!controls.is_rotating());

    controls.begin_rotate(Vec2::ZERO);
    controls.rotate_to(Vec2::new(200.0, 50.0), 600.0);
    controls.dolly(-10.0);
    for _ in 0..10 {
        controls.update(&mut camera);
    }
    assert!(camera.eye.distance(eye) < 1e-5);

    controls.set_enabled(true);
    controls.dolly(-10.0);
    controls.update(&mut camera);
    assert!(camera.eye.distance(eye) > 0.1);
}

#[test]
fn spherical_matches_axis_conventions() {
    let s = Spherical::from_offset(Vec3::new(0.0, 0.0, 2.0));
    assert!((s.radius - 2.0).abs() < 1e-6);
    assert!((s.polar - FRAC_PI_2).abs() < 1e-6);
    assert!(s.azimuth.abs() < 1e-6);

    let s = Spherical::from_offset(Vec3::new(3.0, 0.0, 0.0));
    assert!((s.azimuth - FRAC_PI_2).abs() < 1e-6);

    let back = Spherical {
        radius: 2.5,
        polar: 1.4,
        azimuth: -0.3,
    }
    .to_offset();
    let again = Spherical::from_offset(back);
    assert!((again.radius - 2.5).abs() < 1e-5);
    assert!((again.polar - 1.4).abs() < 1e-5);
    assert!((again.azimuth + 0.3).abs() < 1e-5);
}
