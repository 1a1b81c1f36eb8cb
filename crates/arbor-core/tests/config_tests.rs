// Host-side tests for configuration validation.

use std::time::Duration;

use arbor_core::{
    ConfigError, FrameInput, OrnamentGroup, OrnamentKind, PointerState, ProfileTable, Scene,
    SceneConfig, TargetVolume, TypeProfile,
};
use glam::Vec3;

#[test]
fn default_config_is_valid() {
    assert_eq!(SceneConfig::default().validate(), Ok(()));
}

#[test]
fn default_profiles_are_stable() {
    let table = ProfileTable::default();
    for kind in OrnamentKind::ALL {
        let p = table.get(kind).expect("every kind has a default profile");
        assert!(p.damping > 0.0 && p.damping < 1.0, "{kind:?} damping");
        assert!(p.speed > 0.0, "{kind:?} speed");
        assert!(p.repulsion_weight >= 0.0, "{kind:?} repulsion weight");
    }
}

fn with_damping(value: f32) -> SceneConfig {
    let mut cfg = SceneConfig::default();
    cfg.profiles.set(
        OrnamentKind::Bell,
        TypeProfile {
            damping: value,
            ..TypeProfile::default_for(OrnamentKind::Bell)
        },
    );
    cfg
}

#[test]
fn damping_outside_open_unit_interval_is_rejected() {
    for value in [0.0, 1.0, -0.5, 1.2, f32::NAN] {
        let err = with_damping(value).validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::DampingOutOfRange { kind: OrnamentKind::Bell, .. }),
            "damping {value} gave {err:?}"
        );
    }
    assert!(with_damping(0.999).validate().is_ok());
}

#[test]
fn non_positive_speed_is_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.profiles.set(
        OrnamentKind::Star,
        TypeProfile {
            speed: 0.0,
            ..TypeProfile::default_for(OrnamentKind::Star)
        },
    );
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonPositiveSpeed { kind: OrnamentKind::Star, .. })
    ));
}

#[test]
fn scene_refuses_invalid_config() {
    assert!(Scene::new(with_damping(1.0)).is_err());
}

#[test]
fn non_positive_radii_are_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.repulsion.radius = 0.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonPositive { name: "repulsion.radius", .. })
    ));

    let mut cfg = SceneConfig::default();
    cfg.layout.chaos_radius = -3.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonPositive { name: "chaos_radius", .. })
    ));

    let mut cfg = SceneConfig::default();
    cfg.layout.cone_height = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn inverted_hysteresis_is_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.hysteresis.enter_chaos = 0.1;
    cfg.hysteresis.enter_formed = 0.2;
    assert!(matches!(cfg.validate(), Err(ConfigError::Hysteresis { .. })));
}

#[test]
fn linear_or_steeper_taper_is_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.layout.taper_exponent = 1.0;
    assert_eq!(cfg.validate(), Err(ConfigError::TaperExponent(1.0)));
}

#[test]
fn ornament_group_needs_profile_and_palette() {
    let mut cfg = SceneConfig::default();
    cfg.profiles = ProfileTable::empty();
    assert_eq!(cfg.validate(), Err(ConfigError::MissingProfile(OrnamentKind::Ball)));

    let mut cfg = SceneConfig::default();
    let mut group = OrnamentGroup::new(OrnamentKind::Gift, 3);
    group.palette.clear();
    cfg.ornaments = vec![group];
    assert_eq!(cfg.validate(), Err(ConfigError::EmptyPalette(OrnamentKind::Gift)));
}

#[test]
fn shell_fraction_must_be_unit() {
    let mut cfg = SceneConfig::default();
    let mut group = OrnamentGroup::new(OrnamentKind::Ball, 3);
    group.volume = TargetVolume::Shell { inner: 1.5 };
    cfg.ornaments = vec![group];
    assert!(matches!(cfg.validate(), Err(ConfigError::UnitRange { .. })));
}

#[test]
fn zero_counts_are_valid() {
    let mut cfg = SceneConfig::default();
    cfg.foliage.count = 0;
    cfg.frames.count = 0;
    cfg.ornaments.iter_mut().for_each(|g| g.count = 0);
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn oversize_population_is_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.foliage.count = usize::MAX;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::PopulationTooLarge { name: "foliage", .. })
    ));
}

fn assert_non_finite_rejected(cfg: SceneConfig, field: &str) {
    let err = cfg.validate().unwrap_err();
    assert!(
        matches!(err, ConfigError::NonFinite { name, .. } if name == field),
        "{field} gave {err:?}"
    );
    assert!(Scene::new(cfg).is_err(), "{field} built a scene");
}

#[test]
fn non_finite_settings_are_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.layout.spiral_turns = f32::NAN;
    assert_non_finite_rejected(cfg, "spiral_turns");

    let mut cfg = SceneConfig::default();
    cfg.layout.base_y = f32::INFINITY;
    assert_non_finite_rejected(cfg, "base_y");

    let mut cfg = SceneConfig::default();
    cfg.focus.chaos_pan_angle = f32::INFINITY;
    assert_non_finite_rejected(cfg, "focus.chaos_pan_angle");

    let mut cfg = SceneConfig::default();
    cfg.frames.sway_amplitude = f32::NAN;
    assert_non_finite_rejected(cfg, "frames.sway_amplitude");

    let mut cfg = SceneConfig::default();
    cfg.frames.sway_speed = f32::NAN;
    assert_non_finite_rejected(cfg, "frames.sway_speed");

    let mut cfg = SceneConfig::default();
    cfg.frames.tilt_amplitude = f32::INFINITY;
    assert_non_finite_rejected(cfg, "frames.tilt_amplitude");

    let mut cfg = SceneConfig::default();
    cfg.twinkle.base = f32::NAN;
    assert_non_finite_rejected(cfg, "twinkle.base");

    let mut cfg = SceneConfig::default();
    cfg.twinkle.amplitude = f32::NEG_INFINITY;
    assert_non_finite_rejected(cfg, "twinkle.amplitude");

    let mut cfg = SceneConfig::default();
    cfg.foliage.breath_amplitude = f32::NAN;
    assert_non_finite_rejected(cfg, "foliage.breath_amplitude");

    let mut cfg = SceneConfig::default();
    cfg.foliage.repulsion_weight = f32::INFINITY;
    assert_non_finite_rejected(cfg, "foliage.repulsion_weight");
}

#[test]
fn negative_amplitudes_are_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.frames.sway_amplitude = -0.1;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::Negative { name: "frames.sway_amplitude", .. })
    ));

    let mut cfg = SceneConfig::default();
    cfg.twinkle.amplitude = -1.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::Negative { name: "twinkle.amplitude", .. })
    ));
}

#[test]
fn non_finite_colors_and_camera_are_rejected() {
    let mut cfg = SceneConfig::default();
    cfg.ornaments[0].palette[0] = Vec3::new(1.0, f32::NAN, 0.0);
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonFinite { name: "ornament.palette", .. })
    ));

    let mut cfg = SceneConfig::default();
    cfg.camera.eye = Vec3::splat(f32::INFINITY);
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.camera.target = cfg.camera.eye;
    assert!(cfg.validate().is_err());
}

#[test]
fn validated_scene_keeps_frames_finite() {
    let mut cfg = SceneConfig::default();
    cfg.foliage.count = 0;
    let mut scene = Scene::new(cfg).unwrap();
    let mut events = Vec::new();
    let input = FrameInput {
        pointer: PointerState::at(0.3, 0.7),
        mode_signal: None,
    };
    for _ in 0..120 {
        scene.tick(Duration::from_millis(16), &input, &mut events);
    }
    for pose in scene.frame_poses() {
        assert!(pose.position.is_finite() && pose.rotation.is_finite());
        assert!(pose.scale.is_finite());
    }
    for item in scene.ornaments() {
        assert!(item.target_position.is_finite() && item.position().is_finite());
    }
}
