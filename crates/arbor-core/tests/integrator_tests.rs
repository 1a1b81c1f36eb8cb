// Host-side tests for the ornament integrator.

use arbor_core::{
    step, step_population, ColorStyle, GlobalMode, ItemId, OrnamentKind, ProfileTable,
    RepulsionConfig, RepulsionField, RotationStyle, SpatialItem, StepContext, TwinkleConfig,
    TypeProfile,
};
use glam::Vec3;

fn profile(speed: f32, damping: f32) -> TypeProfile {
    TypeProfile {
        speed,
        damping,
        repulsion_weight: 1.0,
        rotation: RotationStyle::Spin { rate: Vec3::ZERO },
        color: ColorStyle::Static,
    }
}

fn ctx(dt: f32, mode: GlobalMode, pointer: Option<Vec3>) -> StepContext {
    StepContext {
        dt,
        elapsed: 0.0,
        mode,
        pointer,
        field: RepulsionField::new(&RepulsionConfig::default()),
        twinkle: TwinkleConfig::default(),
    }
}

fn item(id: u32, kind: OrnamentKind, chaos: Vec3, target: Vec3) -> SpatialItem {
    SpatialItem::new(ItemId(id), kind, chaos, target, 1.0, Vec3::ONE, 0.3)
}

#[test]
fn mixed_profiles_converge_to_target() {
    // A: speed 1, damping 0.9. B: speed 5, damping 0.5.
    let profiles = ProfileTable::empty()
        .with(OrnamentKind::Ball, profile(1.0, 0.9))
        .with(OrnamentKind::Gift, profile(5.0, 0.5));
    let target = Vec3::new(0.0, 10.0, 0.0);
    let mut items = vec![
        item(0, OrnamentKind::Ball, Vec3::ZERO, target),
        item(1, OrnamentKind::Gift, Vec3::ZERO, target),
        item(2, OrnamentKind::Ball, Vec3::ZERO, target),
    ];
    let c = ctx(0.1, GlobalMode::Formed, None);
    let mut poses = Vec::new();
    for _ in 0..200 {
        step_population(&mut items, &profiles, &c, &mut poses);
    }
    assert_eq!(poses.len(), 3);
    for it in &items {
        assert!(
            (it.position().y - 10.0).abs() < 0.01,
            "item {:?} ended at {:?}",
            it.id,
            it.position()
        );
    }
    for pose in &poses {
        assert!((pose.position.y - 10.0).abs() < 0.01);
    }
}

#[test]
fn distance_to_target_shrinks_over_time() {
    let p = profile(2.0, 0.92);
    let chaos = Vec3::new(-8.0, 3.0, 5.0);
    let mut it = item(0, OrnamentKind::Ball, chaos, Vec3::new(1.0, 2.0, 0.5));
    let c = ctx(1.0 / 60.0, GlobalMode::Formed, None);
    let start = it.position().distance(it.target_position);
    for _ in 0..60 {
        step(&mut it, &p, &c);
    }
    let early = it.position().distance(it.target_position);
    for _ in 0..600 {
        step(&mut it, &p, &c);
    }
    let late = it.position().distance(it.target_position);
    assert!(early < start);
    assert!(late < early);
    assert!(late < 1e-3, "still {late} away");
}

#[test]
fn zero_dt_is_a_no_op() {
    let p = profile(2.0, 0.9);
    let mut it = item(0, OrnamentKind::Ball, Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
    // give it some velocity first
    step(&mut it, &p, &ctx(0.1, GlobalMode::Formed, None));
    let (pos, vel, rot) = (it.position(), it.velocity(), it.rotation());
    for dt in [0.0, -1.0, f32::NAN] {
        step(&mut it, &p, &ctx(dt, GlobalMode::Formed, Some(pos)));
        assert_eq!(it.position(), pos);
        assert_eq!(it.velocity(), vel);
        assert_eq!(it.rotation(), rot);
    }
}

#[test]
fn chaos_mode_returns_items_to_chaos_position() {
    let p = profile(2.0, 0.9);
    let chaos = Vec3::new(6.0, -4.0, 2.0);
    let mut it = item(0, OrnamentKind::Ball, chaos, Vec3::new(0.0, 5.0, 0.0));
    let formed = ctx(1.0 / 60.0, GlobalMode::Formed, None);
    for _ in 0..600 {
        step(&mut it, &p, &formed);
    }
    let scatter = ctx(1.0 / 60.0, GlobalMode::Chaos, None);
    for _ in 0..600 {
        step(&mut it, &p, &scatter);
    }
    assert!(it.position().distance(chaos) < 1e-3);
}

#[test]
fn pointer_pushes_resting_item_away() {
    let p = profile(2.0, 0.9);
    let target = Vec3::new(0.0, 0.0, 0.0);
    let mut it = item(0, OrnamentKind::Ball, target, target);
    let pointer = Vec3::new(-1.0, 0.0, 0.0);
    let c = ctx(1.0 / 60.0, GlobalMode::Formed, Some(pointer));
    step(&mut it, &p, &c);
    assert!(it.position().x > 0.0, "moved to {:?}", it.position());
    assert!(it.velocity().x > 0.0);
}

#[test]
fn repulsion_weight_zero_ignores_pointer() {
    let mut p = profile(2.0, 0.9);
    p.repulsion_weight = 0.0;
    let mut it = item(0, OrnamentKind::Ball, Vec3::ZERO, Vec3::ZERO);
    let pointer = Some(Vec3::new(0.5, 0.0, 0.0));
    let c = ctx(1.0 / 60.0, GlobalMode::Formed, pointer);
    step(&mut it, &p, &c);
    assert_eq!(it.position(), Vec3::ZERO);
}

#[test]
fn coincident_pointer_keeps_state_finite() {
    let p = profile(2.0, 0.9);
    let mut it = item(0, OrnamentKind::Ball, Vec3::ZERO, Vec3::ZERO);
    for _ in 0..100 {
        let here = it.position();
        let c = ctx(1.0 / 60.0, GlobalMode::Formed, Some(here));
        step(&mut it, &p, &c);
        assert!(it.position().is_finite());
        assert!(it.velocity().is_finite());
    }
}

#[test]
fn cane_spins_only_about_vertical_axis() {
    let p = TypeProfile {
        rotation: RotationStyle::AxisSpin { rate: 0.8 },
        ..profile(1.5, 0.9)
    };
    let mut it = item(0, OrnamentKind::Cane, Vec3::ZERO, Vec3::ONE);
    let start = it.rotation();
    for _ in 0..30 {
        step(&mut it, &p, &ctx(1.0 / 60.0, GlobalMode::Formed, None));
    }
    let end = it.rotation();
    assert_eq!(end.x, start.x);
    assert_eq!(end.z, start.z);
    assert!((end.y - start.y).abs() > 1e-3);
}

#[test]
fn bells_at_different_positions_swing_out_of_phase() {
    let p = TypeProfile {
        rotation: RotationStyle::Swing {
            amplitude: 0.35,
            frequency: 2.0,
        },
        ..profile(1.8, 0.9)
    };
    let (left, right) = (Vec3::new(-3.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 1.0));
    let mut a = item(0, OrnamentKind::Bell, left, left);
    let mut b = item(1, OrnamentKind::Bell, right, right);
    let mut c = ctx(1.0 / 60.0, GlobalMode::Formed, None);
    c.elapsed = 1.25;
    step(&mut a, &p, &c);
    step(&mut b, &p, &c);
    assert!((a.rotation().z - b.rotation().z).abs() > 1e-3);
    assert!(a.rotation().z.abs() <= 0.35 + 1e-6);
}

#[test]
fn lights_twinkle_only_when_formed() {
    let p = TypeProfile {
        color: ColorStyle::Twinkle,
        ..profile(3.0, 0.88)
    };
    let base = Vec3::new(1.0, 0.8, 0.5);
    let mut it = SpatialItem::new(
        ItemId(0),
        OrnamentKind::Light,
        Vec3::ZERO,
        Vec3::ZERO,
        0.1,
        base,
        0.0,
    );

    let mut chaos = ctx(1.0 / 60.0, GlobalMode::Chaos, None);
    for elapsed in [0.0, 0.3, 0.9] {
        chaos.elapsed = elapsed;
        assert_eq!(step(&mut it, &p, &chaos).color, base);
    }

    let mut formed = ctx(1.0 / 60.0, GlobalMode::Formed, None);
    formed.elapsed = 0.0;
    let c0 = step(&mut it, &p, &formed).color;
    formed.elapsed = 0.5;
    let c1 = step(&mut it, &p, &formed).color;
    assert!((c0 - c1).length() > 1e-3, "expected brightness change");
}

#[test]
fn missing_profile_leaves_item_frozen() {
    let profiles = ProfileTable::empty();
    let mut items = vec![item(0, OrnamentKind::Star, Vec3::ONE, Vec3::ZERO)];
    let mut poses = Vec::new();
    let c = ctx(0.1, GlobalMode::Formed, None);
    step_population(&mut items, &profiles, &c, &mut poses);
    assert_eq!(items[0].position(), Vec3::ONE);
    assert_eq!(poses.len(), 1);
}
