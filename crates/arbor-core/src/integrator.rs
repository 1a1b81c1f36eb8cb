//! Damped spring integration for discrete ornaments.
//!
//! Ornaments switch their destination outright when the mode flips and rely
//! on velocity damping for a smooth approach. Foliage blends through a shared
//! progress scalar instead, see [`crate::foliage`].

use std::f32::consts::TAU;

use glam::{EulerRot, Quat, Vec3};

use crate::config::TwinkleConfig;
use crate::mode::GlobalMode;
use crate::profile::{ColorStyle, OrnamentKind, ProfileTable, RotationStyle, TypeProfile};
use crate::repulsion::RepulsionField;
use crate::state::Pose;

/// Stable item identifier.
///
/// Populations are generated once and never resized, so the id is simply the
/// item's index in its population. If insertion or removal is ever added this
/// must become an id independent of storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

#[derive(Clone, Debug)]
pub struct SpatialItem {
    pub id: ItemId,
    pub kind: OrnamentKind,
    pub chaos_position: Vec3,
    pub target_position: Vec3,
    pub scale: f32,
    pub color: Vec3,
    /// \[0, 1) seed for periodic motion.
    pub phase: f32,
    // Mutated only by `step`.
    position: Vec3,
    velocity: Vec3,
    rotation: Vec3,
}

impl SpatialItem {
    /// A new item at rest on its chaos position.
    pub fn new(
        id: ItemId,
        kind: OrnamentKind,
        chaos_position: Vec3,
        target_position: Vec3,
        scale: f32,
        color: Vec3,
        phase: f32,
    ) -> Self {
        // Initial tilt derived from the phase so every instance starts at a
        // different orientation without another random draw.
        let rotation = Vec3::new(
            (phase - 0.5) * 0.6,
            phase * TAU,
            ((phase * 7.0).fract() - 0.5) * 0.6,
        );
        Self {
            id,
            kind,
            chaos_position,
            target_position,
            scale,
            color,
            phase,
            position: chaos_position,
            velocity: Vec3::ZERO,
            rotation,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Euler angles (XYZ order) in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn destination(&self, mode: GlobalMode) -> Vec3 {
        match mode {
            GlobalMode::Formed => self.target_position,
            GlobalMode::Chaos => self.chaos_position,
        }
    }

    fn pose(&self, color: Vec3) -> Pose {
        Pose {
            position: self.position,
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            scale: self.scale,
            color,
        }
    }
}

/// Read-only inputs for one integration pass.
#[derive(Clone, Copy, Debug)]
pub struct StepContext {
    pub dt: f32,
    pub elapsed: f32,
    pub mode: GlobalMode,
    /// Pointer projected into world space, if one is active.
    pub pointer: Option<Vec3>,
    pub field: RepulsionField,
    pub twinkle: TwinkleConfig,
}

/// Advance one item by one tick and return its pose.
///
/// A zero (or negative, or NaN) `dt` leaves the item untouched.
pub fn step(item: &mut SpatialItem, profile: &TypeProfile, ctx: &StepContext) -> Pose {
    if !(ctx.dt > 0.0) {
        return item.pose(shade(item, profile, ctx));
    }

    let destination = item.destination(ctx.mode);
    let mut velocity = item.velocity + (destination - item.position) * profile.speed * ctx.dt;
    if let Some(pointer) = ctx.pointer {
        velocity += ctx.field.push(pointer, item.position) * profile.repulsion_weight;
    }
    velocity *= profile.damping;
    let position = item.position + velocity;

    if position.is_finite() && velocity.is_finite() {
        item.position = position;
        item.velocity = velocity;
    } else {
        // Position is an accumulator; one bad value would stick forever.
        log::warn!(
            "[integrator] non-finite state for item {:?}, holding previous position",
            item.id
        );
        item.velocity = Vec3::ZERO;
    }

    item.rotation = match profile.rotation {
        RotationStyle::Spin { rate } => wrap(item.rotation + rate * ctx.dt),
        RotationStyle::Swing {
            amplitude,
            frequency,
        } => Vec3::new(
            (ctx.elapsed * frequency * 0.7 + item.position.z).sin() * amplitude * 0.5,
            item.rotation.y,
            (ctx.elapsed * frequency + item.position.x).sin() * amplitude,
        ),
        RotationStyle::AxisSpin { rate } => Vec3::new(
            item.rotation.x,
            (item.rotation.y + rate * ctx.dt).rem_euclid(TAU),
            item.rotation.z,
        ),
    };

    item.pose(shade(item, profile, ctx))
}

fn shade(item: &SpatialItem, profile: &TypeProfile, ctx: &StepContext) -> Vec3 {
    match (profile.color, ctx.mode) {
        (ColorStyle::Twinkle, GlobalMode::Formed) => {
            let t = &ctx.twinkle;
            let wave = (ctx.elapsed * t.speed + item.phase * TAU).sin();
            item.color * (t.base + t.amplitude * wave).max(0.0)
        }
        _ => item.color,
    }
}

fn wrap(r: Vec3) -> Vec3 {
    Vec3::new(
        r.x.rem_euclid(TAU),
        r.y.rem_euclid(TAU),
        r.z.rem_euclid(TAU),
    )
}

/// Step every item, writing poses into `out` (cleared first).
pub fn step_population(
    items: &mut [SpatialItem],
    profiles: &ProfileTable,
    ctx: &StepContext,
    out: &mut Vec<Pose>,
) {
    out.clear();
    out.reserve(items.len());
    for item in items.iter_mut() {
        let pose = match profiles.get(item.kind) {
            Some(profile) => step(item, profile, ctx),
            // validated away at startup; keep the item frozen if it slips through
            None => item.pose(item.color),
        };
        out.push(pose);
    }
}
