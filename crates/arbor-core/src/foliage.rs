//! Dense foliage point cloud.
//!
//! Points carry no per-frame state: their position is a pure function of the
//! shared progress scalar, elapsed time and the smoothed pointer, evaluated
//! per vertex on the GPU (`FOLIAGE_WGSL`). [`evaluate`] is the CPU reference
//! of that vertex stage and must stay in sync with it.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::repulsion::RepulsionField;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliagePoint {
    pub chaos_position: Vec3,
    pub target_position: Vec3,
    pub scale: f32,
    pub phase: f32,
}

impl FoliagePoint {
    pub fn to_vertex(&self) -> FoliageVertex {
        FoliageVertex {
            chaos: self.chaos_position.to_array(),
            scale: self.scale,
            target: self.target_position.to_array(),
            phase: self.phase,
        }
    }
}

/// Static per-point vertex record, uploaded once.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FoliageVertex {
    pub chaos: [f32; 3],
    pub scale: f32,
    pub target: [f32; 3],
    pub phase: f32,
}

/// Uniform block read by the foliage vertex stage, rewritten every tick.
///
/// Packed as vec4s to match WGSL uniform alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FoliageUniforms {
    /// xyz = smoothed pointer in world space, w = 1 when active.
    pub pointer: [f32; 4],
    /// progress, elapsed seconds, repulsion radius, repulsion strength.
    pub params: [f32; 4],
    /// repulsion weight, breath amplitude, breath speed, min repulsion distance.
    pub motion: [f32; 4],
    pub color: [f32; 4],
}

impl FoliageUniforms {
    pub fn progress(&self) -> f32 {
        self.params[0]
    }

    pub fn elapsed(&self) -> f32 {
        self.params[1]
    }

    pub fn pointer(&self) -> Option<Vec3> {
        let [x, y, z, active] = self.pointer;
        (active > 0.5).then(|| Vec3::new(x, y, z))
    }

    pub fn field(&self) -> RepulsionField {
        RepulsionField {
            radius: self.params[2],
            strength: self.params[3],
            min_distance: self.motion[3],
        }
    }
}

/// World position of one point for the given uniforms.
pub fn evaluate(point: &FoliagePoint, u: &FoliageUniforms) -> Vec3 {
    let [weight, breath_amplitude, breath_speed, _] = u.motion;
    let base = point
        .chaos_position
        .lerp(point.target_position, u.progress());
    let breath = (u.elapsed() * breath_speed + point.phase * TAU).sin() * breath_amplitude;
    let position = base + Vec3::Y * breath;
    match u.pointer() {
        Some(pointer) => position + u.field().push(pointer, position) * weight,
        None => position,
    }
}

/// Evaluate every point into `out` (cleared first).
pub fn evaluate_into(points: &[FoliagePoint], u: &FoliageUniforms, out: &mut Vec<Vec3>) {
    out.clear();
    out.extend(points.iter().map(|p| evaluate(p, u)));
}

/// Exponential smoothing of the projected pointer for the foliage path.
///
/// Snaps on the first sample after the pointer appears, clears when it is lost.
#[derive(Clone, Debug)]
pub struct PointerSmoother {
    value: Option<Vec3>,
    rate: f32,
}

impl PointerSmoother {
    pub fn new(rate: f32) -> Self {
        Self { value: None, rate }
    }

    pub fn value(&self) -> Option<Vec3> {
        self.value
    }

    pub fn update(&mut self, target: Option<Vec3>, dt_sec: f32) -> Option<Vec3> {
        self.value = match (self.value, target) {
            (_, None) => None,
            (None, Some(t)) => Some(t),
            (Some(v), Some(t)) => {
                let alpha = 1.0 - (-self.rate * dt_sec.max(0.0)).exp();
                Some(v.lerp(t, alpha))
            }
        };
        self.value
    }
}
