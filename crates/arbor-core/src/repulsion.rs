use glam::Vec3;

use crate::config::RepulsionConfig;

/// Radial push away from the pointer, shared by the foliage and ornament paths.
///
/// Falls off linearly from `strength` at the pointer to zero at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepulsionField {
    pub radius: f32,
    pub strength: f32,
    pub min_distance: f32,
}

impl RepulsionField {
    pub fn new(cfg: &RepulsionConfig) -> Self {
        Self {
            radius: cfg.radius,
            strength: cfg.strength,
            min_distance: cfg.min_distance,
        }
    }

    /// Velocity (ornaments) or displacement (foliage) contribution for an
    /// item at `position`. Zero at and beyond `radius`.
    pub fn push(&self, pointer: Vec3, position: Vec3) -> Vec3 {
        let delta = position - pointer;
        let distance = delta.length();
        if !(distance < self.radius) {
            // also catches NaN distances
            return Vec3::ZERO;
        }
        // Coincident points have no direction; push straight up so the
        // result stays finite and deterministic.
        let direction = if distance > self.min_distance {
            delta / distance
        } else {
            Vec3::Y
        };
        let falloff = (self.radius - distance.max(0.0)) / self.radius;
        direction * falloff * self.strength
    }

    /// Magnitude at zero distance, the largest this field ever returns.
    pub fn max_magnitude(&self) -> f32 {
        self.strength
    }
}
