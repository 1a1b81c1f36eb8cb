//! Dual-position layout: a chaos point inside a sphere and a formed point
//! inside a tapered, twisted cone.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::config::LayoutConfig;

/// Where inside a cone slice the formed position may land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TargetVolume {
    /// Uniform over the whole disk of the slice.
    Filled,
    /// Uniform over the annulus between `inner * r` and `r`, where `r` is the
    /// slice radius. `inner = 1.0` pins points to the surface.
    Shell { inner: f32 },
}

/// Output of the generator for one item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub chaos: Vec3,
    pub target: Vec3,
    pub scale: f32,
    /// Uniform in \[0, 1); used as the item's phase and jitter seed.
    pub seed: f32,
}

/// Per-population sampling options layered on top of the shared geometry.
#[derive(Clone, Copy, Debug)]
pub struct PopulationShape {
    pub volume: TargetVolume,
    pub scale_range: [f32; 2],
    pub angular_jitter: f32,
}

#[derive(Clone, Debug)]
pub struct LayoutGenerator {
    pub chaos_radius: f32,
    pub cone_height: f32,
    pub cone_radius: f32,
    pub base_y: f32,
    pub taper_exponent: f32,
    pub spiral_turns: f32,
}

impl LayoutGenerator {
    pub fn new(cfg: &LayoutConfig) -> Self {
        Self {
            chaos_radius: cfg.chaos_radius,
            cone_height: cfg.cone_height,
            cone_radius: cfg.cone_radius,
            base_y: cfg.base_y,
            taper_exponent: cfg.taper_exponent,
            spiral_turns: cfg.spiral_turns,
        }
    }

    /// Generate `count` placements. `count == 0` returns an empty vector.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        shape: &PopulationShape,
        rng: &mut R,
    ) -> Vec<Placement> {
        (0..count).map(|_| self.place(shape, rng)).collect()
    }

    pub fn place<R: Rng + ?Sized>(&self, shape: &PopulationShape, rng: &mut R) -> Placement {
        let chaos = self.sample_chaos(rng);
        let target = self.sample_target(shape, rng);
        let [lo, hi] = shape.scale_range;
        let scale = lo + (hi - lo) * rng.gen::<f32>();
        Placement {
            chaos,
            target,
            scale,
            seed: rng.gen::<f32>(),
        }
    }

    /// Uniform inside the chaos sphere. The cube root on the radius keeps
    /// the density flat instead of piling up at the centre.
    pub fn sample_chaos<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let r = self.chaos_radius * rng.gen::<f32>().cbrt();
        let theta = TAU * rng.gen::<f32>();
        let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        Vec3::new(
            r * sin_phi * cos_theta,
            r * cos_phi,
            r * sin_phi * sin_theta,
        )
    }

    /// Cone radius at normalized height `t` (0 = base, 1 = apex).
    pub fn radius_at(&self, t: f32) -> f32 {
        self.cone_radius * (1.0 - t.clamp(0.0, 1.0)).powf(self.taper_exponent)
    }

    pub fn sample_target<R: Rng + ?Sized>(&self, shape: &PopulationShape, rng: &mut R) -> Vec3 {
        let t = rng.gen::<f32>();
        let y = self.base_y + t * self.cone_height;
        let max_r = self.radius_at(t);

        // sqrt keeps the disk (or annulus) uniform by area
        let u = rng.gen::<f32>();
        let r = match shape.volume {
            TargetVolume::Filled => max_r * u.sqrt(),
            TargetVolume::Shell { inner } => {
                let inner_sq = inner * inner;
                max_r * (inner_sq + (1.0 - inner_sq) * u).sqrt()
            }
        };

        let twist = t * self.spiral_turns * TAU;
        let jitter = (rng.gen::<f32>() - 0.5) * TAU * shape.angular_jitter;
        let angle = twist + jitter;
        Vec3::new(r * angle.cos(), y, r * angle.sin())
    }

    /// Normalized height of a formed position, clamped to the cone.
    pub fn height_fraction(&self, y: f32) -> f32 {
        ((y - self.base_y) / self.cone_height).clamp(0.0, 1.0)
    }
}
