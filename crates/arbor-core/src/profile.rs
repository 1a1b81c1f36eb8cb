//! Per-category motion profiles.
//!
//! Behaviour that differs between ornament categories is data, not code: each
//! category maps to one [`TypeProfile`] and the integrator dispatches on the
//! profile's [`RotationStyle`] and [`ColorStyle`] tags in a single `match`.

use crate::error::ConfigError;
use fnv::FnvHashMap;
use glam::Vec3;

/// Discrete ornament categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrnamentKind {
    Ball,
    Gift,
    Light,
    Bell,
    Cane,
    Star,
}

impl OrnamentKind {
    pub const ALL: [OrnamentKind; 6] = [
        OrnamentKind::Ball,
        OrnamentKind::Gift,
        OrnamentKind::Light,
        OrnamentKind::Bell,
        OrnamentKind::Cane,
        OrnamentKind::Star,
    ];
}

/// How an ornament's orientation evolves each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationStyle {
    /// Continuous spin; `rate` is radians per second about X, Y and Z.
    Spin { rate: Vec3 },
    /// Sinusoidal rocking driven by elapsed time and the item's position, so
    /// neighbouring instances never swing in lockstep.
    Swing { amplitude: f32, frequency: f32 },
    /// X and Z stay at their initial tilt; only Y advances.
    AxisSpin { rate: f32 },
}

/// How an ornament's colour evolves each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorStyle {
    Static,
    /// Brightness oscillates per item phase while the tree is formed.
    Twinkle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypeProfile {
    pub speed: f32,
    pub damping: f32,
    pub repulsion_weight: f32,
    pub rotation: RotationStyle,
    pub color: ColorStyle,
}

impl TypeProfile {
    pub fn validate(&self, kind: OrnamentKind) -> Result<(), ConfigError> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::DampingOutOfRange {
                kind,
                value: self.damping,
            });
        }
        if !(self.speed > 0.0 && self.speed.is_finite()) {
            return Err(ConfigError::NonPositiveSpeed {
                kind,
                value: self.speed,
            });
        }
        if !(self.repulsion_weight >= 0.0 && self.repulsion_weight.is_finite()) {
            return Err(ConfigError::NegativeRepulsionWeight {
                kind,
                value: self.repulsion_weight,
            });
        }
        Ok(())
    }

    /// Built-in tuning for each category.
    pub fn default_for(kind: OrnamentKind) -> Self {
        match kind {
            OrnamentKind::Ball => Self {
                speed: 2.0,
                damping: 0.92,
                repulsion_weight: 1.0,
                rotation: RotationStyle::Spin {
                    rate: Vec3::new(0.2, 0.5, 0.0),
                },
                color: ColorStyle::Static,
            },
            // heavier boxes lag behind and barely react to the pointer
            OrnamentKind::Gift => Self {
                speed: 1.2,
                damping: 0.9,
                repulsion_weight: 0.6,
                rotation: RotationStyle::Spin {
                    rate: Vec3::new(0.1, 0.3, 0.05),
                },
                color: ColorStyle::Static,
            },
            OrnamentKind::Light => Self {
                speed: 3.0,
                damping: 0.88,
                repulsion_weight: 1.4,
                rotation: RotationStyle::Spin {
                    rate: Vec3::new(0.0, 0.4, 0.0),
                },
                color: ColorStyle::Twinkle,
            },
            OrnamentKind::Bell => Self {
                speed: 1.8,
                damping: 0.9,
                repulsion_weight: 1.0,
                rotation: RotationStyle::Swing {
                    amplitude: 0.35,
                    frequency: 2.0,
                },
                color: ColorStyle::Static,
            },
            OrnamentKind::Cane => Self {
                speed: 1.5,
                damping: 0.9,
                repulsion_weight: 0.8,
                rotation: RotationStyle::AxisSpin { rate: 0.8 },
                color: ColorStyle::Static,
            },
            OrnamentKind::Star => Self {
                speed: 2.5,
                damping: 0.9,
                repulsion_weight: 1.2,
                rotation: RotationStyle::Spin {
                    rate: Vec3::new(0.0, 1.0, 0.0),
                },
                color: ColorStyle::Static,
            },
        }
    }
}

/// Category → profile lookup. Built once from configuration.
#[derive(Clone, Debug)]
pub struct ProfileTable {
    profiles: FnvHashMap<OrnamentKind, TypeProfile>,
}

impl Default for ProfileTable {
    fn default() -> Self {
        let profiles = OrnamentKind::ALL
            .iter()
            .map(|&k| (k, TypeProfile::default_for(k)))
            .collect();
        Self { profiles }
    }
}

impl ProfileTable {
    /// An empty table; populate with [`ProfileTable::with`].
    pub fn empty() -> Self {
        Self {
            profiles: FnvHashMap::default(),
        }
    }

    pub fn with(mut self, kind: OrnamentKind, profile: TypeProfile) -> Self {
        self.profiles.insert(kind, profile);
        self
    }

    pub fn set(&mut self, kind: OrnamentKind, profile: TypeProfile) {
        self.profiles.insert(kind, profile);
    }

    pub fn get(&self, kind: OrnamentKind) -> Option<&TypeProfile> {
        self.profiles.get(&kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Walk in a fixed order so the reported error does not depend on hash order.
        for kind in OrnamentKind::ALL {
            if let Some(p) = self.profiles.get(&kind) {
                p.validate(kind)?;
            }
        }
        Ok(())
    }
}
