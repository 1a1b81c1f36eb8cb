use crate::profile::OrnamentKind;
use thiserror::Error;

/// Configuration rejected by [`SceneConfig::validate`](crate::SceneConfig::validate).
///
/// All variants are fatal: a scene is never built from a config that fails
/// validation, so none of these can surface once ticking has started.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("damping for {kind:?} must lie strictly between 0 and 1, got {value}")]
    DampingOutOfRange { kind: OrnamentKind, value: f32 },

    #[error("speed for {kind:?} must be positive, got {value}")]
    NonPositiveSpeed { kind: OrnamentKind, value: f32 },

    #[error("repulsion weight for {kind:?} must be non-negative, got {value}")]
    NegativeRepulsionWeight { kind: OrnamentKind, value: f32 },

    #[error("no motion profile configured for {0:?}")]
    MissingProfile(OrnamentKind),

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("taper exponent must lie in (0, 1), got {0}")]
    TaperExponent(f32),

    #[error("{name} must lie in [0, 1], got {value}")]
    UnitRange { name: &'static str, value: f32 },

    #[error("scale range {min}..{max} is empty or non-positive")]
    ScaleRange { min: f32, max: f32 },

    #[error(
        "enter-chaos threshold {enter_chaos} must be above enter-formed threshold {enter_formed}"
    )]
    Hysteresis { enter_chaos: f32, enter_formed: f32 },

    #[error("{name} population of {count} exceeds the limit of {max}")]
    PopulationTooLarge {
        name: &'static str,
        count: usize,
        max: usize,
    },

    #[error("ornament group {0:?} has an empty palette")]
    EmptyPalette(OrnamentKind),
}
