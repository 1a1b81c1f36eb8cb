//! Startup configuration.
//!
//! Every struct defaults to the tuned values in [`crate::constants`]; callers
//! override fields directly. [`SceneConfig::validate`] runs before any
//! population is generated.

use glam::Vec3;

use crate::constants::*;
use crate::error::ConfigError;
use crate::layout::TargetVolume;
use crate::profile::{OrnamentKind, ProfileTable};

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub seed: u64,
    pub layout: LayoutConfig,
    pub foliage: FoliageConfig,
    pub ornaments: Vec<OrnamentGroup>,
    pub frames: FrameConfig,
    pub profiles: ProfileTable,
    pub repulsion: RepulsionConfig,
    pub hysteresis: HysteresisConfig,
    /// Rate (1/s) at which the foliage progress scalar chases its mode target.
    pub progress_rate: f32,
    pub twinkle: TwinkleConfig,
    pub focus: FocusConfig,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            layout: LayoutConfig::default(),
            foliage: FoliageConfig::default(),
            ornaments: default_ornament_groups(),
            frames: FrameConfig::default(),
            profiles: ProfileTable::default(),
            repulsion: RepulsionConfig::default(),
            hysteresis: HysteresisConfig::default(),
            progress_rate: PROGRESS_RATE,
            twinkle: TwinkleConfig::default(),
            focus: FocusConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// Geometry shared by every population: the chaos sphere and the formed cone.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub chaos_radius: f32,
    pub cone_height: f32,
    pub cone_radius: f32,
    pub base_y: f32,
    pub taper_exponent: f32,
    pub spiral_turns: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chaos_radius: CHAOS_RADIUS,
            cone_height: CONE_HEIGHT,
            cone_radius: CONE_RADIUS,
            base_y: CONE_BASE_Y,
            taper_exponent: TAPER_EXPONENT,
            spiral_turns: SPIRAL_TURNS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FoliageConfig {
    pub count: usize,
    pub scale_range: [f32; 2],
    pub color: Vec3,
    pub breath_amplitude: f32,
    pub breath_speed: f32,
    pub repulsion_weight: f32,
    /// Rate (1/s) of the low-pass filter applied to the pointer seen by foliage.
    pub pointer_smoothing_rate: f32,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            count: FOLIAGE_COUNT,
            scale_range: FOLIAGE_SCALE_RANGE,
            color: Vec3::from_array(FOLIAGE_COLOR),
            breath_amplitude: FOLIAGE_BREATH_AMPLITUDE,
            breath_speed: FOLIAGE_BREATH_SPEED,
            repulsion_weight: FOLIAGE_REPULSION_WEIGHT,
            pointer_smoothing_rate: POINTER_SMOOTHING_RATE,
        }
    }
}

/// One block of ornaments of a single category.
#[derive(Clone, Debug)]
pub struct OrnamentGroup {
    pub kind: OrnamentKind,
    pub count: usize,
    pub scale_range: [f32; 2],
    pub palette: Vec<Vec3>,
    pub volume: TargetVolume,
    /// Fraction of a full turn added at random on top of the spiral twist.
    pub angular_jitter: f32,
}

impl OrnamentGroup {
    pub fn new(kind: OrnamentKind, count: usize) -> Self {
        let (scale_range, palette, inner): ([f32; 2], &[[f32; 3]], f32) = match kind {
            OrnamentKind::Ball => ([0.25, 0.4], &BALL_COLORS[..], 0.82),
            OrnamentKind::Gift => ([0.3, 0.45], &GIFT_COLORS[..], 0.6),
            OrnamentKind::Light => ([0.08, 0.12], &LIGHT_COLORS[..], 0.9),
            OrnamentKind::Bell => ([0.25, 0.35], &BELL_COLORS[..], 0.82),
            OrnamentKind::Cane => ([0.3, 0.4], &CANE_COLORS[..], 0.85),
            OrnamentKind::Star => ([0.2, 0.3], &STAR_COLORS[..], 0.85),
        };
        Self {
            kind,
            count,
            scale_range,
            palette: palette.iter().copied().map(Vec3::from_array).collect(),
            volume: TargetVolume::Shell { inner },
            angular_jitter: 1.0,
        }
    }
}

pub fn default_ornament_groups() -> Vec<OrnamentGroup> {
    vec![
        OrnamentGroup::new(OrnamentKind::Ball, 420),
        OrnamentGroup::new(OrnamentKind::Gift, 140),
        OrnamentGroup::new(OrnamentKind::Light, 300),
        OrnamentGroup::new(OrnamentKind::Bell, 60),
        OrnamentGroup::new(OrnamentKind::Cane, 60),
        OrnamentGroup::new(OrnamentKind::Star, 20),
    ]
}

#[derive(Clone, Debug)]
pub struct FrameConfig {
    pub count: usize,
    pub scale: f32,
    pub shell_inner: f32,
    pub angular_jitter: f32,
    pub sway_amplitude: f32,
    pub sway_speed: f32,
    pub tilt_amplitude: f32,
    pub color: Vec3,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            count: FRAME_COUNT,
            scale: FRAME_SCALE,
            shell_inner: FRAME_SHELL_INNER,
            angular_jitter: FRAME_ANGULAR_JITTER,
            sway_amplitude: FRAME_SWAY_AMPLITUDE,
            sway_speed: FRAME_SWAY_SPEED,
            tilt_amplitude: FRAME_TILT_AMPLITUDE,
            color: Vec3::from_array(FRAME_COLOR),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RepulsionConfig {
    pub radius: f32,
    pub strength: f32,
    pub min_distance: f32,
    /// Depth of the plane the 2D pointer is projected onto.
    pub plane_z: f32,
}

impl Default for RepulsionConfig {
    fn default() -> Self {
        Self {
            radius: REPULSION_RADIUS,
            strength: REPULSION_STRENGTH,
            min_distance: MIN_REPULSION_DISTANCE,
            plane_z: POINTER_PLANE_Z,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HysteresisConfig {
    pub enter_chaos: f32,
    pub enter_formed: f32,
}

impl Default for HysteresisConfig {
    fn default() -> Self {
        Self {
            enter_chaos: ENTER_CHAOS_THRESHOLD,
            enter_formed: ENTER_FORMED_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TwinkleConfig {
    pub speed: f32,
    pub base: f32,
    pub amplitude: f32,
}

impl Default for TwinkleConfig {
    fn default() -> Self {
        Self {
            speed: TWINKLE_SPEED,
            base: TWINKLE_BASE,
            amplitude: TWINKLE_AMPLITUDE,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FocusConfig {
    pub ambient_rate: f32,
    pub zoom_rate: f32,
    pub zoom_distance: f32,
    pub zoom_scale: f32,
    pub chaos_pan_angle: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            ambient_rate: AMBIENT_SMOOTHING_RATE,
            zoom_rate: ZOOM_SMOOTHING_RATE,
            zoom_distance: ZOOM_DISTANCE,
            zoom_scale: ZOOM_SCALE,
            chaos_pan_angle: CHAOS_PAN_ANGLE,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub fovy_degrees: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::from_array(CAMERA_EYE),
            target: Vec3::from_array(CAMERA_TARGET),
            fovy_degrees: CAMERA_FOVY_DEGREES,
            aspect: CAMERA_ASPECT,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn finite_vec(name: &'static str, value: Vec3) -> Result<(), ConfigError> {
    for component in value.to_array() {
        finite(name, component)?;
    }
    Ok(())
}

fn unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::UnitRange { name, value })
    }
}

fn scale_range([min, max]: [f32; 2]) -> Result<(), ConfigError> {
    if min > 0.0 && max >= min && max.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ScaleRange { min, max })
    }
}

fn population(name: &'static str, count: usize) -> Result<(), ConfigError> {
    if count <= MAX_POPULATION {
        Ok(())
    } else {
        Err(ConfigError::PopulationTooLarge {
            name,
            count,
            max: MAX_POPULATION,
        })
    }
}

impl SceneConfig {
    /// Reject anything that would make the integrator diverge or freeze.
    /// Zero counts are fine and produce empty populations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.layout;
        positive("chaos_radius", l.chaos_radius)?;
        positive("cone_height", l.cone_height)?;
        positive("cone_radius", l.cone_radius)?;
        if !(l.taper_exponent > 0.0 && l.taper_exponent < 1.0) {
            return Err(ConfigError::TaperExponent(l.taper_exponent));
        }
        finite("base_y", l.base_y)?;
        finite("spiral_turns", l.spiral_turns)?;

        self.profiles.validate()?;

        let f = &self.foliage;
        population("foliage", f.count)?;
        scale_range(f.scale_range)?;
        positive("foliage.pointer_smoothing_rate", f.pointer_smoothing_rate)?;
        non_negative("foliage.breath_amplitude", f.breath_amplitude)?;
        finite("foliage.breath_speed", f.breath_speed)?;
        non_negative("foliage.repulsion_weight", f.repulsion_weight)?;
        finite_vec("foliage.color", f.color)?;

        for group in &self.ornaments {
            if self.profiles.get(group.kind).is_none() {
                return Err(ConfigError::MissingProfile(group.kind));
            }
            population("ornament", group.count)?;
            scale_range(group.scale_range)?;
            if group.palette.is_empty() {
                return Err(ConfigError::EmptyPalette(group.kind));
            }
            for color in &group.palette {
                finite_vec("ornament.palette", *color)?;
            }
            if let TargetVolume::Shell { inner } = group.volume {
                unit("ornament.volume.inner", inner)?;
            }
            unit("ornament.angular_jitter", group.angular_jitter)?;
        }
        let total: usize = self.ornaments.iter().map(|g| g.count).sum();
        population("ornament", total)?;

        let fr = &self.frames;
        population("frame", fr.count)?;
        positive("frames.scale", fr.scale)?;
        unit("frames.shell_inner", fr.shell_inner)?;
        unit("frames.angular_jitter", fr.angular_jitter)?;
        non_negative("frames.sway_amplitude", fr.sway_amplitude)?;
        finite("frames.sway_speed", fr.sway_speed)?;
        non_negative("frames.tilt_amplitude", fr.tilt_amplitude)?;
        finite_vec("frames.color", fr.color)?;

        let r = &self.repulsion;
        positive("repulsion.radius", r.radius)?;
        positive("repulsion.strength", r.strength)?;
        positive("repulsion.min_distance", r.min_distance)?;
        finite("repulsion.plane_z", r.plane_z)?;

        let h = &self.hysteresis;
        finite("hysteresis.enter_chaos", h.enter_chaos)?;
        finite("hysteresis.enter_formed", h.enter_formed)?;
        if !(h.enter_chaos > h.enter_formed) {
            return Err(ConfigError::Hysteresis {
                enter_chaos: h.enter_chaos,
                enter_formed: h.enter_formed,
            });
        }

        positive("progress_rate", self.progress_rate)?;
        positive("twinkle.speed", self.twinkle.speed)?;
        non_negative("twinkle.base", self.twinkle.base)?;
        non_negative("twinkle.amplitude", self.twinkle.amplitude)?;

        let fo = &self.focus;
        positive("focus.ambient_rate", fo.ambient_rate)?;
        positive("focus.zoom_rate", fo.zoom_rate)?;
        positive("focus.zoom_distance", fo.zoom_distance)?;
        positive("focus.zoom_scale", fo.zoom_scale)?;
        finite("focus.chaos_pan_angle", fo.chaos_pan_angle)?;

        let c = &self.camera;
        finite_vec("camera.eye", c.eye)?;
        finite_vec("camera.target", c.target)?;
        if c.eye.distance_squared(c.target) <= f32::EPSILON {
            return Err(ConfigError::NonPositive {
                name: "camera.view_distance",
                value: c.eye.distance(c.target),
            });
        }
        positive("camera.fovy_degrees", c.fovy_degrees)?;
        positive("camera.aspect", c.aspect)?;
        positive("camera.znear", c.znear)?;
        positive("camera.depth_range", c.zfar - c.znear)?;
        Ok(())
    }
}
