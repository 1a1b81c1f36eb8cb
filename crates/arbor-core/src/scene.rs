//! Top-level engine: owns every population and advances them once per tick.

use std::time::Duration;

use glam::Vec3;
use rand::prelude::*;

use crate::config::SceneConfig;
use crate::error::ConfigError;
use crate::focus::{FocusChange, FocusSelector, FrameStep, PhotoFrame};
use crate::foliage::{self, FoliagePoint, FoliageUniforms, PointerSmoother};
use crate::integrator::{step_population, ItemId, SpatialItem, StepContext};
use crate::layout::{LayoutGenerator, PopulationShape, TargetVolume};
use crate::mode::{GlobalMode, ModeController, ProgressBlend};
use crate::repulsion::RepulsionField;
use crate::state::{Camera, FrameInput, InstanceData, PointerState, Pose};

/// Transitions reported by [`Scene::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    ModeChanged(GlobalMode),
    ZoomStarted(ItemId),
    ZoomEnded(ItemId),
}

impl From<FocusChange> for SceneEvent {
    fn from(c: FocusChange) -> Self {
        match c {
            FocusChange::ZoomStarted(id) => SceneEvent::ZoomStarted(id),
            FocusChange::ZoomEnded(id) => SceneEvent::ZoomEnded(id),
        }
    }
}

// Per-population seed salts
const FOLIAGE_STREAM: u64 = 1;
const ORNAMENT_STREAM: u64 = 2;
const FRAME_STREAM: u64 = 3;

fn population_rng(seed: u64, stream: u64) -> StdRng {
    let mix = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

pub struct Scene {
    pub camera: Camera,
    config: SceneConfig,
    field: RepulsionField,
    mode: ModeController,
    progress: ProgressBlend,
    pointer_smoother: PointerSmoother,
    focus: FocusSelector,
    foliage: Vec<FoliagePoint>,
    ornaments: Vec<SpatialItem>,
    frames: Vec<PhotoFrame>,
    ornament_poses: Vec<Pose>,
    frame_poses: Vec<Pose>,
    foliage_uniforms: FoliageUniforms,
    pointer: PointerState,
    elapsed: f32,
}

impl Scene {
    /// Validate `config` and generate every population from its seed.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = LayoutGenerator::new(&config.layout);

        let foliage = {
            let mut rng = population_rng(config.seed, FOLIAGE_STREAM);
            let shape = PopulationShape {
                volume: TargetVolume::Filled,
                scale_range: config.foliage.scale_range,
                angular_jitter: 1.0,
            };
            layout
                .generate(config.foliage.count, &shape, &mut rng)
                .into_iter()
                .map(|p| FoliagePoint {
                    chaos_position: p.chaos,
                    target_position: p.target,
                    scale: p.scale,
                    phase: p.seed,
                })
                .collect::<Vec<_>>()
        };

        let mut ornaments = Vec::new();
        {
            let mut rng = population_rng(config.seed, ORNAMENT_STREAM);
            for group in &config.ornaments {
                let shape = PopulationShape {
                    volume: group.volume,
                    scale_range: group.scale_range,
                    angular_jitter: group.angular_jitter,
                };
                for p in layout.generate(group.count, &shape, &mut rng) {
                    let color = group.palette.choose(&mut rng).copied().unwrap_or(Vec3::ONE);
                    let id = ItemId(ornaments.len() as u32);
                    ornaments.push(SpatialItem::new(
                        id, group.kind, p.chaos, p.target, p.scale, color, p.seed,
                    ));
                }
            }
        }

        let frames = {
            let mut rng = population_rng(config.seed, FRAME_STREAM);
            let fc = &config.frames;
            let shape = PopulationShape {
                volume: TargetVolume::Shell {
                    inner: fc.shell_inner,
                },
                scale_range: [fc.scale, fc.scale],
                angular_jitter: fc.angular_jitter,
            };
            layout
                .generate(fc.count, &shape, &mut rng)
                .into_iter()
                .enumerate()
                .map(|(i, p)| {
                    let id = ItemId(i as u32);
                    PhotoFrame::new(id, p.chaos, p.target, p.seed, p.scale, fc.color)
                })
                .collect::<Vec<_>>()
        };

        log::info!(
            "[scene] built seed={} foliage={} ornaments={} frames={}",
            config.seed,
            foliage.len(),
            ornaments.len(),
            frames.len()
        );

        let mut scene = Self {
            camera: Camera::from_config(&config.camera),
            field: RepulsionField::new(&config.repulsion),
            mode: ModeController::new(&config.hysteresis),
            progress: ProgressBlend::new(config.progress_rate),
            pointer_smoother: PointerSmoother::new(config.foliage.pointer_smoothing_rate),
            focus: FocusSelector::new(&config.focus, &config.frames),
            foliage,
            ornaments,
            frames,
            ornament_poses: Vec::new(),
            frame_poses: Vec::new(),
            foliage_uniforms: FoliageUniforms::default(),
            pointer: PointerState::default(),
            elapsed: 0.0,
            config,
        };
        // A zero-length pass fills the output buffers with the resting poses.
        scene.integrate(0.0, None);
        scene.animate_frames(0.0);
        scene.foliage_uniforms = scene.build_foliage_uniforms();
        Ok(scene)
    }

    /// Advance one render tick. A zero `dt` changes nothing.
    pub fn tick(&mut self, dt: Duration, input: &FrameInput, out_events: &mut Vec<SceneEvent>) {
        let dt_sec = dt.as_secs_f32();
        if dt_sec <= 0.0 {
            return;
        }
        self.elapsed += dt_sec;
        self.pointer = input.pointer.sanitized();

        if let Some(mode) = self.mode.observe(input.mode_signal) {
            out_events.push(SceneEvent::ModeChanged(mode));
        }
        self.progress.advance(self.mode.mode(), dt_sec);

        let plane_z = self.config.repulsion.plane_z;
        let pointer_world = self
            .pointer
            .position
            .and_then(|uv| self.camera.pointer_on_plane(uv, plane_z));
        self.pointer_smoother.update(pointer_world, dt_sec);

        self.integrate(dt_sec, pointer_world);
        self.foliage_uniforms = self.build_foliage_uniforms();

        if let Some(change) = self.focus.update(&self.frames, &self.camera, &self.pointer) {
            out_events.push(change.into());
        }
        self.animate_frames(dt_sec);
    }

    fn integrate(&mut self, dt_sec: f32, pointer_world: Option<Vec3>) {
        let ctx = StepContext {
            dt: dt_sec,
            elapsed: self.elapsed,
            mode: self.mode.mode(),
            pointer: pointer_world,
            field: self.field,
            twinkle: self.config.twinkle,
        };
        step_population(
            &mut self.ornaments,
            &self.config.profiles,
            &ctx,
            &mut self.ornament_poses,
        );
    }

    fn animate_frames(&mut self, dt_sec: f32) {
        let step = FrameStep {
            dt: dt_sec,
            elapsed: self.elapsed,
            mode: self.mode.mode(),
            pointer: &self.pointer,
            camera: &self.camera,
        };
        self.focus
            .animate(&mut self.frames, &step, &mut self.frame_poses);
    }

    fn build_foliage_uniforms(&self) -> FoliageUniforms {
        let f = &self.config.foliage;
        let pointer = match self.pointer_smoother.value() {
            Some(p) => [p.x, p.y, p.z, 1.0],
            None => [0.0; 4],
        };
        FoliageUniforms {
            pointer,
            params: [
                self.progress.value(),
                self.elapsed,
                self.field.radius,
                self.field.strength,
            ],
            motion: [
                f.repulsion_weight,
                f.breath_amplitude,
                f.breath_speed,
                self.field.min_distance,
            ],
            color: [f.color.x, f.color.y, f.color.z, 1.0],
        }
    }

    /// Explicit mode override, e.g. from a button. Hysteresis resumes from
    /// the new state on the next signal sample.
    pub fn set_mode(&mut self, mode: GlobalMode) -> Option<SceneEvent> {
        self.mode.set(mode).map(SceneEvent::ModeChanged)
    }

    pub fn toggle_mode(&mut self) -> SceneEvent {
        SceneEvent::ModeChanged(self.mode.toggle())
    }

    pub fn mode(&self) -> GlobalMode {
        self.mode.mode()
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn foliage(&self) -> &[FoliagePoint] {
        &self.foliage
    }

    pub fn ornaments(&self) -> &[SpatialItem] {
        &self.ornaments
    }

    pub fn frames(&self) -> &[PhotoFrame] {
        &self.frames
    }

    pub fn ornament_poses(&self) -> &[Pose] {
        &self.ornament_poses
    }

    pub fn frame_poses(&self) -> &[Pose] {
        &self.frame_poses
    }

    pub fn foliage_uniforms(&self) -> &FoliageUniforms {
        &self.foliage_uniforms
    }

    pub fn locked_frame(&self) -> Option<ItemId> {
        self.focus.locked()
    }

    pub fn zoomed_frame(&self) -> Option<ItemId> {
        self.focus.zoomed()
    }

    /// CPU evaluation of the foliage vertex stage for the current tick.
    pub fn foliage_positions(&self, out: &mut Vec<Vec3>) {
        foliage::evaluate_into(&self.foliage, &self.foliage_uniforms, out);
    }

    /// Instance records for ornaments followed by frames.
    pub fn instances(&self, out: &mut Vec<InstanceData>) {
        out.clear();
        out.extend(
            self.ornament_poses
                .iter()
                .chain(self.frame_poses.iter())
                .map(Pose::to_instance),
        );
    }

    /// Mean distance from each ornament to its current destination.
    pub fn ornament_settle_error(&self) -> f32 {
        if self.ornaments.is_empty() {
            return 0.0;
        }
        let mode = self.mode.mode();
        let total: f32 = self
            .ornaments
            .iter()
            .map(|o| o.position().distance(o.destination(mode)))
            .sum();
        total / self.ornaments.len() as f32
    }
}
