//! Photo frames and the pinch-to-zoom focus selector.
//!
//! While the pinch is released the selector keeps re-picking the frame
//! nearest the pointer on screen. Once the pinch closes the pick is frozen, so
//! the hand can finish the gesture without the target jumping, and the locked
//! frame is pulled in front of the camera.

use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};

use crate::config::{FocusConfig, FrameConfig};
use crate::integrator::ItemId;
use crate::mode::GlobalMode;
use crate::state::{rotation_facing, Camera, PointerState, Pose};

#[derive(Clone, Debug)]
pub struct PhotoFrame {
    pub id: ItemId,
    pub chaos_position: Vec3,
    pub target_position: Vec3,
    pub phase: f32,
    // Mutated only by `FocusSelector::animate`.
    pose: Pose,
}

impl PhotoFrame {
    pub fn new(
        id: ItemId,
        chaos_position: Vec3,
        target_position: Vec3,
        phase: f32,
        scale: f32,
        color: Vec3,
    ) -> Self {
        Self {
            id,
            chaos_position,
            target_position,
            phase,
            pose: Pose {
                position: chaos_position,
                rotation: Quat::IDENTITY,
                scale,
                color,
            },
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusChange {
    ZoomStarted(ItemId),
    ZoomEnded(ItemId),
}

/// Index of the frame whose projected position is closest to `pointer_uv`.
/// Frames behind the camera are ignored; ties go to the earlier frame.
pub fn nearest_frame(frames: &[PhotoFrame], camera: &Camera, pointer_uv: Vec2) -> Option<ItemId> {
    let mut best = None::<(ItemId, f32)>;
    for frame in frames {
        let Some(screen) = camera.project_to_screen(frame.pose.position) else {
            continue;
        };
        let d = screen.distance_squared(pointer_uv);
        if !d.is_finite() {
            continue;
        }
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((frame.id, d)),
        }
    }
    best.map(|(id, _)| id)
}

/// Inputs for one frame-animation pass.
#[derive(Clone, Copy, Debug)]
pub struct FrameStep<'a> {
    pub dt: f32,
    pub elapsed: f32,
    pub mode: GlobalMode,
    pub pointer: &'a PointerState,
    pub camera: &'a Camera,
}

#[derive(Clone, Debug)]
pub struct FocusSelector {
    locked: Option<ItemId>,
    zoomed: Option<ItemId>,
    focus: FocusConfig,
    frames: FrameConfig,
}

impl FocusSelector {
    pub fn new(focus: &FocusConfig, frames: &FrameConfig) -> Self {
        Self {
            locked: None,
            zoomed: None,
            focus: *focus,
            frames: frames.clone(),
        }
    }

    pub fn locked(&self) -> Option<ItemId> {
        self.locked
    }

    /// The frame currently pulled toward the camera, if any.
    pub fn zoomed(&self) -> Option<ItemId> {
        self.zoomed
    }

    /// Update the lock from this tick's pointer. Returns a change when a zoom
    /// starts or ends.
    pub fn update(
        &mut self,
        frames: &[PhotoFrame],
        camera: &Camera,
        pointer: &PointerState,
    ) -> Option<FocusChange> {
        match pointer.position {
            // Losing the pointer drops the lock even mid-pinch.
            None => self.locked = None,
            Some(uv) if !pointer.pinching => self.locked = nearest_frame(frames, camera, uv),
            Some(_) => {}
        }

        let zoomed = if pointer.pinching && pointer.position.is_some() {
            self.locked
        } else {
            None
        };
        let change = match (self.zoomed, zoomed) {
            (None, Some(id)) => Some(FocusChange::ZoomStarted(id)),
            (Some(prev), None) => Some(FocusChange::ZoomEnded(prev)),
            (Some(prev), Some(id)) if prev != id => Some(FocusChange::ZoomStarted(id)),
            _ => None,
        };
        if let Some(c) = change {
            log::debug!("[focus] {:?}", c);
        }
        self.zoomed = zoomed;
        change
    }

    /// Pose a frame should settle at this tick, with the smoothing rate to use.
    pub fn desired_pose(&self, frame: &PhotoFrame, step: &FrameStep) -> (Pose, f32) {
        let camera = step.camera;
        if self.zoomed == Some(frame.id) {
            let position = camera.eye + camera.forward() * self.focus.zoom_distance;
            let pose = Pose {
                position,
                rotation: rotation_facing(camera.eye - position),
                scale: self.focus.zoom_scale,
                color: frame.pose.color,
            };
            return (pose, self.focus.zoom_rate);
        }

        let cfg = &self.frames;
        let wave = step.elapsed * cfg.sway_speed + frame.phase * TAU;
        let pose = match step.mode {
            GlobalMode::Formed => {
                let target = frame.target_position;
                let outward = rotation_facing(Vec3::new(target.x, 0.0, target.z));
                let tilt = Quat::from_rotation_z((wave * 0.8).sin() * cfg.tilt_amplitude);
                Pose {
                    position: target + Vec3::Y * wave.sin() * cfg.sway_amplitude,
                    rotation: outward * tilt,
                    scale: cfg.scale,
                    color: frame.pose.color,
                }
            }
            GlobalMode::Chaos => {
                let offset = step.pointer.position.map_or(0.0, |uv| uv.x - 0.5);
                let yaw = offset * 2.0 * self.focus.chaos_pan_angle;
                let position = Quat::from_rotation_y(yaw) * frame.chaos_position;
                Pose {
                    position,
                    rotation: rotation_facing(camera.eye - position),
                    scale: cfg.scale,
                    color: frame.pose.color,
                }
            }
        };
        (pose, self.focus.ambient_rate)
    }

    /// Ease every frame toward its desired pose and write the results into
    /// `out` (cleared first). A zero `dt` leaves frames where they are.
    pub fn animate(&self, frames: &mut [PhotoFrame], step: &FrameStep, out: &mut Vec<Pose>) {
        out.clear();
        out.reserve(frames.len());
        for frame in frames.iter_mut() {
            if step.dt > 0.0 {
                let (desired, rate) = self.desired_pose(frame, step);
                let alpha = 1.0 - (-rate * step.dt).exp();
                let current = frame.pose;
                let position = current.position.lerp(desired.position, alpha);
                let rotation = current.rotation.slerp(desired.rotation, alpha).normalize();
                let scale = current.scale + (desired.scale - current.scale) * alpha;
                if position.is_finite() && rotation.is_finite() && scale.is_finite() {
                    frame.pose.position = position;
                    frame.pose.rotation = rotation;
                    frame.pose.scale = scale;
                } else {
                    // The smoothed pose feeds the next tick; never let NaN in.
                    log::warn!(
                        "[focus] non-finite pose for frame {:?}, holding previous pose",
                        frame.id
                    );
                }
            }
            out.push(frame.pose);
        }
    }
}
