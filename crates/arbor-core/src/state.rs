//! Per-frame input snapshots, output poses and the camera.
//!
//! These types avoid platform APIs. The front-end fills a [`FrameInput`] from
//! whatever tracks the pointer (mouse or hand landmarks) and hands the
//! resulting [`Pose`]s to its renderer.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

use crate::config::CameraConfig;

/// Pointer snapshot. `position` is normalized to \[0, 1\] with the origin at
/// the top-left; `None` means no pointer is being tracked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub position: Option<Vec2>,
    pub pinching: bool,
}

impl PointerState {
    pub fn at(u: f32, v: f32) -> Self {
        Self {
            position: Some(Vec2::new(u, v)),
            pinching: false,
        }
    }

    pub fn pinched(mut self) -> Self {
        self.pinching = true;
        self
    }

    /// Clamp the position into the unit square; a non-finite position counts
    /// as no pointer.
    pub fn sanitized(self) -> Self {
        Self {
            position: self
                .position
                .filter(|p| p.is_finite())
                .map(|p| p.clamp(Vec2::ZERO, Vec2::ONE)),
            pinching: self.pinching,
        }
    }
}

/// Everything the external signal source provides for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: PointerState,
    /// Continuous hand-openness style signal; `None` leaves the mode alone.
    pub mode_signal: Option<f32>,
}

/// Drawable state of one item for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub color: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            color: Vec3::ONE,
        }
    }
}

impl Pose {
    pub fn to_instance(&self) -> InstanceData {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.position,
        );
        InstanceData {
            model: model.to_cols_array_2d(),
            color: [self.color.x, self.color.y, self.color.z, 1.0],
        }
    }
}

/// GPU instance record for ornaments and frames.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Rotation whose local +Z axis points along `direction`, keeping +Y as
/// close to world up as possible. Degenerate directions give identity.
pub fn rotation_facing(direction: Vec3) -> Quat {
    let Some(forward) = direction.try_normalize() else {
        return Quat::IDENTITY;
    };
    let Some(right) = Vec3::Y.cross(forward).try_normalize() else {
        // straight up or down: any yaw is as good as another
        return Quat::from_rotation_arc(Vec3::Z, forward);
    };
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Fixed viewpoint the scene is arranged around.
///
/// Besides the usual matrices it maps frames to the pointer's normalized
/// screen space for focus picking, and maps the pointer back into the world
/// for repulsion. World up is always +Y.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Self {
            eye: cfg.eye,
            target: cfg.target,
            aspect: cfg.aspect,
            fovy_radians: cfg.fovy_degrees.to_radians(),
            znear: cfg.znear,
            zfar: cfg.zfar,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// World to clip space; the shader's `view_proj` uniform.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Project a world point to normalized screen space (top-left origin).
    /// Returns `None` for points at or behind the eye.
    pub fn project_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5))
    }

    /// World-space ray through a normalized screen coordinate.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_ray(&self, uv: Vec2) -> (Vec3, Vec3) {
        let ndc_x = 2.0 * uv.x - 1.0;
        let ndc_y = 1.0 - 2.0 * uv.y;
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p1 - self.eye).normalize_or_zero();
        (self.eye, rd)
    }

    /// Intersect the pointer ray with the plane `z = plane_z`.
    pub fn pointer_on_plane(&self, uv: Vec2, plane_z: f32) -> Option<Vec3> {
        let (ro, rd) = self.screen_ray(uv);
        if rd.z.abs() <= 1e-6 {
            return None;
        }
        let t = (plane_z - ro.z) / rd.z;
        (t >= 0.0).then(|| ro + rd * t)
    }
}
