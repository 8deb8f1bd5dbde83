//! Geometric utility functions for 3D poses, orientations and easing.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A world-space position/rotation pair.
///
/// Used for dart transforms, hand poses and grab-point offsets. Reparenting
/// and constraint math all go through this type instead of a scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// World-space rotation.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The identity pose (origin, no rotation).
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a pose from a position and rotation.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Transforms a local-space point into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Composes a local offset pose onto this pose.
    ///
    /// The result is the world pose an object attached at `local` would have.
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.transform_point(local.position),
            rotation: self.rotation * local.rotation,
        }
    }

    /// Blends this pose toward `target` by `factor` (lerp for position,
    /// slerp for rotation).
    pub fn blend_toward(&mut self, target: &Pose, factor: f32) {
        self.position = self.position.lerp(target.position, factor);
        self.rotation = self.rotation.slerp(target.rotation, factor);
    }
}

/// Builds a rotation whose local +Z axis points along `forward` with the
/// local +Y axis aligned to `up` as closely as possible.
///
/// `forward` must be non-zero; `up` must not be parallel to `forward`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let forward = forward.normalize();
    let right = up.cross(forward).normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Computes the rest orientation of a dart embedded in a surface.
///
/// The dart faces along the inverted surface normal. The up reference comes
/// from crossing the facing with world-right; when the facing is nearly
/// parallel to world-right that cross product degenerates, so world-forward
/// is used instead.
pub fn stick_rotation(surface_normal: Vec3) -> Quat {
    let facing = -surface_normal;

    let mut up = facing.cross(Vec3::X);
    if up.length() < 0.01 {
        up = facing.cross(Vec3::Z);
    }

    look_rotation(facing, up.normalize())
}

/// Hermite smoothstep easing, `t * t * (3 - 2t)`, for `t` in `[0, 1]`.
pub fn smooth_step(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
