use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::structs::quaternion::Quaternion;
use crate::structs::vector3::Vector3;

fn default_position() -> Vector3 {
    Vector3::zero()
}
fn is_default_position(v: &Vector3) -> bool {
    *v == default_position()
}

fn default_rotation() -> Quaternion {
    Quaternion::identity()
}
fn is_default_rotation(v: &Quaternion) -> bool {
    *v == default_rotation()
}

fn default_scale() -> Vector3 {
    Vector3::one()
}
fn is_default_scale(v: &Vector3) -> bool {
    *v == default_scale()
}

/// Local 3D transform of a scene node.
///
/// Includes position (`Vector3`), rotation (`Quaternion`), and scale (`Vector3`).
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub struct Transform3D {
    #[serde(
        default = "default_position",
        skip_serializing_if = "is_default_position"
    )]
    pub position: Vector3,

    #[serde(
        default = "default_rotation",
        skip_serializing_if = "is_default_rotation"
    )]
    pub rotation: Quaternion,

    #[serde(default = "default_scale", skip_serializing_if = "is_default_scale")]
    pub scale: Vector3,
}

impl Transform3D {
    /// Create a new `Transform3D`
    pub fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Translation-only transform.
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Check whether all components are default.
    pub fn is_default(&self) -> bool {
        is_default_position(&self.position)
            && is_default_rotation(&self.rotation)
            && is_default_scale(&self.scale)
    }

    /// Converts to a `glam::Mat4` (Scale -> Rotate -> Translate)
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.to_glam(),
            self.rotation.to_glam(),
            self.position.to_glam(),
        )
    }

    /// Converts a `Mat4` back into a `Transform3D`
    /// (approximation for non-uniform scaling under rotation)
    pub fn from_mat4(mat: Mat4) -> Self {
        let (scale, rotation, position) = mat.to_scale_rotation_translation();
        Transform3D {
            position: Vector3::from_glam(position),
            rotation: Quaternion::from_glam(rotation),
            scale: Vector3::from_glam(scale),
        }
    }

    /// Combine two transforms (like multiplying matrices)
    pub fn composed(&self, other: &Transform3D) -> Transform3D {
        let new_pos = self.position + self.rotation.rotate_vec3(other.position * self.scale);
        let new_rot = self.rotation.mul(other.rotation);
        let new_scale = self.scale * other.scale;
        Transform3D {
            position: new_pos,
            rotation: new_rot,
            scale: new_scale,
        }
    }

    /// Interpolate in place toward `target`: position/scale lerp, rotation slerp.
    pub fn lerp_toward(&mut self, target: &Transform3D, t: f32) {
        self.position = self.position.lerp(target.position, t);
        self.scale = self.scale.lerp(target.scale, t);
        self.rotation = self.rotation.slerp(target.rotation, t);
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}
