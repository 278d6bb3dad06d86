use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::structs::vector3::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Serialize for Quaternion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x, self.y, self.z, self.w].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Quaternion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr = <[f32; 4]>::deserialize(deserializer)?;
        Ok(Quaternion::new(arr[0], arr[1], arr[2], arr[3]))
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.x, self.y, self.z, self.w
        )
    }
}

impl Quaternion {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }

    /// Converts this quaternion into a `glam::Quat`.
    pub fn to_glam(self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Creates a `Quaternion` from a `glam::Quat`.
    pub fn from_glam(q: glam::Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }

    /// Create quaternion from Euler angles in radians (pitch, yaw, roll).
    pub fn from_euler(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self::from_glam(glam::Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, roll))
    }

    /// Create quaternion from an axis and an angle in radians.
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        Self::from_glam(glam::Quat::from_axis_angle(
            axis.to_glam().normalize(),
            angle,
        ))
    }

    pub fn normalize(&self) -> Self {
        Self::from_glam(self.to_glam().normalize())
    }

    pub fn inverse(&self) -> Self {
        Self::from_glam(self.to_glam().inverse())
    }

    pub fn mul(&self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam() * rhs.to_glam())
    }

    pub fn dot(&self, rhs: Self) -> f32 {
        self.to_glam().dot(rhs.to_glam())
    }

    /// Angle in radians between the rotations represented by `self` and `rhs`.
    pub fn angle_to(&self, rhs: Self) -> f32 {
        2.0 * self.dot(rhs).abs().clamp(-1.0, 1.0).acos()
    }

    /// Spherical interpolation toward `target` by factor `t`.
    pub fn slerp(&self, target: Self, t: f32) -> Self {
        Self::from_glam(self.to_glam().slerp(target.to_glam(), t))
    }

    pub fn rotate_vec3(&self, v: Vector3) -> Vector3 {
        Vector3::from_glam(self.to_glam() * v.to_glam())
    }

    /// Extract the rotation axis and angle (radians). Identity yields a zero
    /// angle with an arbitrary axis.
    pub fn to_axis_angle(&self) -> (Vector3, f32) {
        let (axis, angle) = self.to_glam().to_axis_angle();
        (Vector3::from_glam(axis), angle)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}
