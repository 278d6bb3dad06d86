use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::structs::vector3::Vector3;

/// Axis-aligned bounding box with a representable empty state.
///
/// The empty box (`min = +INF`, `max = -INF`) is distinct from a zero-size
/// box at a point; every consumer must check `is_empty` before using the
/// center/size, since an empty box means "no geometric constraint".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vector3 {
            x: f32::INFINITY,
            y: f32::INFINITY,
            z: f32::INFINITY,
        },
        max: Vector3 {
            x: f32::NEG_INFINITY,
            y: f32::NEG_INFINITY,
            z: f32::NEG_INFINITY,
        },
    };

    pub fn from_min_max(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Box centered at `center` with the given full size per axis.
    pub fn from_center_size(center: Vector3, size: Vector3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Grow the box to include `point`.
    pub fn expand_point(&mut self, point: Vector3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Union of two boxes; the empty box is the identity element.
    pub fn union(&self, other: &Aabb) -> Aabb {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains_point(&self, point: Vector3) -> bool {
        !self.is_empty()
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        if other.is_empty() {
            return true;
        }
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Axis-aligned box of this box's eight corners mapped through `matrix`.
    /// An empty box stays empty.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        if self.is_empty() {
            return Aabb::EMPTY;
        }
        let mut out = Aabb::EMPTY;
        for corner in self.corners() {
            out.expand_point(Vector3::from_glam(
                matrix.transform_point3(corner.to_glam()),
            ));
        }
        out
    }

    /// The eight corner points. Undefined for an empty box.
    pub fn corners(&self) -> [Vector3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Bounding sphere (center, radius). Radius is 0 for an empty box.
    pub fn bounding_sphere(&self) -> (Vector3, f32) {
        if self.is_empty() {
            return (Vector3::zero(), 0.0);
        }
        (self.center(), self.size().length() * 0.5)
    }

    /// Convert a normalized [-1, 1] offset within this box to a position:
    /// `center + offset * 0.5 * size`. Empty box yields zero (no constraint).
    pub fn position_for_offset(&self, offset: Vector3) -> Vector3 {
        if self.is_empty() {
            return Vector3::zero();
        }
        self.center() + offset * 0.5 * self.size()
    }

    /// Inverse of [`Self::position_for_offset`]: normalized [-1, 1] offset of a
    /// position within this box. Zero-size axes and the empty box yield zero.
    pub fn offset_for_position(&self, position: Vector3) -> Vector3 {
        if self.is_empty() {
            return Vector3::zero();
        }
        let size = self.size();
        let rel = position - self.center();
        let mut out = Vector3::zero();
        for axis in crate::structs::vector3::Axis::ALL {
            let s = size.axis(axis);
            if s > 0.0 {
                out.set_axis(axis, rel.axis(axis) / (0.5 * s));
            }
        }
        out
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
