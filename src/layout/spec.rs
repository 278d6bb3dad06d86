//! Declarative placement directives and their computed results.

use serde::{Deserialize, Serialize};

use crate::structs::{Aabb, Axis, Vector3};

/// A per-axis optional value used for `align`/`origin`/`size` directives.
///
/// An unset axis means "derive from context": unset align/origin axes add no
/// offset, unset size axes take the average scale of the set axes. This
/// replaces NaN-sentinel components so unset-ness never leaks into
/// arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutVec3 {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl LayoutVec3 {
    pub const UNSET: LayoutVec3 = LayoutVec3 {
        x: None,
        y: None,
        z: None,
    };

    pub fn new(x: Option<f32>, y: Option<f32>, z: Option<f32>) -> Self {
        Self { x, y, z }
    }

    /// All three axes set to `v`.
    pub fn splat(v: f32) -> Self {
        Self::new(Some(v), Some(v), Some(v))
    }

    pub fn axis(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: Option<f32>) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    pub fn is_fully_unset(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// True when the same axes are set in both operands, regardless of value.
    pub fn definedness_matches(&self, other: &LayoutVec3) -> bool {
        self.x.is_some() == other.x.is_some()
            && self.y.is_some() == other.y.is_some()
            && self.z.is_some() == other.z.is_some()
    }

    /// Interpolate toward `target` in place. When either operand of an axis
    /// is unset, that axis resolves to the target's value directly (including
    /// becoming unset) instead of blending against an undefined number.
    pub fn lerp_toward(&mut self, target: &LayoutVec3, t: f32) {
        for axis in Axis::ALL {
            let next = match (self.axis(axis), target.axis(axis)) {
                (Some(a), Some(b)) => Some(a + (b - a) * t),
                (_, tgt) => tgt,
            };
            self.set_axis(axis, next);
        }
    }
}

/// Declarative layout parameters of one managed node, plus the concrete
/// offsets/scale computed from them each layout pass.
///
/// `align` selects an anchor point within the parent's bounds, `origin`
/// selects the point of the node's own bounds pulled onto that anchor, and
/// `size` scales the node's bounds relative to the parent's (all normalized,
/// align/origin in [-1, 1]). Computed fields are overwritten every pass and
/// must not be read before [`resolve_layout`](crate::layout::resolve_layout)
/// has run for the current frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub align: LayoutVec3,
    pub origin: LayoutVec3,
    pub size: LayoutVec3,

    pub computed_align_offset: Vector3,
    pub computed_origin_offset: Vector3,
    pub computed_scale: Vector3,
    pub computed_parent_bounds: Aabb,
    pub computed_own_bounds: Aabb,
}

impl LayoutSpec {
    pub fn new() -> Self {
        Self {
            align: LayoutVec3::UNSET,
            origin: LayoutVec3::UNSET,
            size: LayoutVec3::UNSET,
            computed_align_offset: Vector3::zero(),
            computed_origin_offset: Vector3::zero(),
            computed_scale: Vector3::one(),
            computed_parent_bounds: Aabb::EMPTY,
            computed_own_bounds: Aabb::EMPTY,
        }
    }

    pub fn with_align(mut self, align: LayoutVec3) -> Self {
        self.align = align;
        self
    }

    pub fn with_origin(mut self, origin: LayoutVec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_size(mut self, size: LayoutVec3) -> Self {
        self.size = size;
        self
    }

    /// A passive layout leaves the node's transform untouched.
    pub fn is_passive(&self) -> bool {
        self.align.is_fully_unset() && self.origin.is_fully_unset() && self.size.is_fully_unset()
    }

    /// Reset computed fields to the neutral values used for passive layouts
    /// and empty bounds.
    pub fn reset_computed(&mut self) {
        self.computed_align_offset = Vector3::zero();
        self.computed_origin_offset = Vector3::zero();
        self.computed_scale = Vector3::one();
        self.computed_parent_bounds = Aabb::EMPTY;
        self.computed_own_bounds = Aabb::EMPTY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definedness() {
        let a = LayoutVec3::new(Some(0.0), None, Some(1.0));
        let b = LayoutVec3::new(Some(0.5), None, Some(-1.0));
        let c = LayoutVec3::new(Some(0.5), Some(0.5), Some(-1.0));
        assert!(a.definedness_matches(&b));
        assert!(!a.definedness_matches(&c));
    }

    #[test]
    fn test_lerp_toward_blends_defined_axes() {
        let mut v = LayoutVec3::splat(0.0);
        v.lerp_toward(&LayoutVec3::splat(1.0), 0.25);
        assert_eq!(v, LayoutVec3::splat(0.25));
    }

    #[test]
    fn test_lerp_toward_resolves_unset_axes() {
        // unset -> set snaps to the target value
        let mut v = LayoutVec3::new(None, Some(0.0), Some(0.0));
        let target = LayoutVec3::new(Some(1.0), None, Some(2.0));
        v.lerp_toward(&target, 0.5);
        assert_eq!(v.x, Some(1.0));
        // set -> unset becomes unset
        assert_eq!(v.y, None);
        assert_eq!(v.z, Some(1.0));
    }

    #[test]
    fn test_passive_spec() {
        assert!(LayoutSpec::new().is_passive());
        assert!(!LayoutSpec::new().with_size(LayoutVec3::splat(1.0)).is_passive());
    }
}
