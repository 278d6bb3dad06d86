//! Layout resolution: turns declarative align/origin/size directives into
//! concrete local transforms.
//!
//! Runs once per managed node per frame, parents before children. Bounds are
//! pulled bottom-up on demand; a child placed later in the same frame
//! contributes its previous-frame bounds to its parent, a known one-frame lag
//! that is tolerated visually.

use glam::Mat4;

use crate::error::Result;
use crate::ids::NodeId;
use crate::layout::bounds::{bounds_at_depth, compute_bounds};
use crate::layout::frame::resolve_frame;
use crate::scene::Scene;
use crate::structs::{Aabb, Axis, ScratchPool, Vector3};

/// Smallest denominator admitted when deriving a scale from bounds sizes;
/// zero-size axes clamp here instead of producing infinities.
pub const MIN_SIZE: f32 = 1e-5;

/// Resolve the layout of one managed node and write the computed offsets and
/// scale into its [`LayoutSpec`](crate::layout::LayoutSpec). A node without a
/// layout, or with a fully-unset one, is left untouched (passive layout).
pub fn resolve_layout(scene: &mut Scene, id: NodeId) -> Result<()> {
    let node = scene.node(id)?;
    let Some(layout) = node.layout.clone() else {
        return Ok(());
    };
    if layout.is_passive() {
        if let Some(l) = scene.node_mut(id)?.layout.as_mut() {
            l.reset_computed();
        }
        return Ok(());
    }

    let parent = node.parent();
    let node_scale = node.transform.scale;
    let frame = resolve_frame(scene, id)?;
    let parent_is_camera = match parent {
        Some(p) => scene.node(p)?.is_camera(),
        None => false,
    };

    // Bounds available from the parent, in parent space. A projective camera
    // parent exposes its frustum slice at the depth requested by align.z; a
    // regular parent exposes the union of its non-managed geometry, unioned in
    // the resolved frame's space and re-expressed in parent space.
    let parent_bounds = match parent {
        Some(p) if parent_is_camera => {
            let depth = layout.align.z.map(|z| -z).unwrap_or(0.0);
            bounds_at_depth(scene, p, depth)?
        }
        Some(p) => {
            let union_frame = frame.unwrap_or(p);
            let in_frame = compute_bounds(scene, p, Some(union_frame))?;
            if union_frame == p {
                in_frame
            } else {
                let frame_to_parent =
                    scene.world_matrix(p)?.inverse() * scene.world_matrix(union_frame)?;
                in_frame.transformed(&frame_to_parent)
            }
        }
        None => Aabb::EMPTY,
    };

    // Own bounds in the node's local space, where its own scale does not yet
    // apply; this keeps the size -> scale derivation free of feedback.
    let own_bounds = compute_bounds(scene, id, Some(id))?;

    let computed_scale = derive_scale(&layout.size, &parent_bounds, &own_bounds);
    let align_offset = if parent_is_camera {
        camera_align_offset(scene, parent, &layout.align)?
    } else {
        partial_offset(&parent_bounds, &layout.align)
    };
    let origin_offset =
        -partial_offset(&own_bounds, &layout.origin) * node_scale * computed_scale;

    let l = scene
        .node_mut(id)?
        .layout
        .as_mut()
        .expect("layout presence checked above");
    l.computed_scale = computed_scale;
    l.computed_align_offset = align_offset;
    l.computed_origin_offset = origin_offset;
    l.computed_parent_bounds = parent_bounds;
    l.computed_own_bounds = own_bounds;
    Ok(())
}

/// Per-axis `parent_size * size / own_size` for set axes; unset axes take the
/// average of the set axes' results so partial sizing behaves uniformly.
/// Empty bounds mean no constraint: unit scale.
fn derive_scale(
    size: &crate::layout::LayoutVec3,
    parent_bounds: &Aabb,
    own_bounds: &Aabb,
) -> Vector3 {
    if parent_bounds.is_empty() || own_bounds.is_empty() {
        return Vector3::one();
    }
    let psize = parent_bounds.size();
    let osize = own_bounds.size();
    let mut per_axis = [None; 3];
    let mut sum = 0.0;
    let mut count = 0usize;
    for (slot, axis) in per_axis.iter_mut().zip(Axis::ALL) {
        if let Some(s) = size.axis(axis) {
            let value = psize.axis(axis) * s / osize.axis(axis).max(MIN_SIZE);
            *slot = Some(value);
            sum += value;
            count += 1;
        }
    }
    if count == 0 {
        return Vector3::one();
    }
    let average = sum / count as f32;
    let mut out = Vector3::one();
    for (slot, axis) in per_axis.iter().zip(Axis::ALL) {
        out.set_axis(axis, slot.unwrap_or(average));
    }
    out
}

/// `center + offset * 0.5 * size` on set axes, zero on unset axes and for
/// empty bounds.
fn partial_offset(bounds: &Aabb, offset: &crate::layout::LayoutVec3) -> Vector3 {
    if bounds.is_empty() {
        return Vector3::zero();
    }
    let center = bounds.center();
    let size = bounds.size();
    let mut out = Vector3::zero();
    for axis in Axis::ALL {
        if let Some(v) = offset.axis(axis) {
            out.set_axis(axis, center.axis(axis) + v * 0.5 * size.axis(axis));
        }
    }
    out
}

/// Anchor for a child of a projective camera: the align.x/y point
/// back-projected through the inverse projection and pushed out onto the
/// plane at the depth requested by align.z, so Z sits exactly at that depth.
fn camera_align_offset(
    scene: &Scene,
    parent: Option<NodeId>,
    align: &crate::layout::LayoutVec3,
) -> Result<Vector3> {
    let Some(p) = parent else {
        return Ok(Vector3::zero());
    };
    let depth = align.z.map(|z| -z).unwrap_or(0.0);
    if depth <= 0.0 {
        return Ok(Vector3::zero());
    }
    let node = scene.node(p)?;
    let inverse: Mat4 = match &node.projection {
        Some(projection) => projection.inverse(),
        None => return Ok(Vector3::zero()),
    };
    let ndc = glam::Vec3::new(align.x.unwrap_or(0.0), align.y.unwrap_or(0.0), -1.0);
    let ray = inverse.project_point3(ndc);
    if ray.z >= 0.0 {
        return Ok(Vector3::zero());
    }
    Ok(Vector3::from_glam(ray * (depth / -ray.z)))
}

/// Frame driver for the layout step: resolves every managed node in the scene
/// in parent-before-child order.
pub struct LayoutPass {
    order: ScratchPool<NodeId>,
}

impl LayoutPass {
    pub fn new() -> Self {
        Self {
            order: ScratchPool::new(),
        }
    }

    /// Resolve all managed nodes for this frame.
    pub fn update(&mut self, scene: &mut Scene) -> Result<()> {
        let mut order = self.order.take();
        order.push(scene.root());
        let mut cursor = 0;
        while cursor < order.len() {
            let id = order[cursor];
            cursor += 1;
            order.extend_from_slice(scene.children_of(id)?);
        }
        for idx in 0..order.len() {
            let id = order[idx];
            if scene.node(id)?.layout.is_some() {
                resolve_layout(scene, id)?;
            }
        }
        Ok(())
    }
}

impl Default for LayoutPass {
    fn default() -> Self {
        Self::new()
    }
}
