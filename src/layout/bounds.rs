//! Hierarchical bounds resolution.
//!
//! Computes the axis-aligned bounding volume of a scene-graph subtree in a
//! chosen reference space. Descendants that own a layout are bounding
//! contexts: their bounds are computed independently when needed, so they are
//! excluded from ancestors' unions (this also breaks the recursion between a
//! parent's and a managed child's layout passes).

use glam::Mat4;
use smallvec::SmallVec;

use crate::error::{Result, SpatialError};
use crate::ids::NodeId;
use crate::scene::Scene;
use crate::structs::{Aabb, Vector3};

/// Union of the renderable leaf extents of the subtree rooted at `node`,
/// expressed in `frame`'s local space (world space when `frame` is `None`).
///
/// Nodes marked `layout_ignore` and subtrees rooted at a bounding context
/// (other than `node` itself) are skipped. Returns the empty box when the
/// subtree holds no geometry; callers must treat that as "no constraint".
pub fn compute_bounds(scene: &Scene, node: NodeId, frame: Option<NodeId>) -> Result<Aabb> {
    let into_frame = match frame {
        Some(f) => scene.world_matrix(f)?.inverse(),
        None => Mat4::IDENTITY,
    };

    let mut out = Aabb::EMPTY;
    let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
    stack.push(node);
    while let Some(id) = stack.pop() {
        let n = scene.node(id)?;
        if id != node && (n.layout.is_some() || n.layout_ignore) {
            continue;
        }
        if let Some(extent) = n.extent {
            let leaf_to_frame = into_frame * scene.world_matrix(id)?;
            out = out.union(&extent.transformed(&leaf_to_frame));
        }
        stack.extend(n.children.iter().copied());
    }
    Ok(out)
}

/// The box spanned by a projective camera's visible frustum slice at `depth`
/// meters in front of the camera, in camera-local space.
///
/// Back-projects the four near-plane NDC corners through the inverse
/// projection and scales each ray to the requested depth, so a child of a
/// camera can express align/origin in NDC-like [-1, 1] terms. A non-positive
/// depth yields the empty box.
pub fn bounds_at_depth(scene: &Scene, camera: NodeId, depth: f32) -> Result<Aabb> {
    let node = scene.node(camera)?;
    let projection = node
        .projection
        .as_ref()
        .ok_or(SpatialError::NotACamera(camera))?;
    if depth <= 0.0 {
        return Ok(Aabb::EMPTY);
    }
    let inverse = projection.inverse();
    let mut out = Aabb::EMPTY;
    for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        let ray = inverse.project_point3(glam::Vec3::new(x, y, -1.0));
        if ray.z >= 0.0 {
            continue;
        }
        // scale the corner ray onto the plane z = -depth
        out.expand_point(Vector3::from_glam(ray * (depth / -ray.z)));
    }
    Ok(out)
}
