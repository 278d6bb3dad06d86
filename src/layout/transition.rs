//! Pose-preserving layout transitions.
//!
//! A transitioner owns the layout target of one managed node and drives the
//! node toward it a little each frame. When the target changes the layout
//! topology -- a different parent, or an axis flipping between set and unset
//! -- the node is reparented and its local TRS is back-solved from its
//! pre-change world pose, so the perceived pose never jumps; interpolation
//! then carries it toward the target over the following frames.

use glam::Mat4;
use log::debug;

use crate::error::Result;
use crate::ids::NodeId;
use crate::layout::resolve::{MIN_SIZE, resolve_layout};
use crate::layout::spec::{LayoutSpec, LayoutVec3};
use crate::scene::Scene;
use crate::structs::{Quaternion, Transform3D, Vector3};

/// Where a managed node should end up: an optional new parent, an explicit
/// local TRS, and the declarative layout directives.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutTarget {
    /// Target parent; `None` keeps the current parent.
    pub parent: Option<NodeId>,
    pub position: Vector3,
    pub rotation: Quaternion,
    pub scale: Vector3,
    pub align: LayoutVec3,
    pub origin: LayoutVec3,
    pub size: LayoutVec3,
}

impl LayoutTarget {
    pub fn new() -> Self {
        Self {
            parent: None,
            position: Vector3::zero(),
            rotation: Quaternion::identity(),
            scale: Vector3::one(),
            align: LayoutVec3::UNSET,
            origin: LayoutVec3::UNSET,
            size: LayoutVec3::UNSET,
        }
    }

    /// Reset to the defaults: keep parent, identity TRS, fully unset layout.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for LayoutTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one node's layout parameters toward a [`LayoutTarget`]. Callers
/// mutate `target` freely between frames and call [`update`](Self::update)
/// once per frame.
pub struct LayoutTransitioner {
    pub node: NodeId,
    pub target: LayoutTarget,
}

impl LayoutTransitioner {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            target: LayoutTarget::new(),
        }
    }

    /// Advance the node toward the target by `lerp_factor` in [0, 1].
    pub fn update(&self, scene: &mut Scene, lerp_factor: f32) -> Result<()> {
        let id = self.node;
        let target = &self.target;
        let lerp = lerp_factor.clamp(0.0, 1.0);

        if scene.node(id)?.layout.is_none() {
            scene.node_mut(id)?.layout = Some(LayoutSpec::new());
        }
        let node = scene.node(id)?;
        let current_parent = node.parent();
        let layout = node.layout.as_ref().expect("layout inserted above");

        let parent_changed = target.parent.is_some() && target.parent != current_parent;
        let topology_changed = parent_changed
            || !layout.align.definedness_matches(&target.align)
            || !layout.origin.definedness_matches(&target.origin)
            || !layout.size.definedness_matches(&target.size);

        if topology_changed {
            debug!(
                "layout topology change on node {id} (parent change: {parent_changed})"
            );
            // snapshot the pre-change world pose before touching anything
            let world = scene.world_matrix(id)?;
            if parent_changed {
                let new_parent = target.parent.expect("parent_changed implies Some");
                scene.set_parent(id, new_parent)?;
            }
            self.lerp_declarative(scene, lerp)?;
            // first resolve yields the scale the new spec implies
            resolve_layout(scene, id)?;
            let parent_world = match scene.parent_of(id)? {
                Some(p) => scene.world_matrix(p)?,
                None => Mat4::IDENTITY,
            };
            let local = Transform3D::from_mat4(parent_world.inverse() * world);
            {
                let node = scene.node_mut(id)?;
                let computed = node.layout.as_ref().expect("layout present").computed_scale;
                node.transform.rotation = local.rotation;
                node.transform.scale = safe_div(local.scale, computed);
            }
            // the new scale shifts the origin offset, so resolve again before
            // back-solving the position
            resolve_layout(scene, id)?;
            let node = scene.node_mut(id)?;
            let l = node.layout.as_ref().expect("layout present");
            node.transform.position =
                local.position - l.computed_align_offset - l.computed_origin_offset;
        } else {
            self.lerp_declarative(scene, lerp)?;
            let explicit = Transform3D::new(target.position, target.rotation, target.scale);
            scene.node_mut(id)?.transform.lerp_toward(&explicit, lerp);
            resolve_layout(scene, id)?;
        }
        Ok(())
    }

    fn lerp_declarative(&self, scene: &mut Scene, lerp: f32) -> Result<()> {
        let layout = scene
            .node_mut(self.node)?
            .layout
            .as_mut()
            .expect("layout present");
        layout.align.lerp_toward(&self.target.align, lerp);
        layout.origin.lerp_toward(&self.target.origin, lerp);
        layout.size.lerp_toward(&self.target.size, lerp);
        Ok(())
    }
}

/// Componentwise division with the denominator clamped away from zero.
fn safe_div(v: Vector3, by: Vector3) -> Vector3 {
    fn div(a: f32, b: f32) -> f32 {
        let denom = if b.abs() < MIN_SIZE { MIN_SIZE.copysign(b) } else { b };
        a / denom
    }
    Vector3::new(div(v.x, by.x), div(v.y, by.y), div(v.z, by.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;
    use crate::nodes::Node3D;
    use crate::structs::Aabb;

    fn unit_box(name: &str) -> Node3D {
        Node3D::new(name).with_extent(Aabb::from_center_size(Vector3::zero(), Vector3::one()))
    }

    fn framed_parent(scene: &mut Scene, name: &str, position: Vector3, scale: f32) -> NodeId {
        scene
            .spawn(
                Node3D::new(name)
                    .with_transform(Transform3D::new(
                        position,
                        Quaternion::identity(),
                        Vector3::splat(scale),
                    ))
                    .with_extent(Aabb::from_center_size(Vector3::zero(), Vector3::splat(2.0))),
                scene.root(),
            )
            .unwrap()
    }

    #[test]
    fn test_pose_preserved_on_reparent() {
        let mut scene = Scene::new();
        let a = framed_parent(&mut scene, "a", Vector3::new(5.0, 0.0, 0.0), 2.0);
        let b = framed_parent(&mut scene, "b", Vector3::new(-3.0, 1.0, 0.0), 0.5);
        let node = scene
            .spawn(
                unit_box("panel").with_layout(
                    LayoutSpec::new().with_align(LayoutVec3::splat(0.5)),
                ),
                a,
            )
            .unwrap();
        resolve_layout(&mut scene, node).unwrap();
        let before = scene.world_transform(node).unwrap();

        let mut transitioner = LayoutTransitioner::new(node);
        transitioner.target.parent = Some(b);
        transitioner.target.align = LayoutVec3::splat(0.5);
        transitioner.update(&mut scene, 1.0).unwrap();

        let after = scene.world_transform(node).unwrap();
        assert_eq!(scene.parent_of(node).unwrap(), Some(b));
        assert!(
            after.position.distance_to(before.position) < 1e-4,
            "world position moved: {:?} -> {:?}",
            before.position,
            after.position
        );
        assert!(after.scale.distance_to(before.scale) < 1e-4);
        assert!((after.rotation.dot(before.rotation).abs() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_pose_preserved_on_definedness_change() {
        let mut scene = Scene::new();
        let a = framed_parent(&mut scene, "a", Vector3::zero(), 1.0);
        let node = scene
            .spawn(unit_box("panel").with_layout(LayoutSpec::new()), a)
            .unwrap();
        resolve_layout(&mut scene, node).unwrap();
        let before = scene.world_transform(node).unwrap();

        // size flips from unset to set: topology change without reparent
        let mut transitioner = LayoutTransitioner::new(node);
        transitioner.target.size = LayoutVec3::splat(1.0);
        transitioner.update(&mut scene, 1.0).unwrap();

        let after = scene.world_transform(node).unwrap();
        assert!(after.position.distance_to(before.position) < 1e-4);
        assert!(after.scale.distance_to(before.scale) < 1e-4);
    }

    #[test]
    fn test_interpolation_converges_without_topology_change() {
        let mut scene = Scene::new();
        let node = scene.spawn(unit_box("n").with_layout(LayoutSpec::new()), scene.root()).unwrap();
        let mut transitioner = LayoutTransitioner::new(node);
        transitioner.target.position = Vector3::new(10.0, 0.0, 0.0);
        transitioner.update(&mut scene, 0.5).unwrap();
        assert!(
            scene.node(node).unwrap().transform.position
                .distance_to(Vector3::new(5.0, 0.0, 0.0))
                < 1e-5
        );
        transitioner.update(&mut scene, 0.5).unwrap();
        assert!(
            scene.node(node).unwrap().transform.position
                .distance_to(Vector3::new(7.5, 0.0, 0.0))
                < 1e-5
        );
        transitioner.update(&mut scene, 1.0).unwrap();
        assert!(
            scene.node(node).unwrap().transform.position
                .distance_to(Vector3::new(10.0, 0.0, 0.0))
                < 1e-5
        );
    }

    #[test]
    fn test_reparent_into_descendant_rejected() {
        let mut scene = Scene::new();
        let a = scene.spawn(Node3D::new("a"), scene.root()).unwrap();
        let b = scene.spawn(Node3D::new("b"), a).unwrap();
        let mut transitioner = LayoutTransitioner::new(a);
        transitioner.target.parent = Some(b);
        assert!(matches!(
            transitioner.update(&mut scene, 1.0),
            Err(SpatialError::CyclicParent { .. })
        ));
        // tree unchanged
        assert_eq!(scene.parent_of(b).unwrap(), Some(a));
    }
}
