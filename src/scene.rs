//! Minimal scene-graph service: arena storage, tree structure, and
//! world-transform composition.
//!
//! This is the collaborator surface the layout engine consumes. Structural
//! mutation goes through [`Scene`] so parent/child links stay consistent and
//! cyclic reparenting is rejected; world matrices are composed on demand by
//! walking the ancestor chain, so a caller can never observe a stale parent
//! matrix.

use glam::Mat4;
use log::debug;
use smallvec::SmallVec;

use crate::error::{Result, SpatialError};
use crate::ids::NodeId;
use crate::node_arena::NodeArena;
use crate::nodes::Node3D;
use crate::structs::{Quaternion, Transform3D, Vector3};

pub struct Scene {
    arena: NodeArena,
    root: NodeId,
}

impl Scene {
    /// Create a scene containing only a root node.
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node3D::new("root"));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Insert `node` as a child of `parent` and return its id.
    pub fn spawn(&mut self, node: Node3D, parent: NodeId) -> Result<NodeId> {
        if !self.arena.contains_key(parent) {
            return Err(SpatialError::UnknownNode(parent));
        }
        let id = self.arena.alloc(node);
        // both links: child -> parent and parent -> child
        if let Some(n) = self.arena.get_mut(id) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.arena.get_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node3D> {
        self.arena.get(id).ok_or(SpatialError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node3D> {
        self.arena.get_mut(id).ok_or(SpatialError::UnknownNode(id))
    }

    pub fn parent_of(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children_of(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// True when `node` is inside the subtree rooted at `ancestor`
    /// (a node is a descendant of itself).
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.arena.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Structural reparent. The node keeps its local transform, so its world
    /// pose generally changes; pose-preserving reparents are the
    /// transitioner's job. Fails with `CyclicParent` when `new_parent` is the
    /// node itself or one of its descendants.
    pub fn set_parent(&mut self, child: NodeId, new_parent: NodeId) -> Result<()> {
        if !self.arena.contains_key(child) {
            return Err(SpatialError::UnknownNode(child));
        }
        if !self.arena.contains_key(new_parent) {
            return Err(SpatialError::UnknownNode(new_parent));
        }
        if self.is_descendant_of(new_parent, child) {
            return Err(SpatialError::CyclicParent {
                child,
                parent: new_parent,
            });
        }
        let old_parent = self.node(child)?.parent;
        if old_parent == Some(new_parent) {
            return Ok(());
        }
        if let Some(old) = old_parent {
            if let Some(p) = self.arena.get_mut(old) {
                p.children.retain(|c| *c != child);
            }
        }
        if let Some(p) = self.arena.get_mut(new_parent) {
            p.children.push(child);
        }
        if let Some(n) = self.arena.get_mut(child) {
            n.parent = Some(new_parent);
        }
        debug!("reparented node {child} under {new_parent}");
        Ok(())
    }

    /// Remove a node and its whole subtree. Layout state owned by removed
    /// nodes is dropped with them. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(SpatialError::Configuration(
                "cannot remove the root node".into(),
            ));
        }
        let node = self.node(id)?;
        if let Some(parent) = node.parent {
            if let Some(p) = self.arena.get_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children.iter().copied());
            }
        }
        Ok(())
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Ids of every node in the scene.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena.keys()
    }

    /// Effective local matrix: the node's own TRS composed with the computed
    /// layout offsets and scale, when a layout is present.
    pub fn local_matrix(&self, id: NodeId) -> Result<Mat4> {
        let node = self.node(id)?;
        let mut t = node.transform;
        if let Some(layout) = &node.layout {
            t.position = t.position + layout.computed_align_offset + layout.computed_origin_offset;
            t.scale = t.scale * layout.computed_scale;
        }
        Ok(t.to_mat4())
    }

    /// World matrix composed root-down along the ancestor chain.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4> {
        let mut chain: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.node(node)?.parent;
        }
        let mut world = Mat4::IDENTITY;
        for node in chain.iter().rev() {
            world *= self.local_matrix(*node)?;
        }
        Ok(world)
    }

    pub fn world_transform(&self, id: NodeId) -> Result<Transform3D> {
        Ok(Transform3D::from_mat4(self.world_matrix(id)?))
    }

    pub fn world_position(&self, id: NodeId) -> Result<Vector3> {
        Ok(self.world_transform(id)?.position)
    }

    pub fn world_rotation(&self, id: NodeId) -> Result<Quaternion> {
        Ok(self.world_transform(id)?.rotation)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
