//! Reference-frame resolution.
//!
//! A reference frame is the ancestor node whose local space is used as the
//! common basis for bounds and offset comparisons across a subtree. Frames
//! are inherited down the tree unless a node carries an explicit binding.

use crate::error::Result;
use crate::ids::NodeId;
use crate::scene::Scene;

/// Per-node reference-frame binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameBinding {
    /// Inherit the nearest ancestor's binding (the default).
    #[default]
    Inherit,
    /// Explicitly no frame: bounds/offsets use the node's own parent space.
    Unframed,
    /// Use the given node's local space as the frame.
    Frame(NodeId),
}

/// Walk from `node` up through its ancestors and return the nearest explicit
/// frame binding. Returns `None` when the root is reached with every binding
/// left at `Inherit`, or when the nearest binding is `Unframed` -- both mean
/// "use the node's own immediate parent space". O(depth), side-effect-free.
pub fn resolve_frame(scene: &Scene, node: NodeId) -> Result<Option<NodeId>> {
    let mut current = Some(node);
    while let Some(id) = current {
        let n = scene.node(id)?;
        match n.frame {
            FrameBinding::Inherit => current = n.parent(),
            FrameBinding::Unframed => return Ok(None),
            FrameBinding::Frame(frame) => return Ok(Some(frame)),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Node3D;

    #[test]
    fn test_inherited_and_overridden_frames() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn(Node3D::new("a"), root).unwrap();
        let b = scene.spawn(Node3D::new("b"), a).unwrap();
        let c = scene.spawn(Node3D::new("c"), b).unwrap();

        // no bindings anywhere: parent space
        assert_eq!(resolve_frame(&scene, c).unwrap(), None);

        // a binds a frame; b and c inherit it
        scene.node_mut(a).unwrap().frame = FrameBinding::Frame(root);
        assert_eq!(resolve_frame(&scene, c).unwrap(), Some(root));
        assert_eq!(resolve_frame(&scene, a).unwrap(), Some(root));

        // b opts out explicitly, shadowing a's binding for its subtree
        scene.node_mut(b).unwrap().frame = FrameBinding::Unframed;
        assert_eq!(resolve_frame(&scene, c).unwrap(), None);
        assert_eq!(resolve_frame(&scene, a).unwrap(), Some(root));
    }
}
