use glam::Mat4;

use crate::ids::NodeId;
use crate::layout::frame::FrameBinding;
use crate::layout::spec::LayoutSpec;
use crate::structs::{Aabb, Transform3D};

/// Projection carried by camera nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    matrix: Mat4,
}

impl Projection {
    /// Right-handed perspective projection (camera looks down -Z).
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            matrix: Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, near, far),
        }
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn inverse(&self) -> Mat4 {
        self.matrix.inverse()
    }
}

/// A scene-graph node: local TRS transform, tree links, and the optional
/// pieces the layout engine reads -- a renderable extent, a camera
/// projection, a reference-frame binding, and an owned layout spec.
///
/// Tree links are private; structural mutation goes through
/// [`Scene`](crate::scene::Scene) so parent/child lists stay consistent and
/// cyclic reparenting is rejected.
#[derive(Clone, Debug)]
pub struct Node3D {
    pub name: String,
    pub transform: Transform3D,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    /// Local-space extent of this node's renderable geometry, if any.
    pub extent: Option<Aabb>,
    /// Present on camera nodes.
    pub projection: Option<Projection>,
    pub frame: FrameBinding,
    /// Layout managed by this node, making it a bounding context: its subtree
    /// is excluded from ancestors' bounds unions.
    pub layout: Option<LayoutSpec>,
    /// Excluded from bounds unions without being a bounding context.
    pub layout_ignore: bool,
}

impl Node3D {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform3D::default(),
            parent: None,
            children: Vec::new(),
            extent: None,
            projection: None,
            frame: FrameBinding::Inherit,
            layout: None,
            layout_ignore: false,
        }
    }

    /// Camera node with a perspective projection.
    pub fn camera(name: impl Into<String>, fov_y_degrees: f32, aspect: f32) -> Self {
        let mut node = Self::new(name);
        node.projection = Some(Projection::perspective(fov_y_degrees, aspect, 0.1, 1000.0));
        node
    }

    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_extent(mut self, extent: Aabb) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_layout(mut self, layout: LayoutSpec) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn is_camera(&self) -> bool {
        self.projection.is_some()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl Default for Node3D {
    fn default() -> Self {
        Self::new("")
    }
}
