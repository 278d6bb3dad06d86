use thiserror::Error;

use crate::ids::NodeId;

/// Result type alias for spatial layout and classification operations
pub type Result<T> = std::result::Result<T, SpatialError>;

/// Errors that can occur in the layout and classification engine
#[derive(Error, Debug)]
pub enum SpatialError {
    #[error("metric function returned a non-finite value: {0}")]
    InvalidMetric(f32),

    #[error("projective operation requested on non-camera node {0}")]
    NotACamera(NodeId),

    #[error("cannot reparent node {child} under {parent}: target is the node itself or one of its descendants")]
    CyclicParent { child: NodeId, parent: NodeId },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("unknown node id: {0}")]
    UnknownNode(NodeId),
}
