//! 32-bit node identifiers issued sequentially by the scene.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a scene node. `0` is reserved as the nil id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn nil() -> Self {
        Self(0)
    }

    pub fn from_u32(value: u32) -> Self {
        Self(value)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil() {
        let nil = NodeId::nil();
        assert_eq!(nil.as_u32(), 0);
        assert!(nil.is_nil());
        assert!(!NodeId::from_u32(1).is_nil());
    }

    #[test]
    fn test_ordering() {
        assert!(NodeId::from_u32(1) < NodeId::from_u32(2));
    }
}
