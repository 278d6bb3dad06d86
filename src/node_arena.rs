use crate::ids::NodeId;
use crate::nodes::Node3D;

/// Arena-based storage for scene nodes.
/// Uses a Vec<Option<Node3D>> indexed by NodeId for O(1) lookups.
/// Ids are issued sequentially and 0 is reserved, so the id value maps
/// directly to a slot index.
pub struct NodeArena {
    slots: Vec<Option<Node3D>>,
    live: u32,
}

impl NodeArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Insert a node and issue it a fresh id.
    pub fn alloc(&mut self, node: Node3D) -> NodeId {
        self.slots.push(Some(node));
        self.live += 1;
        // NodeId 0 is reserved (nil), so slot 0 maps to id 1
        NodeId::from_u32(self.slots.len() as u32)
    }

    /// Get a reference to the node (if present).
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node3D> {
        let id_val = id.as_u32();
        if id_val == 0 {
            return None;
        }
        self.slots.get((id_val as usize) - 1)?.as_ref()
    }

    /// Get a mutable reference to the node (if present).
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node3D> {
        let id_val = id.as_u32();
        if id_val == 0 {
            return None;
        }
        self.slots.get_mut((id_val as usize) - 1)?.as_mut()
    }

    /// Remove a node, leaving a hole (`None`).
    #[inline]
    pub fn remove(&mut self, id: NodeId) -> Option<Node3D> {
        let id_val = id.as_u32();
        if id_val == 0 {
            return None;
        }
        let slot = self.slots.get_mut((id_val as usize) - 1)?;
        let out = slot.take()?;
        self.live -= 1;
        Some(out)
    }

    /// Get the number of live nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.live as usize
    }

    /// Check if the arena is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterate over all live nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node3D)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref()
                .map(|node| (NodeId::from_u32((idx + 1) as u32), node))
        })
    }

    /// Get all node ids in the arena.
    pub fn keys(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref().map(|_| NodeId::from_u32((idx + 1) as u32))
        })
    }

    /// Check if a node with the given id exists.
    #[inline]
    pub fn contains_key(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
