use std::ops::{Index, IndexMut};

/// The key type stored in an [`RBTree`](super::RBTree).
pub type Key = i32;

/// Key reported by sentinel nodes. It is not a valid key, it only exists so that a sentinel can be inspected like any other node.
pub const SENTINEL_KEY: Key = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }
}

/// Which child slot of a data node something hangs off of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A handle to a node owned by an [`RBTree`](super::RBTree).
///
/// Handles are cheap to copy and never keep a node alive. Once the node they point to is removed from the tree,
/// resolving the handle yields `None`, even if the underlying slot has since been reused for another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Either a data node (a real key with exactly two children) or a sentinel leaf (always black, no children).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: Key,
    color: Color,
    parent: Option<NodeId>,
    // `None` means this node is a sentinel. A data node always has both slots filled.
    children: Option<[NodeId; 2]>,
}

impl Node {
    pub fn key(&self) -> Key {
        self.key
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_data(&self) -> bool {
        self.children.is_some()
    }

    /// The structural parent, `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        self.children.map(|c| c[side as usize])
    }

    pub fn left(&self) -> Option<NodeId> {
        self.child(Side::Left)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.child(Side::Right)
    }
}


#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every node of a tree, data nodes and sentinels alike.
///
/// Parent and child links are plain [`NodeId`]s into this arena, so there is no shared ownership between
/// a node and its parent. Freed slots are recycled through a free list; bumping the slot's generation on
/// every free is what invalidates outstanding handles.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl NodeStore {
    /// Number of nodes (data + sentinel) currently allocated.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation { return None }
        slot.node.as_ref()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.node.is_none(), "free list pointed at an occupied slot");
            slot.node = Some(node);
            return NodeId { index, generation: slot.generation }
        }

        let index = u32::try_from(self.slots.len()).expect("more than u32::MAX tree nodes");
        self.slots.push(Slot { generation: 0, node: Some(node) });
        NodeId { index, generation: 0 }
    }

    /// Allocates a fresh (black, childless) sentinel.
    pub fn alloc_leaf(&mut self, parent: Option<NodeId>) -> NodeId {
        self.alloc(Node {
            key: SENTINEL_KEY,
            color: Color::Black,
            parent,
            children: None,
        })
    }

    /// Allocates a data node together with its two fresh sentinel children.
    pub fn alloc_data(&mut self, key: Key, color: Color, parent: Option<NodeId>) -> NodeId {
        let id = self.alloc(Node { key, color, parent, children: None });
        let left = self.alloc_leaf(Some(id));
        let right = self.alloc_leaf(Some(id));
        self[id].children = Some([left, right]);
        id
    }

    /// Removes a node from the arena, killing every handle to it. Its children (if any) are left untouched.
    pub fn free(&mut self, id: NodeId) -> Node {
        let slot = &mut self.slots[id.index as usize];
        assert_eq!(slot.generation, id.generation, "freeing a node that was already freed");
        let node = slot.node.take().expect("freeing an empty slot");

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        node
    }

    /// Frees every node at once. Slots are kept (with bumped generations) so old handles stay dead.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        self.live = 0;
    }

    // structural accessors used by the rebalancing code

    pub fn color(&self, id: NodeId) -> Color {
        self[id].color
    }

    pub fn is_red(&self, id: NodeId) -> bool {
        self[id].color.is_red()
    }

    pub fn is_black(&self, id: NodeId) -> bool {
        self[id].color.is_black()
    }

    pub fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(self[id].is_data() || color.is_black(), "sentinels are always black");
        self[id].color = color;
    }

    pub fn set_key(&mut self, id: NodeId, key: Key) {
        self[id].key = key;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self[id].parent = parent;
    }

    /// The child of a data node. Asking a sentinel for a child is a bug in the caller.
    pub fn child(&self, id: NodeId, side: Side) -> NodeId {
        self[id].child(side).expect("sentinels have no children")
    }

    pub fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        let children = self[id].children.as_mut().expect("sentinels have no children");
        children[side as usize] = child;
    }

    /// Which side of its parent `id` hangs on, or `None` for the root.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent(id)?;
        Some(if self.child(parent, Side::Left) == id { Side::Left } else { Side::Right })
    }
}

impl Index<NodeId> for NodeStore {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id).expect("dangling NodeId inside the tree")
    }
}

impl IndexMut<NodeId> for NodeStore {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        let slot = &mut self.slots[id.index as usize];
        assert_eq!(slot.generation, id.generation, "dangling NodeId inside the tree");
        slot.node.as_mut().expect("dangling NodeId inside the tree")
    }
}
