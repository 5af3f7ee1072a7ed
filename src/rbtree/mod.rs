//! A red-black tree over integer keys.
//!
//! Every empty child position is a real (black) sentinel node rather than a null pointer, so that the
//! red-black axioms can be checked by inspecting nodes directly:
//!
//! 1. every sentinel is black,
//! 2. a red node only has black children,
//! 3. every path from a sentinel up to the root sees the same number of black nodes.
//!
//! All nodes live in an arena owned by the tree, and are handed out as [`NodeId`] handles.

// PROVE: any node with height `h` has black height at least `h/2`
// PROVE: the subtree located at any node `x` contains at least `2^bh(x) - 1` nodes (use induction)
// LEMMA: An RBTree with `n` internal nodes has height at most `2*log₂(n+1)`

mod delete;
mod insert;
mod node;
mod rotate;
mod traverse;
mod verify;


pub use node::{Color, Key, Node, NodeId, Side, SENTINEL_KEY};
pub use verify::InvariantViolation;

use node::NodeStore;


/// A red-black tree of unique `Key`s.
///
/// A default-constructed tree is empty: it has no nodes at all, not even a sentinel.
#[derive(Debug, Clone, Default)]
pub struct RBTree {
    store: NodeStore,
    root: Option<NodeId>,
    len: usize,
}

impl RBTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The amount of keys (data nodes) in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The total amount of nodes in the tree, sentinels included.
    ///
    /// This is always `2 * len + 1` for a non-empty tree, and `0` for an empty one.
    pub fn node_count(&self) -> usize {
        self.store.live()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolve a handle. Returns `None` if the node has since been removed from the tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.find_node(key).is_some()
    }

    /// Removes every node. Handles issued before this call all become dead.
    pub fn clear(&mut self) {
        self.store.clear();
        self.root = None;
        self.len = 0;
    }

    /// Insert every key in order, returning the result of [`insert_node`](Self::insert_node) for each of them.
    pub fn insert_nodes<I: IntoIterator<Item = Key>>(&mut self, keys: I) -> Vec<(bool, NodeId)> {
        keys.into_iter().map(|key| self.insert_node(key)).collect()
    }

    /// Make `new` take `old`'s place under `old`'s parent (or as the root).
    ///
    /// Only the downward link from the parent and `new`'s parent link are touched; `old` keeps its stale parent pointer.
    fn replace_in_parent(&mut self, old: NodeId, new: NodeId) {
        let parent = self.store.parent(old);
        match parent {
            Some(parent) => {
                let side = if self.store.child(parent, Side::Left) == old { Side::Left } else { Side::Right };
                self.store.set_child(parent, side, new);
            }
            None => self.root = Some(new),
        }
        self.store.set_parent(new, parent);
    }
}
