use log::trace;

use super::{NodeId, RBTree, Side};

impl RBTree {
    /// Rotate the subtree rooted at `node` towards `side`.
    ///
    /// The child on the opposite side (the pivot) takes `node`'s place under its parent, and `node` becomes the
    /// pivot's `side` child. The pivot's inner subtree moves across to `node`, so the in-order sequence is unchanged.
    /// Colors are not touched, and no invariant is checked here. Returns the pivot.
    ///
    /// ```text
    ///       node                 pivot
    ///      /    \               /     \
    ///     a    pivot    =>    node     c       (side = Left)
    ///         /     \        /    \
    ///       inner    c      a    inner
    /// ```
    pub(super) fn rotate(&mut self, node: NodeId, side: Side) -> NodeId {
        let pivot = self.store.child(node, side.opposite());
        debug_assert!(self.store[pivot].is_data(), "rotating a sentinel into place");
        let inner = self.store.child(pivot, side);

        trace!("rotate {side:?} at {} (pivot {})", self.store[node].key(), self.store[pivot].key());

        self.store.set_child(node, side.opposite(), inner);
        self.store.set_parent(inner, Some(node));

        self.replace_in_parent(node, pivot);

        self.store.set_child(pivot, side, node);
        self.store.set_parent(node, Some(pivot));

        pivot
    }
}
