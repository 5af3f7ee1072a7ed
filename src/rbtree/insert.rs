use log::{debug, trace};

use super::{Color, Key, NodeId, RBTree};

impl RBTree {
    /// Insert `key` into the tree.
    ///
    /// Returns `(true, new_node)` if the key was added, or `(false, existing_node)` if it was already present, in
    /// which case the tree is left exactly as it was.
    pub fn insert_node(&mut self, key: Key) -> (bool, NodeId) {
        let leaf = match self.search(key) {
            None => {
                let root = self.store.alloc_data(key, Color::Black, None);
                self.root = Some(root);
                self.len = 1;
                debug!("inserted {key} into an empty tree");
                return (true, root)
            }
            Some(Ok(existing)) => {
                debug!("{key} is already in the tree");
                return (false, existing)
            }
            Some(Err(leaf)) => leaf,
        };

        // the new node takes over the sentinel's position, and gets two fresh sentinels of its own
        let parent = self.store.parent(leaf);
        let node = self.store.alloc_data(key, Color::Red, parent);
        self.replace_in_parent(leaf, node);
        self.store.free(leaf);
        self.len += 1;

        self.insert_fixup(node);
        debug!("inserted {key} (len {}, black height {})", self.len, self.black_height());
        (true, node)
    }

    /// Restore "no red node has a red child" after `node` was inserted red.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(mut parent) = self.store.parent(node).filter(|&p| self.store.is_red(p)) {
            // the root is always black, so a red parent has a parent of its own
            let grandparent = self.store.parent(parent).expect("red node at the root");
            let side = self.store.side_of(parent).expect("red node at the root");
            let uncle = self.store.child(grandparent, side.opposite());

            if self.store.is_red(uncle) {
                trace!("insert fixup at {}: red uncle, recoloring", self.store[node].key());
                self.store.set_color(parent, Color::Black);
                self.store.set_color(uncle, Color::Black);
                self.store.set_color(grandparent, Color::Red);
                node = grandparent;
                continue
            }

            if self.store.side_of(node) == Some(side.opposite()) {
                trace!("insert fixup at {}: inside child, rotating {side:?}", self.store[node].key());
                node = parent;
                self.rotate(node, side);
                parent = self.store.parent(node).expect("rotation gave `node` a parent");
            }

            trace!("insert fixup at {}: outside child, rotating {:?}", self.store[node].key(), side.opposite());
            self.store.set_color(parent, Color::Black);
            self.store.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
            break
        }

        if let Some(root) = self.root {
            self.store.set_color(root, Color::Black);
        }
    }
}
