use log::{debug, trace};

use super::{Color, Key, NodeId, RBTree, Side};

impl RBTree {
    /// Remove `key` from the tree. Returns `false` (and leaves the tree untouched) if it wasn't there.
    ///
    /// A node with two data children is not unlinked itself: it takes over its in-order successor's key, and the
    /// successor is removed in its place. Handles to the successor die, handles to the original node stay valid.
    pub fn delete_node(&mut self, key: Key) -> bool {
        let Some(target) = self.find_node(key) else {
            debug!("{key} is not in the tree, nothing to delete");
            return false
        };

        let left = self.store.child(target, Side::Left);
        let right = self.store.child(target, Side::Right);
        let removed = if self.store[left].is_data() && self.store[right].is_data() {
            let successor = self.leftmost(right);
            let successor_key = self.store[successor].key();
            trace!("{key} has two children, taking over successor {successor_key}");
            self.store.set_key(target, successor_key);
            successor
        } else {
            target
        };

        self.unlink(removed);
        self.len -= 1;
        debug!("deleted {key} (len {}, black height {})", self.len, self.black_height());
        true
    }

    /// The leftmost data node of the subtree rooted at the data node `id`.
    fn leftmost(&self, mut id: NodeId) -> NodeId {
        loop {
            let left = self.store.child(id, Side::Left);
            if self.store[left].is_leaf() {
                return id
            }
            id = left;
        }
    }

    /// Remove a data node with at least one sentinel child, splicing its other child into its place.
    fn unlink(&mut self, node: NodeId) {
        let left = self.store.child(node, Side::Left);
        let right = self.store.child(node, Side::Right);
        let (child, spare) = if self.store[left].is_leaf() { (right, left) } else { (left, right) };
        debug_assert!(self.store[spare].is_leaf(), "unlinking a node with two data children");

        let was_black = self.store.is_black(node);
        let parent = self.store.parent(node);
        self.store.free(spare);

        if parent.is_none() && self.store[child].is_leaf() {
            // that was the last key
            self.store.free(child);
            self.store.free(node);
            self.root = None;
            return
        }

        self.replace_in_parent(node, child);
        self.store.free(node);

        // removing a red node never changes a black height
        if was_black {
            self.delete_fixup(child);
        }
    }

    /// Restore equal black heights after a black node was removed from above `node`.
    ///
    /// `node` carries an extra "black" that has to be pushed up the tree until it can either be absorbed by a red
    /// node or resolved with rotations around its sibling.
    fn delete_fixup(&mut self, mut node: NodeId) {
        while self.root != Some(node) && self.store.is_black(node) {
            let parent = self.store.parent(node).expect("non-root node without a parent");
            let side = self.store.side_of(node).expect("non-root node without a parent");
            let far = side.opposite();
            // the sibling's side is one black node taller than ours, so it can't be a sentinel
            let mut sibling = self.store.child(parent, far);

            if self.store.is_red(sibling) {
                trace!("delete fixup under {}: red sibling, rotating {side:?}", self.store[parent].key());
                self.store.set_color(sibling, Color::Black);
                self.store.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.store.child(parent, far);
            }

            let near_child = self.store.child(sibling, side);
            let far_child = self.store.child(sibling, far);

            if self.store.is_black(near_child) && self.store.is_black(far_child) {
                trace!("delete fixup under {}: black nephews, moving up", self.store[parent].key());
                self.store.set_color(sibling, Color::Red);
                node = parent;
                continue
            }

            if self.store.is_black(far_child) {
                trace!("delete fixup under {}: red inner nephew, rotating {far:?}", self.store[parent].key());
                self.store.set_color(near_child, Color::Black);
                self.store.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.store.child(parent, far);
            }

            trace!("delete fixup under {}: red outer nephew, rotating {side:?}", self.store[parent].key());
            let far_child = self.store.child(sibling, far);
            self.store.set_color(sibling, self.store.color(parent));
            self.store.set_color(parent, Color::Black);
            self.store.set_color(far_child, Color::Black);
            self.rotate(parent, side);
            break
        }

        // either a red node absorbing the extra black, or the root
        self.store.set_color(node, Color::Black);
        if let Some(root) = self.root {
            self.store.set_color(root, Color::Black);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::tests::init_logging;

    fn color_of(tree: &RBTree, key: Key) -> Color {
        tree.node(tree.find_node(key).unwrap()).unwrap().color()
    }

    fn assert_valid(tree: &RBTree) {
        if let Err(e) = tree.check_invariants() {
            panic!("{e} in {:?}", tree.keys());
        }
    }

    #[test]
    fn delete_missing_key() {
        init_logging();
        let mut tree = RBTree::new();
        assert!(!tree.delete_node(4));

        tree.insert_nodes([1, 2, 3]);
        let before = tree.all_nodes();
        assert!(!tree.delete_node(4));
        assert_eq!(tree.all_nodes(), before);
    }

    #[test]
    fn delete_last_key_empties_the_tree() {
        init_logging();
        let mut tree = RBTree::new();
        let (_, id) = tree.insert_node(1);

        assert!(tree.delete_node(1));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.node_count(), 0);
        assert!(tree.node(id).is_none());
    }

    #[test]
    fn delete_red_leaf_needs_no_fixup() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([2, 1, 3]);

        assert!(tree.delete_node(3));
        assert_eq!(tree.keys(), vec![1, 2]);
        assert_eq!(color_of(&tree, 2), Color::Black);
        assert_eq!(color_of(&tree, 1), Color::Red);
        assert_valid(&tree);
    }

    #[test]
    fn delete_with_two_children_keeps_the_handle() {
        init_logging();
        let mut tree = RBTree::new();
        let nodes = tree.insert_nodes([4, 2, 6, 1, 3, 5, 7]);
        let four = nodes[0].1;
        let five = nodes[5].1;

        assert!(tree.delete_node(4));
        // the root now holds the successor's key, the successor node itself is gone
        assert_eq!(tree.node(four).unwrap().key(), 5);
        assert!(tree.node(five).is_none());
        assert_eq!(tree.find_node(5), Some(four));
        assert_eq!(tree.keys(), vec![1, 2, 3, 5, 6, 7]);
        assert_valid(&tree);
    }

    #[test]
    fn black_leaf_with_red_sibling() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([2, 1, 4, 3, 6, 5, 7]);
        assert_eq!(tree.node(tree.root().unwrap()).unwrap().key(), 2);
        assert_eq!(color_of(&tree, 1), Color::Black);
        assert_eq!(color_of(&tree, 4), Color::Red);

        assert!(tree.delete_node(1));
        assert_eq!(tree.node(tree.root().unwrap()).unwrap().key(), 4);
        assert_eq!(color_of(&tree, 2), Color::Black);
        assert_eq!(color_of(&tree, 3), Color::Red);
        assert_eq!(tree.keys(), vec![2, 3, 4, 5, 6, 7]);
        assert_valid(&tree);
    }

    #[test]
    fn black_leaf_with_black_nephews_moves_up() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([2, 1, 3, 4]);
        tree.delete_node(4);
        // three black nodes, so removing a leaf pushes the deficit up to the root
        assert!([1, 2, 3].iter().all(|&k| color_of(&tree, k) == Color::Black));

        assert!(tree.delete_node(1));
        assert_eq!(color_of(&tree, 2), Color::Black);
        assert_eq!(color_of(&tree, 3), Color::Red);
        assert_eq!(tree.black_height(), 2);
        assert_valid(&tree);
    }

    #[test]
    fn black_leaf_with_red_inner_nephew() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([2, 1, 4, 3]);
        assert_eq!(color_of(&tree, 3), Color::Red);

        assert!(tree.delete_node(1));
        assert_eq!(tree.node(tree.root().unwrap()).unwrap().key(), 3);
        assert_eq!(tree.keys(), vec![2, 3, 4]);
        assert_valid(&tree);
    }

    #[test]
    fn black_leaf_with_red_outer_nephew() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([2, 1, 3, 4]);
        assert_eq!(color_of(&tree, 4), Color::Red);

        assert!(tree.delete_node(1));
        assert_eq!(tree.node(tree.root().unwrap()).unwrap().key(), 3);
        assert!([2, 3, 4].iter().all(|&k| color_of(&tree, k) == Color::Black));
        assert_valid(&tree);
    }

    #[test]
    fn mirrored_cases() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([3, 4, 2, 1]);
        assert!(tree.delete_node(4));
        assert_eq!(tree.node(tree.root().unwrap()).unwrap().key(), 2);
        assert_valid(&tree);

        let mut tree = RBTree::new();
        tree.insert_nodes([3, 4, 1, 2]);
        assert!(tree.delete_node(4));
        assert_eq!(tree.node(tree.root().unwrap()).unwrap().key(), 2);
        assert_valid(&tree);
    }
}
