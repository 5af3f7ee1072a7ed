use std::cmp::Ordering;

use super::{Key, NodeId, RBTree, Side};

impl RBTree {
    /// Binary search for `key`.
    ///
    /// `Ok` holds the data node with that key, `Err` holds the sentinel sitting where it would be inserted.
    /// `None` means the tree is empty.
    pub(super) fn search(&self, key: Key) -> Option<Result<NodeId, NodeId>> {
        let mut current = self.root?;
        loop {
            let node = &self.store[current];
            if node.is_leaf() {
                return Some(Err(current))
            }
            current = match key.cmp(&node.key()) {
                Ordering::Less => self.store.child(current, Side::Left),
                Ordering::Greater => self.store.child(current, Side::Right),
                Ordering::Equal => return Some(Ok(current)),
            };
        }
    }

    /// The data node holding `key`, if any.
    ///
    /// Complexity: O(log(n))
    pub fn find_node(&self, key: Key) -> Option<NodeId> {
        self.search(key)?.ok()
    }

    /// Every node in the tree, sentinels included, in pre-order (node, then left subtree, then right subtree).
    pub fn all_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack = Vec::from_iter(self.root);

        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.store[id];
            // right first, so that the left subtree gets popped first
            stack.extend(node.right());
            stack.extend(node.left());
        }
        out
    }

    /// Every sentinel in the tree, from left to right.
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.all_nodes().into_iter().filter(|&id| self.store[id].is_leaf()).collect()
    }

    /// Every key in the tree, in increasing order.
    pub fn keys(&self) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;

        loop {
            // walk down the left spine, then visit the deepest pending node and move to its right subtree
            while let Some(id) = current.filter(|&id| self.store[id].is_data()) {
                stack.push(id);
                current = self.store[id].left();
            }
            let Some(id) = stack.pop() else { break };
            out.push(self.store[id].key());
            current = self.store[id].right();
        }
        out
    }

    /// The number of black nodes (sentinel and root included) on the path from the leftmost sentinel up to the root.
    ///
    /// For a valid tree this is the same for every sentinel. An empty tree has a black height of 0.
    pub fn black_height(&self) -> usize {
        let Some(mut current) = self.root else { return 0 };
        let mut height = 0;

        loop {
            if self.store.is_black(current) {
                height += 1;
            }
            match self.store[current].left() {
                Some(left) => current = left,
                None => return height,
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbtree::tests::init_logging;

    #[test]
    fn empty_tree_has_nothing() {
        init_logging();
        let tree = RBTree::new();

        assert_eq!(tree.find_node(1), None);
        assert!(tree.all_nodes().is_empty());
        assert!(tree.leaf_nodes().is_empty());
        assert!(tree.keys().is_empty());
        assert_eq!(tree.black_height(), 0);
    }

    #[test]
    fn find_walks_to_the_right_node() {
        init_logging();
        let mut tree = RBTree::new();
        let nodes = tree.insert_nodes([50, 20, 80, 10, 30, 70, 90, 25]);

        for (key, (_, id)) in [50, 20, 80, 10, 30, 70, 90, 25].into_iter().zip(nodes) {
            assert_eq!(tree.find_node(key), Some(id));
            assert_eq!(tree.node(id).unwrap().key(), key);
        }
        for missing in [0, 15, 26, 100, -5] {
            assert_eq!(tree.find_node(missing), None);
        }
    }

    #[test]
    fn all_nodes_is_pre_order() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([2, 1, 3]);

        let keys = tree.all_nodes().into_iter()
            .map(|id| tree.node(id).unwrap())
            .filter(|node| node.is_data())
            .map(|node| node.key())
            .collect::<Vec<_>>();
        assert_eq!(keys, [2, 1, 3]);
        assert_eq!(tree.all_nodes().len(), 7);
    }

    #[test]
    fn leaves_are_left_to_right() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([2, 1, 3]);

        let leaves = tree.leaf_nodes();
        assert_eq!(leaves.len(), 4);

        let parents = leaves.iter()
            .map(|&id| tree.node(tree.node(id).unwrap().parent().unwrap()).unwrap().key())
            .collect::<Vec<_>>();
        assert_eq!(parents, [1, 1, 3, 3]);
    }

    #[test]
    fn keys_are_sorted() {
        init_logging();
        let mut tree = RBTree::new();
        tree.insert_nodes([9, -3, 14, 0, 7, 7, 22, -8, 5]);

        assert_eq!(tree.keys(), vec![-8, -3, 0, 5, 7, 9, 14, 22]);
        assert_eq!(tree.len(), 8);
    }
}
