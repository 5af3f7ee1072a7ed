use std::fmt;

use super::{Key, NodeId, RBTree, Side};

/// A broken red-black or binary-search-tree axiom, as found by [`RBTree::check_invariants`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    RedRoot(NodeId),
    RootHasParent(NodeId),
    RedLeaf(NodeId),
    RedRed { parent: NodeId, child: NodeId },
    UnequalBlackHeight { leaf: NodeId, expected: usize, found: usize },
    OutOfOrder { before: Key, after: Key },
    BrokenLink { parent: NodeId, child: NodeId },
    CountMismatch { expected: usize, found: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot(id) => write!(f, "root {id:?} is red"),
            Self::RootHasParent(id) => write!(f, "root {id:?} has a parent"),
            Self::RedLeaf(id) => write!(f, "sentinel {id:?} is red"),
            Self::RedRed { parent, child } => write!(f, "red node {parent:?} has red child {child:?}"),
            Self::UnequalBlackHeight { leaf, expected, found } =>
                write!(f, "sentinel {leaf:?} has black height {found}, expected {expected}"),
            Self::OutOfOrder { before, after } => write!(f, "key {before} is not less than the following key {after}"),
            Self::BrokenLink { parent, child } => write!(f, "{child:?} does not point back to its parent {parent:?}"),
            Self::CountMismatch { expected, found } => write!(f, "expected {expected} nodes, found {found}"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl RBTree {
    /// Check every axiom of the tree, returning its black height.
    ///
    /// Checked: every sentinel is black, the root is black, no red node has a red child, every path from a sentinel
    /// up to the root has the same amount of black nodes, keys are strictly increasing in order, and every child points
    /// back to its parent.
    ///
    /// Complexity: O(n log(n)), since the black heights are counted by walking up from every sentinel.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return match self.store.live() {
                0 => Ok(0),
                found => Err(InvariantViolation::CountMismatch { expected: 0, found }),
            }
        };

        if self.store.parent(root).is_some() {
            return Err(InvariantViolation::RootHasParent(root))
        }
        if self.store.is_red(root) {
            return Err(InvariantViolation::RedRoot(root))
        }

        let all = self.all_nodes();
        if all.len() != self.store.live() || all.len() != 2 * self.len + 1 {
            return Err(InvariantViolation::CountMismatch { expected: 2 * self.len + 1, found: all.len() })
        }

        for &id in &all {
            let node = &self.store[id];
            if node.is_leaf() {
                if node.color().is_red() {
                    return Err(InvariantViolation::RedLeaf(id))
                }
                continue
            }

            for side in [Side::Left, Side::Right] {
                let child = self.store.child(id, side);
                if self.store.parent(child) != Some(id) {
                    return Err(InvariantViolation::BrokenLink { parent: id, child })
                }
                if node.color().is_red() && self.store.is_red(child) {
                    return Err(InvariantViolation::RedRed { parent: id, child })
                }
            }
        }

        let keys = self.keys();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(InvariantViolation::OutOfOrder { before: pair[0], after: pair[1] })
        }

        let mut expected = None;
        for leaf in all.into_iter().filter(|&id| self.store[id].is_leaf()) {
            let found = self.upward_black_count(leaf);
            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(InvariantViolation::UnequalBlackHeight { leaf, expected, found })
                }
                Some(_) => {}
            }
        }

        Ok(expected.unwrap_or(0))
    }

    /// Black nodes on the path from `id` up to the root, both ends included.
    fn upward_black_count(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut current = Some(id);
        while let Some(id) = current {
            if self.store.is_black(id) {
                count += 1;
            }
            current = self.store.parent(id);
        }
        count
    }
}
