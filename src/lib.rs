//! A red-black tree with explicit, inspectable sentinel leaves.
//!
//! See [`RBTree`] for the main API.

#![forbid(unsafe_code)]

// not concurrent: callers sharing a tree between threads have to put the whole thing behind one lock
pub mod rbtree;

pub use rbtree::{Color, InvariantViolation, Key, Node, NodeId, RBTree, Side};
