//! Height-balanced binary search tree with BFS (Blelloch–Ferizović–Sun)
//! join-based set algebra.

pub(crate) mod bfs;
mod iter;
pub(crate) mod node;
mod tree;

pub use iter::{InorderIter, LevelOrderIter, PostorderIter, PreorderIter, TraversalOrder};
pub use tree::{AVLPrintNode, AVLTree, OrderedIter};
