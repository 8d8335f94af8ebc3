//! Compact-prefix trie (radix tree) whose per-node children are stored in a
//! nested [`crate::avl::AVLTree`].

mod node;
mod tree;

pub use tree::{Existence, RadixPrintNode, RadixTree, SearchResult};
