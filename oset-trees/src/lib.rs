//! # oset-trees
//!
//! The hard core of the ordered-set workspace: a height-balanced AVL tree
//! with BFS (Blelloch–Ferizović–Sun) join-based set algebra, and a
//! compact-prefix radix trie whose per-node children reuse the AVL tree as
//! an ordered associative store.
//!
//! ## Modules
//!
//! - `avl` - `AVLTree`: insert/remove/search/traversal plus `split`/`join`/
//!   `join2`/`union`/`intersection`/`difference`.
//! - `radix` - `RadixTree`: prefix-compressed trie over `AVLTree`-ordered
//!   children.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod avl;
pub mod radix;

pub use oset_core::{OverlapError, Result};
