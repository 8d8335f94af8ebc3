//! The radix tree's node type and the prefix-aware ordering its children
//! are stored under.
//!
//! A `RadixNode`'s `children` field is itself an `AVLTree`, ordered by a
//! comparator that only looks at the leading byte of each sibling's label
//! (the LCP invariant guarantees no two siblings share one). The empty
//! label — the terminator sentinel — sorts before every non-empty label.

use alloc::string::String;

use crate::avl::AVLTree;

#[derive(Clone)]
pub(crate) struct RadixNode {
    pub(crate) label: String,
    pub(crate) children: AVLTree<RadixNode>,
}

impl RadixNode {
    pub(crate) fn leaf(label: String) -> Self {
        RadixNode {
            label,
            children: AVLTree::with_comparator(children_order as fn(&RadixNode, &RadixNode) -> core::cmp::Ordering),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The first byte of `label`, or `None` for the empty (terminator) label.
pub(crate) fn first_unit(label: &str) -> Option<u8> {
    label.as_bytes().first().copied()
}

/// Total order over labels by leading byte, empty-first. Used both as the
/// comparator for a node's `children` tree and as the probe function for
/// locating a specific sibling by leading byte.
pub(crate) fn target_vs_label(target: Option<u8>, label_first: Option<u8>) -> core::cmp::Ordering {
    match (target, label_first) {
        (None, None) => core::cmp::Ordering::Equal,
        (None, Some(_)) => core::cmp::Ordering::Less,
        (Some(_), None) => core::cmp::Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

fn children_order(a: &RadixNode, b: &RadixNode) -> core::cmp::Ordering {
    target_vs_label(first_unit(&a.label), first_unit(&b.label))
}

/// The number of leading bytes `a` and `b` share.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
