//! Core traits shared by the ordered-set workspace.
//!
//! These traits define common interfaces that `oset-trees`'s data
//! structures implement, enabling generic programming and consistent APIs
//! across `AVLTree` and `RadixTree`.

use alloc::string::String;
use alloc::vec::Vec;

/// A trait for data structures that have a length/size.
pub trait Container {
    /// Returns the number of elements in the container.
    fn len(&self) -> usize;

    /// Returns `true` if the container contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A trait for ordered data structures (e.g. `AVLTree`).
pub trait Ordered<T>: Container {
    /// Returns a reference to the minimum element.
    fn min(&self) -> Option<&T>;

    /// Returns a reference to the maximum element.
    fn max(&self) -> Option<&T>;
}

/// A trait for tree-like data structures.
pub trait Tree<T>: Container {
    /// Returns the height of the tree.
    fn height(&self) -> usize;

    /// Returns `true` if the tree satisfies its balance invariant.
    fn is_balanced(&self) -> bool;
}

/// A read-only capability exposed to an external renderer: "give me your
/// name and your root nodes." Neither this trait nor [`PrintableNode`]
/// prescribe how the tree is drawn — that is the renderer's job, and the
/// renderer itself is out of scope for this workspace.
pub trait Printable<'a> {
    /// The node type this tree exposes to a renderer.
    type Node: PrintableNode + 'a;

    /// A short name for the tree, used as a root label by the renderer.
    fn name(&self) -> &'static str;

    /// `true` if the tree has nothing to render.
    fn is_empty(&self) -> bool;

    /// The tree's root nodes. Most trees have exactly one (or zero, when
    /// empty); the radix tree's independent buckets each contribute one.
    fn root_nodes(&'a self) -> Vec<Self::Node>;
}

/// A single node in a [`Printable`] tree, as seen by a renderer.
pub trait PrintableNode {
    /// The text a renderer should print for this node.
    fn printable_value(&self) -> String;

    /// `true` if this node has no children.
    fn is_leaf(&self) -> bool;

    /// This node's children, in the order a renderer should draw them.
    fn children(&self) -> Vec<Self>
    where
        Self: Sized;
}
