//! The public, comparator-carrying `AVLTree<T>`.
//!
//! Insert/remove/search follow the teacher's `avl_tree.rs` shape almost
//! verbatim (recursive value-returning mutation through [`super::node`]'s
//! rotation primitives); the set-algebra entry points (`union`,
//! `intersection`, `difference`, `join_trees`, `split_tree`) are thin,
//! `OverlapError`-checking wrappers around [`super::bfs`].

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;

use oset_core::{Container, Ordered, OverlapError, Printable, PrintableNode, Result as OsetResult, Tree};

use super::bfs;
use super::iter::{InorderIter, LevelOrderIter, PostorderIter, PreorderIter, TraversalOrder};
use super::node::{height, rebalance, update_metrics, Node};

type Comparator<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// A height-balanced binary search tree parameterized by an arbitrary total
/// order, supporting BFS-style `split`/`join`-based set algebra in addition
/// to ordinary insert/remove/search.
///
/// `lowest`/`highest` are maintained caches so `min`/`max` are O(1) reads;
/// see `SPEC_FULL.md` §3.2 for why they live on the tree rather than the
/// node, and why that requires `T: Clone`.
#[derive(Clone)]
pub struct AVLTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
    cmp: Comparator<T>,
    lowest: Option<T>,
    highest: Option<T>,
}

impl<T: Ord + Clone> AVLTree<T> {
    /// Creates an empty tree ordered by `T`'s natural `Ord` implementation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(|a: &T, b: &T| a.cmp(b))
    }
}

impl<T: Ord + Clone> Default for AVLTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> AVLTree<T> {
    /// Creates an empty tree ordered by an arbitrary total order `cmp`.
    pub fn with_comparator<C>(cmp: C) -> Self
    where
        C: Fn(&T, &T) -> Ordering + 'static,
    {
        AVLTree {
            root: None,
            len: 0,
            cmp: Rc::new(cmp),
            lowest: None,
            highest: None,
        }
    }

    fn from_node(root: Option<Box<Node<T>>>, cmp: Comparator<T>) -> Self {
        let len = bfs::graph_len(&root);
        let lowest = find_min(&root).cloned();
        let highest = find_max(&root).cloned();
        AVLTree {
            root,
            len,
            cmp,
            lowest,
            highest,
        }
    }

    /// Number of elements stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (`-1` convention folded into `0` for an empty
    /// tree, since [`Tree::height`] returns `usize`).
    #[must_use]
    pub fn height(&self) -> usize {
        core::cmp::max(height(&self.root), 0) as usize
    }

    /// `true` iff every node's balance factor is within `[-1, 1]`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        fn check<T>(node: &Option<Box<Node<T>>>) -> bool {
            match node {
                None => true,
                Some(n) => {
                    let bf = super::node::balance_factor(n);
                    (-1..=1).contains(&bf) && check(&n.left) && check(&n.right)
                }
            }
        }
        check(&self.root)
    }

    /// `true` iff the tree is both a valid BST under its comparator and
    /// height-balanced.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        fn check<T>(
            node: &Option<Box<Node<T>>>,
            min: Option<&T>,
            max: Option<&T>,
            cmp: &dyn Fn(&T, &T) -> Ordering,
        ) -> bool {
            match node {
                None => true,
                Some(n) => {
                    if let Some(min_val) = min {
                        if cmp(&n.value, min_val) != Ordering::Greater {
                            return false;
                        }
                    }
                    if let Some(max_val) = max {
                        if cmp(&n.value, max_val) != Ordering::Less {
                            return false;
                        }
                    }
                    check(&n.left, min, Some(&n.value), cmp) && check(&n.right, Some(&n.value), max, cmp)
                }
            }
        }
        check(&self.root, None, None, self.cmp.as_ref()) && self.is_balanced()
    }

    /// The root value, if any, in O(1).
    #[must_use]
    pub fn root(&self) -> Option<&T> {
        self.root.as_deref().map(|n| &n.value)
    }

    /// The cached minimum value, in O(1).
    #[must_use]
    pub fn lowest(&self) -> Option<&T> {
        self.lowest.as_ref()
    }

    /// The cached maximum value, in O(1).
    #[must_use]
    pub fn highest(&self) -> Option<&T> {
        self.highest.as_ref()
    }

    /// Empties the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        self.lowest = None;
        self.highest = None;
    }

    /// `true` if `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        search_node(&self.root, value, self.cmp.as_ref()).is_some()
    }

    /// Returns a reference to `value` if present.
    #[must_use]
    pub fn search(&self, value: &T) -> Option<&T> {
        search_node(&self.root, value, self.cmp.as_ref())
    }

    /// Finds the first stored value for which `probe` returns `Equal`,
    /// navigating by `probe`'s returned ordering the way a BST search does.
    /// `probe` must be monotonic with respect to the tree's own comparator
    /// (e.g. "compare against a key embedded in a larger record").
    #[must_use]
    pub fn first_where<F>(&self, probe: F) -> Option<&T>
    where
        F: Fn(&T) -> Ordering,
    {
        fn walk<'a, T, F: Fn(&T) -> Ordering>(node: &'a Option<Box<Node<T>>>, probe: &F) -> Option<&'a T> {
            match node {
                None => None,
                Some(n) => match probe(&n.value) {
                    Ordering::Equal => Some(&n.value),
                    Ordering::Less => walk(&n.left, probe),
                    Ordering::Greater => walk(&n.right, probe),
                },
            }
        }
        walk(&self.root, &probe)
    }

    /// Finds and removes the first value matching `probe`, returning it.
    pub fn remove_first_where<F>(&mut self, probe: F) -> Option<T>
    where
        F: Fn(&T) -> Ordering,
    {
        let found = self.first_where(probe)?.clone();
        self.remove(&found);
        Some(found)
    }

    /// Inserts `value`. Returns `false` without modifying the tree if an
    /// equal value (per the tree's comparator) was already present.
    pub fn insert(&mut self, value: T) -> bool {
        let is_new_low = self
            .lowest
            .as_ref()
            .map_or(true, |l| (self.cmp)(&value, l) == Ordering::Less);
        let is_new_high = self
            .highest
            .as_ref()
            .map_or(true, |h| (self.cmp)(&value, h) == Ordering::Greater);
        let low_candidate = is_new_low.then(|| value.clone());
        let high_candidate = is_new_high.then(|| value.clone());

        let cmp = Rc::clone(&self.cmp);
        let (new_root, inserted) = insert_node(self.root.take(), value, cmp.as_ref());
        self.root = new_root;
        if inserted {
            self.len += 1;
            if let Some(v) = low_candidate {
                self.lowest = Some(v);
            }
            if let Some(v) = high_candidate {
                self.highest = Some(v);
            }
        }
        inserted
    }

    /// Removes `value`. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        let was_low = self.lowest.as_ref().map_or(false, |l| (self.cmp)(value, l) == Ordering::Equal);
        let was_high = self.highest.as_ref().map_or(false, |h| (self.cmp)(value, h) == Ordering::Equal);

        let cmp = Rc::clone(&self.cmp);
        let (new_root, removed) = remove_node(self.root.take(), value, cmp.as_ref());
        self.root = new_root;
        if removed {
            self.len -= 1;
            if was_low {
                self.lowest = find_min(&self.root).cloned();
            }
            if was_high {
                self.highest = find_max(&self.root).cloned();
            }
        }
        removed
    }

    /// An iterator over the tree's values in the requested order.
    pub fn ordered(&self, order: TraversalOrder) -> OrderedIter<'_, T> {
        match order {
            TraversalOrder::InOrder => OrderedIter::In(InorderIter::new(&self.root)),
            TraversalOrder::PreOrder => OrderedIter::Pre(PreorderIter::new(&self.root)),
            TraversalOrder::PostOrder => OrderedIter::Post(PostorderIter::new(&self.root)),
            TraversalOrder::LevelOrder => OrderedIter::Level(LevelOrderIter::new(&self.root)),
        }
    }

    /// Ascending traversal. Shorthand for `ordered(TraversalOrder::InOrder)`.
    pub fn inorder(&self) -> OrderedIter<'_, T> {
        self.ordered(TraversalOrder::InOrder)
    }

    /// Splits the tree at `key`: every stored value less than `key`, whether
    /// `key` itself was present, and every stored value greater than `key`.
    /// Consumes `self` (`spec.md` §5's input-aliasing contract, enforced
    /// here by Rust's move semantics rather than documentation alone).
    pub fn split_tree(mut self, key: &T) -> (Self, bool, Self) {
        let cmp = Rc::clone(&self.cmp);
        let (l, present, r) = bfs::split(self.root.take(), key, cmp.as_ref());
        (Self::from_node(l, Rc::clone(&cmp)), present, Self::from_node(r, cmp))
    }

    /// The set union of `self` and `other`. Consumes both operands.
    #[must_use]
    pub fn union(mut self, mut other: Self) -> Self {
        let cmp = Rc::clone(&self.cmp);
        let new_root = bfs::union(self.root.take(), other.root.take(), cmp.as_ref());
        Self::from_node(new_root, cmp)
    }

    /// The set intersection of `self` and `other`. Consumes both operands.
    #[must_use]
    pub fn intersection(mut self, mut other: Self) -> Self {
        let cmp = Rc::clone(&self.cmp);
        let new_root = bfs::intersection(self.root.take(), other.root.take(), cmp.as_ref());
        Self::from_node(new_root, cmp)
    }

    /// The set difference `self \ other`. Consumes both operands.
    #[must_use]
    pub fn difference(mut self, mut other: Self) -> Self {
        let cmp = Rc::clone(&self.cmp);
        let new_root = bfs::difference(self.root.take(), other.root.take(), cmp.as_ref());
        Self::from_node(new_root, cmp)
    }
}

impl<T: Clone + Debug> AVLTree<T> {
    /// Joins `self` and `other` around a separating `key`, requiring that
    /// every value in `self` is less than `key` and every value in `other`
    /// is greater than it. Raises [`OverlapError::WithKey`] otherwise.
    pub fn join_trees(mut self, key: T, mut other: Self) -> OsetResult<Self> {
        if let Some(h) = self.highest.as_ref() {
            if (self.cmp)(h, &key) != Ordering::Less {
                return Err(OverlapError::with_key(
                    format!("{key:?}"),
                    format!("{h:?}"),
                    other.lowest.as_ref().map(|v| format!("{v:?}")).unwrap_or_default(),
                ));
            }
        }
        if let Some(l) = other.lowest.as_ref() {
            if (self.cmp)(&key, l) != Ordering::Less {
                return Err(OverlapError::with_key(
                    format!("{key:?}"),
                    self.highest.as_ref().map(|v| format!("{v:?}")).unwrap_or_default(),
                    format!("{l:?}"),
                ));
            }
        }
        let cmp = Rc::clone(&self.cmp);
        let new_root = Some(bfs::join(self.root.take(), key, other.root.take()));
        Ok(Self::from_node(new_root, cmp))
    }

    /// The keyless form of [`Self::join_trees`], equivalent to `join2`:
    /// requires every value in `self` to be less than every value in
    /// `other`. Raises [`OverlapError::WithoutKey`] otherwise.
    pub fn join2_trees(mut self, mut other: Self) -> OsetResult<Self> {
        if let (Some(h), Some(l)) = (self.highest.as_ref(), other.lowest.as_ref()) {
            if (self.cmp)(h, l) != Ordering::Less {
                return Err(OverlapError::without_key(format!("{h:?}"), format!("{l:?}")));
            }
        }
        let cmp = Rc::clone(&self.cmp);
        let new_root = bfs::join2(self.root.take(), other.root.take());
        Ok(Self::from_node(new_root, cmp))
    }
}

impl<T: Ord + Clone> FromIterator<T> for AVLTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AVLTree::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

impl<T: Clone> Container for AVLTree<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T: Clone> Ordered<T> for AVLTree<T> {
    fn min(&self) -> Option<&T> {
        self.lowest()
    }

    fn max(&self) -> Option<&T> {
        self.highest()
    }
}

impl<T: Clone> Tree<T> for AVLTree<T> {
    fn height(&self) -> usize {
        AVLTree::height(self)
    }

    fn is_balanced(&self) -> bool {
        AVLTree::is_balanced(self)
    }
}

/// A `T`'s rendered form, for the read-only [`Printable`] capability.
#[derive(Debug, Clone)]
pub struct AVLPrintNode {
    label: alloc::string::String,
    children: Vec<AVLPrintNode>,
}

impl PrintableNode for AVLPrintNode {
    fn printable_value(&self) -> alloc::string::String {
        self.label.clone()
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }
}

fn build_print_node<T: Debug>(node: &Node<T>) -> AVLPrintNode {
    let mut children = Vec::new();
    if let Some(l) = &node.left {
        children.push(build_print_node(l));
    }
    if let Some(r) = &node.right {
        children.push(build_print_node(r));
    }
    AVLPrintNode {
        label: format!("{:?}", node.value),
        children,
    }
}

impl<'a, T: Debug + Clone + 'a> Printable<'a> for AVLTree<T> {
    type Node = AVLPrintNode;

    fn name(&self) -> &'static str {
        "AVLTree"
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn root_nodes(&'a self) -> Vec<Self::Node> {
        match &self.root {
            None => Vec::new(),
            Some(n) => alloc::vec![build_print_node(n)],
        }
    }
}

/// An iterator that can walk the tree in any [`TraversalOrder`] through one
/// static type.
pub enum OrderedIter<'a, T> {
    In(InorderIter<'a, T>),
    Pre(PreorderIter<'a, T>),
    Post(PostorderIter<'a, T>),
    Level(LevelOrderIter<'a, T>),
}

impl<'a, T> Iterator for OrderedIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            OrderedIter::In(it) => it.next(),
            OrderedIter::Pre(it) => it.next(),
            OrderedIter::Post(it) => it.next(),
            OrderedIter::Level(it) => it.next(),
        }
    }
}

fn insert_node<T>(
    node: Option<Box<Node<T>>>,
    value: T,
    cmp: &dyn Fn(&T, &T) -> Ordering,
) -> (Option<Box<Node<T>>>, bool) {
    match node {
        None => (Some(Box::new(Node::leaf(value))), true),
        Some(mut n) => {
            let inserted = match cmp(&value, &n.value) {
                Ordering::Less => {
                    let (new_left, ins) = insert_node(n.left.take(), value, cmp);
                    n.left = new_left;
                    ins
                }
                Ordering::Greater => {
                    let (new_right, ins) = insert_node(n.right.take(), value, cmp);
                    n.right = new_right;
                    ins
                }
                Ordering::Equal => false,
            };
            if inserted {
                (Some(rebalance(n)), true)
            } else {
                (Some(n), false)
            }
        }
    }
}

fn remove_node<T>(
    node: Option<Box<Node<T>>>,
    value: &T,
    cmp: &dyn Fn(&T, &T) -> Ordering,
) -> (Option<Box<Node<T>>>, bool) {
    match node {
        None => (None, false),
        Some(mut n) => match cmp(value, &n.value) {
            Ordering::Less => {
                let (new_left, removed) = remove_node(n.left.take(), value, cmp);
                n.left = new_left;
                if removed {
                    (Some(rebalance(n)), true)
                } else {
                    (Some(n), false)
                }
            }
            Ordering::Greater => {
                let (new_right, removed) = remove_node(n.right.take(), value, cmp);
                n.right = new_right;
                if removed {
                    (Some(rebalance(n)), true)
                } else {
                    (Some(n), false)
                }
            }
            Ordering::Equal => match (n.left.take(), n.right.take()) {
                (None, None) => (None, true),
                (Some(left), None) => (Some(left), true),
                (None, Some(right)) => (Some(right), true),
                (Some(left), Some(right)) => {
                    let (new_right, successor) = extract_min(right);
                    n.value = successor;
                    n.left = Some(left);
                    n.right = new_right;
                    (Some(rebalance(n)), true)
                }
            },
        },
    }
}

fn extract_min<T>(mut node: Box<Node<T>>) -> (Option<Box<Node<T>>>, T) {
    match node.left.take() {
        None => (node.right.take(), node.value),
        Some(left) => {
            let (new_left, min_val) = extract_min(left);
            node.left = new_left;
            update_metrics(&mut node);
            (Some(rebalance(node)), min_val)
        }
    }
}

fn search_node<'a, T>(node: &'a Option<Box<Node<T>>>, value: &T, cmp: &dyn Fn(&T, &T) -> Ordering) -> Option<&'a T> {
    match node {
        None => None,
        Some(n) => match cmp(value, &n.value) {
            Ordering::Less => search_node(&n.left, value, cmp),
            Ordering::Greater => search_node(&n.right, value, cmp),
            Ordering::Equal => Some(&n.value),
        },
    }
}

fn find_min<T>(node: &Option<Box<Node<T>>>) -> Option<&T> {
    match node {
        None => None,
        Some(n) => match &n.left {
            None => Some(&n.value),
            Some(_) => find_min(&n.left),
        },
    }
}

fn find_max<T>(node: &Option<Box<Node<T>>>) -> Option<&T> {
    match node {
        None => None,
        Some(n) => match &n.right {
            None => Some(&n.value),
            Some(_) => find_max(&n.right),
        },
    }
}
