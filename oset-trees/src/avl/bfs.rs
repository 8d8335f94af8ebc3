//! The Blelloch–Ferizović–Sun (BFS) join-based set-algebra layer: `split`,
//! `join`, `join2`, `union`, `intersection`, `difference`.
//!
//! Everything here is expressed as free functions over bare node graphs
//! (`Option<Box<Node<T>>>`), not over `AVLTree`. They are "functional at the
//! node-graph level" per `spec.md` §4.2: each function takes ownership of
//! the subtrees it is given and returns the replacement graph: no node is
//! ever mutated through a reference that outlives the call that produced
//! it. `AVLTree`'s `union`/`intersection`/`difference`/`join_trees`/
//! `split_tree` (in `avl::tree`) are the public, comparator-carrying,
//! `OverlapError`-checking wrappers around these.

use alloc::boxed::Box;
use core::cmp::Ordering;

use super::node::{balance_factor, count, height, rebalance, update_metrics, Node};

type Cmp<'a, T> = &'a dyn Fn(&T, &T) -> Ordering;

/// Partitions `node` into values strictly less than `key`, a presence flag,
/// and values strictly greater than `key` (`spec.md` §4.2).
pub(crate) fn split<T>(
    node: Option<Box<Node<T>>>,
    key: &T,
    cmp: Cmp<T>,
) -> (Option<Box<Node<T>>>, bool, Option<Box<Node<T>>>) {
    match node {
        None => (None, false, None),
        Some(n) => {
            let Node {
                value, left, right, ..
            } = *n;
            match cmp(key, &value) {
                Ordering::Equal => (left, true, right),
                Ordering::Less => {
                    let (l, present, r) = split(left, key, cmp);
                    (l, present, Some(join(r, value, right)))
                }
                Ordering::Greater => {
                    let (l, present, r) = split(right, key, cmp);
                    (Some(join(left, value, l)), present, r)
                }
            }
        }
    }
}

/// Builds a height-balanced tree whose in-order sequence is
/// `left ++ [key] ++ right`, assuming every value in `left` is less than
/// `key` and every value in `right` is greater (`spec.md` §4.2). Balanced
/// regardless of the relative heights of `left` and `right`.
pub(crate) fn join<T>(left: Option<Box<Node<T>>>, key: T, right: Option<Box<Node<T>>>) -> Box<Node<T>> {
    let lh = height(&left);
    let rh = height(&right);

    if lh <= rh + 1 && rh <= lh + 1 {
        return Node::build(left, key, right);
    }

    if lh > rh + 1 {
        join_right(left.expect("lh > rh + 1 implies left is non-empty"), key, right)
    } else {
        join_left(left, key, right.expect("rh > lh + 1 implies right is non-empty"))
    }
}

/// `left` is taller than `right` by more than one level: descend along
/// `left`'s right spine until the heights are close enough, splice `right`
/// in there, then rebalance on the way back up.
fn join_right<T>(mut left: Box<Node<T>>, key: T, right: Option<Box<Node<T>>>) -> Box<Node<T>> {
    if height(&left.right) <= height(&right) + 1 {
        left.right = Some(Node::build(left.right.take(), key, right));
    } else {
        let c = left.right.take().expect("spine descent requires a right child");
        left.right = Some(join_right(c, key, right));
    }
    rebalance(left)
}

/// Symmetric to [`join_right`]: `right` is taller than `left`.
fn join_left<T>(left: Option<Box<Node<T>>>, key: T, mut right: Box<Node<T>>) -> Box<Node<T>> {
    if height(&right.left) <= height(&left) + 1 {
        right.left = Some(Node::build(left, key, right.left.take()));
    } else {
        let c = right.left.take().expect("spine descent requires a left child");
        right.left = Some(join_left(left, key, c));
    }
    rebalance(right)
}

/// Join without a separating key: every value in `left` is less than every
/// value in `right` (`spec.md` §4.2).
pub(crate) fn join2<T>(left: Option<Box<Node<T>>>, right: Option<Box<Node<T>>>) -> Option<Box<Node<T>>> {
    match (left, right) {
        (None, r) => r,
        (l, None) => l,
        (Some(l), Some(r)) => {
            let (new_left, max_val) = split_last(l);
            Some(join(new_left, max_val, Some(r)))
        }
    }
}

/// Removes and returns the maximum value of `node`, rebalancing on the way
/// back up. The mirror image of extracting the minimum.
fn split_last<T>(mut node: Box<Node<T>>) -> (Option<Box<Node<T>>>, T) {
    match node.right.take() {
        None => {
            let n = *node;
            (n.left, n.value)
        }
        Some(right) => {
            let (new_right, max_val) = split_last(right);
            node.right = new_right;
            update_metrics(&mut node);
            (Some(rebalance(node)), max_val)
        }
    }
}

/// `union(n1, n2)`: recurse on `n2` as the pivot, split `n1` at it, and
/// recombine. Duplicates are absorbed by the join key.
pub(crate) fn union<T>(n1: Option<Box<Node<T>>>, n2: Option<Box<Node<T>>>, cmp: Cmp<T>) -> Option<Box<Node<T>>> {
    match (n1, n2) {
        (None, other) | (other, None) => other,
        (Some(a), Some(b)) => {
            let Node {
                value,
                left: b_left,
                right: b_right,
                ..
            } = *b;
            let (l1, _present, r1) = split(Some(a), &value, cmp);
            let new_left = union(l1, b_left, cmp);
            let new_right = union(r1, b_right, cmp);
            Some(join(new_left, value, new_right))
        }
    }
}

/// `intersection(n1, n2)`: values present in both.
pub(crate) fn intersection<T>(
    n1: Option<Box<Node<T>>>,
    n2: Option<Box<Node<T>>>,
    cmp: Cmp<T>,
) -> Option<Box<Node<T>>> {
    match (n1, n2) {
        (None, _) | (_, None) => None,
        (Some(a), Some(b)) => {
            let Node {
                value,
                left: b_left,
                right: b_right,
                ..
            } = *b;
            let (l1, present, r1) = split(Some(a), &value, cmp);
            let new_left = intersection(l1, b_left, cmp);
            let new_right = intersection(r1, b_right, cmp);
            if present {
                Some(join(new_left, value, new_right))
            } else {
                join2(new_left, new_right)
            }
        }
    }
}

/// `difference(n1, n2)`: values in `n1` that are not in `n2`. The pivot key
/// is dropped whether or not it was present in `n1`.
pub(crate) fn difference<T>(
    n1: Option<Box<Node<T>>>,
    n2: Option<Box<Node<T>>>,
    cmp: Cmp<T>,
) -> Option<Box<Node<T>>> {
    match (n1, n2) {
        (None, _) => None,
        (Some(a), None) => Some(a),
        (Some(a), Some(b)) => {
            let Node {
                value,
                left: b_left,
                right: b_right,
                ..
            } = *b;
            let (l1, _present, r1) = split(Some(a), &value, cmp);
            let new_left = difference(l1, b_left, cmp);
            let new_right = difference(r1, b_right, cmp);
            join2(new_left, new_right)
        }
    }
}

/// The subtree size a freshly joined/split node graph reports, read off the
/// maintained `count` cache in O(1) rather than re-walking the tree.
pub(crate) fn graph_len<T>(node: &Option<Box<Node<T>>>) -> usize {
    count(node)
}

/// `true` iff `node`'s balance factor is within `[-1, 1]` at every node.
/// Used by tests and by `AVLTree::is_balanced`.
#[cfg(test)]
pub(crate) fn is_balanced<T>(node: &Option<Box<Node<T>>>) -> bool {
    match node {
        None => true,
        Some(n) => {
            let bf = balance_factor(n);
            (-1..=1).contains(&bf) && is_balanced(&n.left) && is_balanced(&n.right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::node::Node;

    fn cmp_i32(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn from_slice(values: &[i32]) -> Option<Box<Node<i32>>> {
        let mut root: Option<Box<Node<i32>>> = None;
        for &v in values {
            root = match root {
                None => Some(Box::new(Node::leaf(v))),
                Some(_) => {
                    // simple unbalanced insert is fine for building BFS test fixtures;
                    // bfs functions themselves don't assume balance on the way in.
                    insert_unbalanced(root, v)
                }
            };
        }
        root
    }

    fn insert_unbalanced(node: Option<Box<Node<i32>>>, v: i32) -> Option<Box<Node<i32>>> {
        match node {
            None => Some(Box::new(Node::leaf(v))),
            Some(mut n) => {
                match v.cmp(&n.value) {
                    Ordering::Less => n.left = insert_unbalanced(n.left.take(), v),
                    Ordering::Greater => n.right = insert_unbalanced(n.right.take(), v),
                    Ordering::Equal => {}
                }
                update_metrics(&mut n);
                Some(n)
            }
        }
    }

    fn inorder(node: &Option<Box<Node<i32>>>, out: &mut alloc::vec::Vec<i32>) {
        if let Some(n) = node {
            inorder(&n.left, out);
            out.push(n.value);
            inorder(&n.right, out);
        }
    }

    fn to_vec(node: &Option<Box<Node<i32>>>) -> alloc::vec::Vec<i32> {
        let mut out = alloc::vec::Vec::new();
        inorder(node, &mut out);
        out
    }

    #[test]
    fn split_partitions_and_reports_presence() {
        let t = from_slice(&[8, 5, 11, 6, 9, 4, 14]);
        let (l, present, r) = split(t, &5, &cmp_i32);
        assert!(present);
        assert_eq!(to_vec(&l), vec![4]);
        assert_eq!(to_vec(&r), vec![6, 8, 9, 11, 14]);
        assert!(is_balanced(&l));
        assert!(is_balanced(&r));
    }

    #[test]
    fn split_absent_key() {
        let t = from_slice(&[8, 5, 11]);
        let (l, present, r) = split(t, &100, &cmp_i32);
        assert!(!present);
        assert_eq!(to_vec(&l), vec![5, 8, 11]);
        assert_eq!(to_vec(&r), Vec::<i32>::new());
    }

    #[test]
    fn split_of_empty_tree() {
        let (l, present, r) = split::<i32>(None, &1, &cmp_i32);
        assert!(!present);
        assert!(l.is_none());
        assert!(r.is_none());
    }

    #[test]
    fn join_combines_in_order() {
        let left = from_slice(&[1, 2]);
        let right = from_slice(&[9, 10]);
        let joined = Some(join(left, 5, right));
        assert_eq!(to_vec(&joined), vec![1, 2, 5, 9, 10]);
        assert!(is_balanced(&joined));
    }

    #[test]
    fn join_of_two_empty_trees_is_single_node() {
        let joined = Some(join(None, 5, None));
        assert_eq!(to_vec(&joined), vec![5]);
    }

    #[test]
    fn join_balances_when_heights_differ_a_lot() {
        // left much taller than right
        let mut left = None;
        for v in 0..20 {
            left = insert_unbalanced(left, v);
        }
        let right = from_slice(&[100]);
        let joined = Some(join(left, 50, right));
        assert!(is_balanced(&joined));
        let mut expected: alloc::vec::Vec<i32> = (0..20).collect();
        expected.push(50);
        expected.push(100);
        assert_eq!(to_vec(&joined), expected);
    }

    #[test]
    fn join2_concatenates() {
        let left = from_slice(&[1, 2, 3]);
        let right = from_slice(&[7, 8, 9]);
        let joined = join2(left, right);
        assert_eq!(to_vec(&joined), vec![1, 2, 3, 7, 8, 9]);
        assert!(is_balanced(&joined));
    }

    #[test]
    fn join2_with_one_side_empty() {
        let left = from_slice(&[1, 2, 3]);
        assert_eq!(to_vec(&join2(left, None)), vec![1, 2, 3]);
        let right = from_slice(&[1, 2, 3]);
        assert_eq!(to_vec(&join2(None, right)), vec![1, 2, 3]);
    }

    #[test]
    fn union_is_set_union() {
        let a = from_slice(&[1, 2, 3, 4]);
        let b = from_slice(&[3, 4, 5, 6]);
        let u = union(a, b, &cmp_i32);
        assert_eq!(to_vec(&u), vec![1, 2, 3, 4, 5, 6]);
        assert!(is_balanced(&u));
    }

    #[test]
    fn intersection_is_set_intersection() {
        let a = from_slice(&[1, 2, 3, 4]);
        let b = from_slice(&[3, 4, 5, 6]);
        let i = intersection(a, b, &cmp_i32);
        assert_eq!(to_vec(&i), vec![3, 4]);
    }

    #[test]
    fn difference_is_set_difference() {
        let a = from_slice(&[1, 2, 3, 4]);
        let b = from_slice(&[3, 4, 5, 6]);
        let d = difference(a, b, &cmp_i32);
        assert_eq!(to_vec(&d), vec![1, 2]);
    }

    #[test]
    fn union_idempotent() {
        let a = from_slice(&[1, 2, 3]);
        let a2 = from_slice(&[1, 2, 3]);
        let u = union(a, a2, &cmp_i32);
        assert_eq!(to_vec(&u), vec![1, 2, 3]);
    }

    #[test]
    fn intersection_idempotent() {
        let a = from_slice(&[1, 2, 3]);
        let a2 = from_slice(&[1, 2, 3]);
        let i = intersection(a, a2, &cmp_i32);
        assert_eq!(to_vec(&i), vec![1, 2, 3]);
    }

    #[test]
    fn difference_self_is_empty() {
        let a = from_slice(&[1, 2, 3]);
        let a2 = from_slice(&[1, 2, 3]);
        let d = difference(a, a2, &cmp_i32);
        assert_eq!(to_vec(&d), Vec::<i32>::new());
    }
}
