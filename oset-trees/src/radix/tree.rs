//! The public `RadixTree`: a compact-prefix trie whose buckets are keyed by
//! leading byte and whose per-node children are stored in a nested
//! [`AVLTree`].

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use oset_core::{Container, Printable, PrintableNode};

use crate::avl::{AVLTree, TraversalOrder};

use super::node::{common_prefix_len, first_unit, target_vs_label, RadixNode};

/// The outcome of searching for a needle in the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// The entire needle matched: either landing exactly on a node
    /// boundary, or as a strict prefix of that node's label.
    Exists,
    /// The needle diverged mid-label or at a missing child; the node where
    /// divergence occurred is the insertion anchor.
    CanExist,
    /// The bucket for the needle's first byte is empty.
    NotFound,
}

/// The result of [`RadixTree::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub existence: Existence,
    /// The labels from the bucket root to the landing node, concatenated.
    pub word: String,
    /// How many bytes of the landing node's label matched.
    pub last_similarity: usize,
    /// Index into the needle one past the last matched byte.
    pub next_position: usize,
    /// When `existence == Exists`: whether the needle landed strictly
    /// inside the landing node's label (`last_similarity < label.len()`)
    /// rather than exactly on its boundary.
    pub is_substring: bool,
}

struct Landing<'a> {
    node: &'a RadixNode,
    existence: Existence,
    word: String,
    last_similarity: usize,
    next_position: usize,
    is_substring: bool,
}

fn find_child<'a>(children: &'a AVLTree<RadixNode>, target: Option<u8>) -> Option<&'a RadixNode> {
    children.first_where(|c| target_vs_label(target, first_unit(&c.label)))
}

fn descend<'a>(node: &'a RadixNode, needle: &str, pos: usize, prefix_so_far: &str) -> Landing<'a> {
    let remaining = &needle[pos..];
    let common = common_prefix_len(&node.label, remaining);
    let label_len = node.label.len();
    let new_pos = pos + common;

    if common == label_len {
        if new_pos == needle.len() {
            Landing {
                node,
                existence: Existence::Exists,
                word: format!("{prefix_so_far}{}", node.label),
                last_similarity: common,
                next_position: new_pos,
                is_substring: false,
            }
        } else {
            let next_byte = needle.as_bytes()[new_pos];
            match find_child(&node.children, Some(next_byte)) {
                Some(child) => descend(child, needle, new_pos, &format!("{prefix_so_far}{}", node.label)),
                None => Landing {
                    node,
                    existence: Existence::CanExist,
                    word: needle[..new_pos].to_string(),
                    last_similarity: common,
                    next_position: new_pos,
                    is_substring: false,
                },
            }
        }
    } else if new_pos == needle.len() {
        // the needle is exhausted strictly inside this node's label: it is
        // present as a substring (isSubstring), still `Exists`.
        Landing {
            node,
            existence: Existence::Exists,
            word: format!("{prefix_so_far}{}", node.label),
            last_similarity: common,
            next_position: new_pos,
            is_substring: true,
        }
    } else {
        Landing {
            node,
            existence: Existence::CanExist,
            word: needle[..new_pos].to_string(),
            last_similarity: common,
            next_position: new_pos,
            is_substring: false,
        }
    }
}

/// Inserts `needle` under `node` (whose leading byte already matches
/// `needle`'s), mutating the subtree via recursive value-returning updates
/// (`spec.md` §4.3's insert algorithm). Returns the replacement node, and
/// whether a new word was added.
///
/// `path` accumulates the final root-to-inserted-leaf label chain: a node's
/// own label is pushed only when it survives unchanged (the exact-match and
/// descend cases); a node that gets split has its pre-split label withheld
/// and only the post-split labels are pushed instead. The terminator
/// sentinel (empty label) is never pushed.
fn insert_rec(mut node: RadixNode, needle: &str, path: &mut Vec<String>) -> (RadixNode, bool) {
    let common = common_prefix_len(&node.label, needle);
    let label_len = node.label.len();

    if common == label_len {
        path.push(node.label.clone());

        if common == needle.len() {
            if node.is_leaf() {
                // the path already spells exactly this word.
                return (node, false);
            }
            let has_terminator = find_child(&node.children, None).is_some();
            if has_terminator {
                return (node, false);
            }
            node.children.insert(RadixNode::leaf(String::new()));
            return (node, true);
        }

        let remaining = &needle[common..];
        let next_byte = remaining.as_bytes()[0];
        match node.children.remove_first_where(|c| target_vs_label(Some(next_byte), first_unit(&c.label))) {
            Some(child) => {
                let (new_child, inserted) = insert_rec(child, remaining, path);
                node.children.insert(new_child);
                (node, inserted)
            }
            None => {
                let was_leaf = node.is_leaf();
                let new_child = RadixNode::leaf(remaining.to_string());
                path.push(new_child.label.clone());
                node.children.insert(new_child);
                if was_leaf {
                    node.children.insert(RadixNode::leaf(String::new()));
                }
                (node, true)
            }
        }
    } else {
        let common_str = node.label[..common].to_string();
        let tail_old = node.label[common..].to_string();
        let tail_new = needle[common..].to_string();

        let mut rewritten = node;
        rewritten.label = tail_old;

        let new_sibling = RadixNode::leaf(tail_new.clone());
        let mut merged = RadixNode::leaf(common_str);
        merged.children.insert(rewritten);
        merged.children.insert(new_sibling);

        path.push(merged.label.clone());
        if !tail_new.is_empty() {
            path.push(tail_new);
        }

        (merged, true)
    }
}

fn merge_single_child(node: &mut RadixNode) {
    if node.children.len() == 1 {
        let only = node.children.remove_first_where(|_| core::cmp::Ordering::Equal).expect("len == 1");
        node.label.push_str(&only.label);
        node.children = only.children;
    }
}

/// Number of stored words in the subtree rooted at `node` (every leaf,
/// including an empty-label terminator, terminates exactly one word).
fn count_words(node: &RadixNode) -> usize {
    if node.is_leaf() {
        1
    } else {
        node.children.ordered(TraversalOrder::InOrder).map(count_words).sum()
    }
}

/// Returns the replacement subtree (`None` if the whole subtree was
/// removed) and the number of stored words removed.
fn delete_rec(mut node: RadixNode, needle: &str, delete_if_substring: bool) -> (Option<RadixNode>, usize) {
    let common = common_prefix_len(&node.label, needle);
    let label_len = node.label.len();

    if common < label_len {
        if common == needle.len() {
            // isSubstring: needle is a strict prefix of this node's label.
            if delete_if_substring {
                (None, count_words(&node))
            } else {
                (Some(node), 0)
            }
        } else {
            (Some(node), 0)
        }
    } else {
        let remaining = &needle[common..];
        if remaining.is_empty() {
            if delete_if_substring {
                // the needle terminates exactly on this node's boundary;
                // deleteIfSubstring removes the whole subtree rooted here
                // whether or not this node is itself a stored word.
                return (None, count_words(&node));
            }
            if node.is_leaf() {
                (None, 1)
            } else {
                match node.children.remove_first_where(|c| target_vs_label(None, first_unit(&c.label))) {
                    Some(_) => {
                        merge_single_child(&mut node);
                        (Some(node), 1)
                    }
                    None => (Some(node), 0),
                }
            }
        } else {
            let next_byte = remaining.as_bytes()[0];
            match node.children.remove_first_where(|c| target_vs_label(Some(next_byte), first_unit(&c.label))) {
                None => (Some(node), 0),
                Some(child) => {
                    let (new_child, removed) = delete_rec(child, remaining, delete_if_substring);
                    if let Some(nc) = new_child {
                        node.children.insert(nc);
                    }
                    if removed > 0 {
                        merge_single_child(&mut node);
                    }
                    (Some(node), removed)
                }
            }
        }
    }
}

fn collect_words(node: &RadixNode, prefix: &str, out: &mut Vec<String>) {
    let full = format!("{prefix}{}", node.label);
    if node.is_leaf() {
        out.push(full);
        return;
    }
    for child in node.children.ordered(TraversalOrder::InOrder) {
        if child.label.is_empty() {
            out.push(full.clone());
        } else {
            collect_words(child, &full, out);
        }
    }
}

/// A compact-prefix trie whose buckets (keyed by leading byte) are
/// independent, and whose per-node children are stored in a nested
/// [`AVLTree`] ordered by leading byte.
pub struct RadixTree {
    buckets: Vec<(u8, RadixNode)>,
    len: usize,
}

impl RadixTree {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        RadixTree {
            buckets: Vec::new(),
            len: 0,
        }
    }

    /// Number of stored words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if no words are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every bucket.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Inserts `word` (trimmed; a no-op for empty input). Returns the
    /// ordered sequence of labels traversed/created while inserting, the
    /// Rust binding of `spec.md`'s optional `returnPath` flag: the path is
    /// always built since the recursion already produces it, and callers
    /// that don't need it simply ignore the return value.
    pub fn insert(&mut self, word: &str) -> Vec<String> {
        let word = word.trim();
        if word.is_empty() {
            return Vec::new();
        }
        let first = word.as_bytes()[0];
        match self.buckets.iter().position(|(b, _)| *b == first) {
            None => {
                let node = RadixNode::leaf(word.to_string());
                let path = alloc::vec![node.label.clone()];
                self.buckets.push((first, node));
                self.len += 1;
                path
            }
            Some(idx) => {
                let (_, root) = self.buckets.remove(idx);
                let mut path = Vec::new();
                let (new_root, inserted) = insert_rec(root, word, &mut path);
                if inserted {
                    self.len += 1;
                }
                self.buckets.insert(idx, (first, new_root));
                path
            }
        }
    }

    /// `true` iff `search(pre).existence == Existence::Exists`.
    #[must_use]
    pub fn contains(&self, pre: &str) -> bool {
        self.search(pre).existence == Existence::Exists
    }

    /// Searches for `pre`, without mutating the trie.
    #[must_use]
    pub fn search(&self, pre: &str) -> SearchResult {
        if pre.is_empty() {
            return SearchResult {
                existence: Existence::NotFound,
                word: String::new(),
                last_similarity: 0,
                next_position: 0,
                is_substring: false,
            };
        }
        let first = pre.as_bytes()[0];
        match self.buckets.iter().find(|(b, _)| *b == first) {
            None => SearchResult {
                existence: Existence::NotFound,
                word: String::new(),
                last_similarity: 0,
                next_position: 0,
                is_substring: false,
            },
            Some((_, root)) => {
                let landing = descend(root, pre, 0, "");
                SearchResult {
                    existence: landing.existence,
                    word: landing.word,
                    last_similarity: landing.last_similarity,
                    next_position: landing.next_position,
                    is_substring: landing.is_substring,
                }
            }
        }
    }

    /// `search`, inserting `pre` as a side effect when its existence
    /// matches `insert_on` and is not already `Exists`.
    pub fn search_or_insert(&mut self, pre: &str, insert_on: Existence) -> SearchResult {
        let result = self.search(pre);
        if result.existence == insert_on && result.existence != Existence::Exists {
            self.insert(pre);
        }
        result
    }

    /// All stored words beginning with `pre`. With an empty prefix, every
    /// bucket contributes its words (buckets in storage order, words within
    /// a bucket in ascending label order).
    #[must_use]
    pub fn get_possible_suffix(&self, pre: &str) -> Vec<String> {
        if pre.is_empty() {
            let mut out = Vec::new();
            for (_, root) in &self.buckets {
                collect_words(root, "", &mut out);
            }
            return out;
        }
        let first = pre.as_bytes()[0];
        match self.buckets.iter().find(|(b, _)| *b == first) {
            None => Vec::new(),
            Some((_, root)) => {
                let landing = descend(root, pre, 0, "");
                match landing.existence {
                    Existence::Exists => {
                        let prefix_before = &landing.word[..landing.word.len() - landing.node.label.len()];
                        let mut out = Vec::new();
                        collect_words(landing.node, prefix_before, &mut out);
                        out
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    /// Removes `pre`: the exact word (if `delete_if_substring` is false) or
    /// the entire subtree rooted where `pre` terminates (if true). Returns
    /// whether anything was removed.
    pub fn delete(&mut self, pre: &str, delete_if_substring: bool) -> bool {
        if pre.is_empty() {
            return false;
        }
        let result = self.search(pre);
        if result.existence != Existence::Exists {
            return false;
        }
        if result.is_substring && !delete_if_substring {
            return false;
        }

        let first = pre.as_bytes()[0];
        let idx = self
            .buckets
            .iter()
            .position(|(b, _)| *b == first)
            .expect("search already located the bucket");
        let (_, root) = self.buckets.remove(idx);
        let (new_root, removed) = delete_rec(root, pre, delete_if_substring);
        if let Some(nr) = new_root {
            self.buckets.insert(idx, (first, nr));
        }
        self.len -= removed;
        removed > 0
    }
}

impl Default for RadixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for RadixTree {
    fn len(&self) -> usize {
        self.len
    }
}

impl FromIterator<String> for RadixTree {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tree = RadixTree::new();
        for word in iter {
            tree.insert(&word);
        }
        tree
    }
}

/// A `RadixNode`'s rendered form, for the read-only [`Printable`]
/// capability.
#[derive(Debug, Clone)]
pub struct RadixPrintNode {
    label: String,
    children: Vec<RadixPrintNode>,
}

impl PrintableNode for RadixPrintNode {
    fn printable_value(&self) -> String {
        self.label.clone()
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }
}

fn build_print_node(node: &RadixNode) -> RadixPrintNode {
    let children = node
        .children
        .ordered(TraversalOrder::InOrder)
        .map(build_print_node)
        .collect();
    RadixPrintNode {
        label: node.label.clone(),
        children,
    }
}

impl<'a> Printable<'a> for RadixTree {
    type Node = RadixPrintNode;

    fn name(&self) -> &'static str {
        "RadixTree"
    }

    fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn root_nodes(&'a self) -> Vec<Self::Node> {
        self.buckets.iter().map(|(_, root)| build_print_node(root)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod insert {
        use super::*;

        #[test]
        fn insert_then_contains() {
            let mut t = RadixTree::new();
            t.insert("hello");
            assert!(t.contains("hello"));
            assert_eq!(t.len(), 1);
        }

        #[test]
        fn insert_empty_is_noop() {
            let mut t = RadixTree::new();
            assert!(t.insert("").is_empty());
            assert_eq!(t.len(), 0);
        }

        #[test]
        fn insert_duplicate_is_noop() {
            let mut t = RadixTree::new();
            t.insert("hello");
            t.insert("hello");
            assert_eq!(t.len(), 1);
        }

        #[test]
        fn insert_splits_on_longest_common_prefix() {
            let mut t = RadixTree::new();
            t.insert("hello");
            t.insert("help");
            assert!(t.contains("hello"));
            assert!(t.contains("help"));
            assert_eq!(t.len(), 2);
        }

        #[test]
        fn insert_shorter_word_after_longer_adds_terminator() {
            let mut t = RadixTree::new();
            t.insert("hello");
            t.insert("hell");
            assert!(t.contains("hello"));
            assert!(t.contains("hell"));
            assert_eq!(t.len(), 2);
        }

        #[test]
        fn insert_longer_word_after_shorter() {
            let mut t = RadixTree::new();
            t.insert("hell");
            t.insert("hello");
            assert!(t.contains("hell"));
            assert!(t.contains("hello"));
            assert_eq!(t.len(), 2);
        }

        #[test]
        fn insert_path_excludes_pre_split_label_and_terminator() {
            let mut t = RadixTree::new();
            assert_eq!(t.insert("sum"), vec!["sum"]);
            assert_eq!(t.insert("summer"), vec!["sum", "mer"]);
            assert_eq!(t.insert("summed"), vec!["sum", "me", "d"]);
        }

        #[test]
        fn insert_path_excludes_terminator_on_shorter_word() {
            let mut t = RadixTree::new();
            t.insert("hello");
            // "hell" is a strict prefix of "hello": the split's empty
            // tail (the terminator for "hell") must not appear in the path.
            assert_eq!(t.insert("hell"), vec!["hell"]);
        }

        #[test]
        fn insert_many_words_sharing_a_bucket() {
            let mut t = RadixTree::new();
            for w in ["cat", "car", "cart", "card", "care"] {
                t.insert(w);
            }
            assert_eq!(t.len(), 5);
            for w in ["cat", "car", "cart", "card", "care"] {
                assert!(t.contains(w), "missing {w}");
            }
        }
    }

    mod search {
        use super::*;

        #[test]
        fn not_found_for_unknown_bucket() {
            let t = RadixTree::new();
            assert_eq!(t.search("z").existence, Existence::NotFound);
        }

        #[test]
        fn can_exist_on_divergence() {
            let mut t = RadixTree::new();
            t.insert("hello");
            let result = t.search("hexx");
            assert_eq!(result.existence, Existence::CanExist);
        }

        #[test]
        fn exists_as_substring() {
            let mut t = RadixTree::new();
            t.insert("hello");
            let result = t.search("hel");
            assert_eq!(result.existence, Existence::Exists);
        }
    }

    mod suffix {
        use super::*;

        #[test]
        fn get_possible_suffix_collects_matches() {
            let mut t = RadixTree::new();
            for w in ["cat", "car", "cart", "card", "care", "dog"] {
                t.insert(w);
            }
            let mut suffixes = t.get_possible_suffix("car");
            suffixes.sort();
            assert_eq!(suffixes, vec!["car", "card", "care", "cart"]);
        }

        #[test]
        fn get_possible_suffix_empty_prefix_collects_everything() {
            let mut t = RadixTree::new();
            for w in ["cat", "dog"] {
                t.insert(w);
            }
            let mut suffixes = t.get_possible_suffix("");
            suffixes.sort();
            assert_eq!(suffixes, vec!["cat", "dog"]);
        }

        #[test]
        fn get_possible_suffix_unknown_prefix_is_empty() {
            let mut t = RadixTree::new();
            t.insert("cat");
            assert!(t.get_possible_suffix("zzz").is_empty());
        }
    }

    mod delete {
        use super::*;

        #[test]
        fn delete_leaf_word() {
            let mut t = RadixTree::new();
            t.insert("hello");
            assert!(t.delete("hello", false));
            assert!(!t.contains("hello"));
            assert!(t.is_empty());
        }

        #[test]
        fn delete_compacts_single_remaining_child() {
            let mut t = RadixTree::new();
            t.insert("hello");
            t.insert("help");
            assert!(t.delete("hello", false));
            assert!(!t.contains("hello"));
            assert!(t.contains("help"));
            assert_eq!(t.len(), 1);
        }

        #[test]
        fn delete_refuses_plain_substring() {
            let mut t = RadixTree::new();
            t.insert("hello");
            assert!(!t.delete("hel", false));
            assert!(t.contains("hello"));
        }

        #[test]
        fn delete_exact_word_under_shared_prefix_is_not_mistaken_for_substring() {
            // "hello" lands on a landing node ("lo") reached through a
            // non-empty prefix ("hel"): an exact boundary match here must not
            // be refused as if it were a substring match.
            let mut t = RadixTree::new();
            t.insert("hello");
            t.insert("help");
            assert!(t.delete("hello", false));
            assert!(!t.contains("hello"));
            assert!(t.contains("help"));

            assert!(t.delete("help", false));
            assert!(t.is_empty());
        }

        #[test]
        fn delete_if_substring_removes_whole_subtree() {
            let mut t = RadixTree::new();
            for w in ["hello", "help", "helmet"] {
                t.insert(w);
            }
            assert_eq!(t.len(), 3);
            assert!(t.delete("hel", true));
            // the whole subtree (3 stored words) was removed, not just 1.
            assert_eq!(t.len(), 0);
            assert!(t.is_empty());
        }

        #[test]
        fn delete_absent_word_returns_false() {
            let mut t = RadixTree::new();
            t.insert("hello");
            assert!(!t.delete("goodbye", false));
        }
    }
}
