//! Height-balanced binary search tree.
//!
//! An [`AvlTree`] is an ordered set: it holds at most one item per
//! equivalence class of `T`'s total order. Inserting an item that compares
//! equal to a stored one keeps the stored one.
//!
//! # Invariants
//!
//! After every `insert`/`remove` completes:
//!
//! - Every item in a node's left subtree is strictly less than the node's
//!   item, and every item in its right subtree strictly greater.
//! - Sibling subtree heights differ by at most one.
//! - Each node caches `1 + max(height(left), height(right))`, with an absent
//!   subtree counting as height 0.
//! - `len()` equals the number of nodes.
//!
//! [`AvlTree::verify`] checks all four by full traversal.
//!
//! # Operations
//!
//! - `insert(item)`: O(log n)
//! - `remove(key)` / `take(key)`: O(log n)
//! - `contains(key)` / `get(key)`: O(log n)
//! - `len()`: O(1)
//! - `iter()`: O(n) total, in ascending order
//!
//! Weight aggregation over a tree of composite records lives in
//! [`crate::query`].

mod iter;
pub(crate) mod node;

use std::cmp::Ordering;
use std::fmt;

pub use iter::Iter;
use node::Link;
use node::Node;

/// Token marking an absent child in [`AvlTree::to_tree_string`].
const NULL_MARKER: &str = "null";
/// Indent emitted once per level between the root and a node's parent.
const INDENT: &str = "   ";
/// Marker emitted immediately before every non-root entry.
const BRANCH: &str = "|--";

/// A structural invariant that [`AvlTree::verify`] found broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// Two in-order neighbours are not strictly increasing.
    #[error("in-order traversal is not strictly increasing at position {position}")]
    Unordered { position: usize },
    /// A node's children differ in height by more than one.
    #[error("node at depth {depth} is unbalanced: left height {left}, right height {right}")]
    Unbalanced { depth: usize, left: u32, right: u32 },
    /// A node's cached height disagrees with its children.
    #[error("node at depth {depth} caches height {cached} but has height {actual}")]
    StaleHeight { depth: usize, cached: u32, actual: u32 },
    /// The element counter disagrees with the number of nodes.
    #[error("tree holds {counted} nodes but reports len {len}")]
    LenMismatch { counted: usize, len: usize },
}

/// A self-balancing ordered set.
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> AvlTree<T> {
    /// Create an empty tree.
    pub fn new() -> AvlTree<T> {
        return AvlTree { root: None, len: 0 };
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.root.is_none();
    }

    /// Height of the root, 0 when empty.
    pub fn height(&self) -> u32 {
        return node::height(&self.root);
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Iterate over the items in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        return Iter::new(&self.root, self.len);
    }

    /// Root node, for folds that walk the linkage directly.
    pub(crate) fn root(&self) -> Option<&Node<T>> {
        return self.root.as_deref();
    }
}

impl<T: Ord> AvlTree<T> {
    /// Add `item` to the tree.
    ///
    /// Returns `false`, leaving the tree unchanged, if an equal item is
    /// already stored.
    pub fn insert(&mut self, item: T) -> bool {
        let (root, inserted) = node::insert(self.root.take(), item);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        return inserted;
    }

    /// Remove the item equal to `key`. Returns whether one was found.
    pub fn remove(&mut self, key: &T) -> bool {
        return self.take(key).is_some();
    }

    /// Remove and return the stored item equal to `key`.
    pub fn take(&mut self, key: &T) -> Option<T> {
        let (root, removed) = node::remove(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        return removed;
    }

    /// The stored item equal to `key`.
    pub fn get(&self, key: &T) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.item) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.item),
            }
        }
        return None;
    }

    pub fn contains(&self, key: &T) -> bool {
        return self.get(key).is_some();
    }

    /// Check every structural invariant by walking the whole tree.
    pub fn verify(&self) -> Result<(), InvariantError> {
        let mut counted = 0;
        check_shape(self.root.as_deref(), 0, &mut counted)?;
        if counted != self.len {
            return Err(InvariantError::LenMismatch {
                counted,
                len: self.len,
            });
        }

        let mut previous: Option<&T> = None;
        for (position, item) in self.iter().enumerate() {
            if previous.is_some_and(|previous| previous >= item) {
                return Err(InvariantError::Unordered { position });
            }
            previous = Some(item);
        }
        return Ok(());
    }
}

/// Returns the recomputed height of `node`'s subtree.
fn check_shape<T>(
    node: Option<&Node<T>>,
    depth: usize,
    counted: &mut usize,
) -> Result<u32, InvariantError> {
    let Some(node) = node else {
        return Ok(0);
    };
    *counted += 1;

    let left = check_shape(node.left.as_deref(), depth + 1, counted)?;
    let right = check_shape(node.right.as_deref(), depth + 1, counted)?;
    if left.abs_diff(right) > 1 {
        return Err(InvariantError::Unbalanced { depth, left, right });
    }

    let actual = 1 + left.max(right);
    if node.height != actual {
        return Err(InvariantError::StaleHeight {
            depth,
            cached: node.height,
            actual,
        });
    }
    return Ok(actual);
}

impl<T: fmt::Display> AvlTree<T> {
    /// Render the tree in pre-order, one node per line.
    ///
    /// Each entry starts on a new line. Below the root, an entry at depth
    /// `d` is prefixed by `d - 1` indents and a branch marker. A node prints
    /// its cached height immediately followed by its item; an absent child
    /// prints `null`.
    ///
    /// ```
    /// use babynames::tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(
    ///     tree.to_tree_string(),
    ///     "\n22\n|--11\n   |--null\n   |--null\n|--13\n   |--null\n   |--null",
    /// );
    /// ```
    pub fn to_tree_string(&self) -> String {
        return PreOrder(self.root.as_deref()).to_string();
    }
}

/// Display adapter for [`AvlTree::to_tree_string`].
struct PreOrder<'a, T>(Option<&'a Node<T>>);

impl<T: fmt::Display> fmt::Display for PreOrder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return render_pre_order(self.0, 0, f);
    }
}

fn render_pre_order<T, W>(node: Option<&Node<T>>, level: usize, output: &mut W) -> fmt::Result
where
    T: fmt::Display,
    W: fmt::Write,
{
    output.write_char('\n')?;
    if level > 0 {
        for _ in 1..level {
            output.write_str(INDENT)?;
        }
        output.write_str(BRANCH)?;
    }

    match node {
        Some(node) => {
            write!(output, "{}{}", node.height, node.item)?;
            render_pre_order(node.left.as_deref(), level + 1, output)?;
            render_pre_order(node.right.as_deref(), level + 1, output)?;
        }
        None => output.write_str(NULL_MARKER)?,
    }
    return Ok(());
}

/// In-order flattening: every item followed by two spaces.
impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.iter() {
            write!(f, "{item}  ")?;
        }
        return Ok(());
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_set().entries(self.iter()).finish();
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        return self.iter();
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(items);
        return tree;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree() {
        let tree: AvlTree<i32> = AvlTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.to_tree_string(), "\nnull");
        assert_eq!(tree.to_string(), "");
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn ascending_inserts_build_perfect_tree() {
        let mut tree = AvlTree::new();
        for key in 1..=7 {
            tree.insert(key);
            tree.verify().unwrap();
        }
        assert_eq!(tree.root().unwrap().item, 4);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn descending_inserts_build_perfect_tree() {
        let tree: AvlTree<i32> = (1..=7).rev().collect();
        assert_eq!(tree.root().unwrap().item, 4);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn duplicate_insert_keeps_len() {
        let mut tree = AvlTree::new();
        assert!(tree.insert(5));
        assert!(!tree.insert(5));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn duplicate_insert_keeps_first_item() {
        #[derive(Debug)]
        struct Keyed(u8, &'static str);
        impl PartialEq for Keyed {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }
        impl Eq for Keyed {}
        impl PartialOrd for Keyed {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Keyed {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.cmp(&other.0)
            }
        }

        let mut tree = AvlTree::new();
        tree.insert(Keyed(1, "first"));
        tree.insert(Keyed(1, "second"));
        assert_eq!(tree.get(&Keyed(1, "")).unwrap().1, "first");
    }

    #[test]
    fn contains_and_get() {
        let tree: AvlTree<i32> = [10, 5, 15, 3].into_iter().collect();
        assert!(tree.contains(&3));
        assert!(!tree.contains(&4));
        assert_eq!(tree.get(&15), Some(&15));
    }

    #[test]
    fn remove_reports_presence() {
        let mut tree: AvlTree<i32> = (0..10).collect();
        assert!(tree.remove(&4));
        assert!(!tree.remove(&4));
        assert_eq!(tree.len(), 9);
        assert!(!tree.contains(&4));
        assert_eq!(tree.verify(), Ok(()));
    }

    #[test]
    fn remove_everything_empties_tree() {
        let mut tree: AvlTree<i32> = (0..50).collect();
        for key in (0..50).step_by(2).chain((1..50).step_by(2)) {
            assert!(tree.remove(&key));
            tree.verify().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn take_returns_stored_item() {
        let mut tree: AvlTree<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(tree.take(&2), Some(2));
        assert_eq!(tree.take(&2), None);
    }

    #[test]
    fn iter_is_sorted_and_exact() {
        let tree: AvlTree<i32> = [9, 1, 8, 2, 7, 3].into_iter().collect();
        let iter = tree.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.copied().collect::<Vec<_>>(), vec![1, 2, 3, 7, 8, 9]);
    }

    #[test]
    fn display_flattens_in_order() {
        let tree: AvlTree<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(tree.to_string(), "1  2  3  ");
    }

    #[test]
    fn tree_string_indents_per_level() {
        let tree: AvlTree<i32> = (1..=4).collect();
        let expected = concat!(
            "\n32",
            "\n|--11",
            "\n   |--null",
            "\n   |--null",
            "\n|--23",
            "\n   |--null",
            "\n   |--14",
            "\n      |--null",
            "\n      |--null",
        );
        assert_eq!(tree.to_tree_string(), expected);
    }

    #[test]
    fn clear_resets() {
        let mut tree: AvlTree<i32> = (0..5).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.insert(1));
    }

    #[test]
    fn debug_lists_items() {
        let tree: AvlTree<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{tree:?}"), "{1, 2}");
    }

    #[test]
    fn error_messages() {
        let error = InvariantError::LenMismatch { counted: 3, len: 4 };
        assert_eq!(error.to_string(), "tree holds 3 nodes but reports len 4");
    }
}
