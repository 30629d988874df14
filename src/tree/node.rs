//! Tree vertices and the rotations that keep them balanced.
//!
//! Every function here consumes the subtree it restructures and hands back
//! the new subtree root, so the caller splices the result into whatever link
//! it took the subtree from. Ownership moves through rotations; nothing is
//! cloned.

use std::cmp::Ordering;
use std::cmp::max;

/// An owned, possibly absent child.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single tree vertex.
pub(crate) struct Node<T> {
    /// The stored record.
    pub(crate) item: T,
    /// Subtree of items strictly less than `item`.
    pub(crate) left: Link<T>,
    /// Subtree of items strictly greater than `item`.
    pub(crate) right: Link<T>,
    /// Cached height. A leaf has height 1.
    pub(crate) height: u32,
}

/// Height of a possibly absent subtree. Absent subtrees have height 0.
pub(crate) fn height<T>(link: &Link<T>) -> u32 {
    return link.as_ref().map_or(0, |node| node.height);
}

impl<T> Node<T> {
    pub(crate) fn leaf(item: T) -> Box<Node<T>> {
        return Box::new(Node {
            item,
            left: None,
            right: None,
            height: 1,
        });
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    /// `height(right) - height(left)`. Negative means left-heavy.
    pub(crate) fn balance_factor(&self) -> i64 {
        return i64::from(height(&self.right)) - i64::from(height(&self.left));
    }
}

/// Single right rotation around `node` (the LL case).
///
/// ```text
///       A            B
///      / \          / \
///     B   z  ==>   x   A
///    / \              / \
///   x   y            y   z
/// ```
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = node
        .left
        .take()
        .expect("right rotation on a node without a left child");
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    return pivot;
}

/// Single left rotation around `node` (the RR case). Mirror of [`rotate_right`].
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut pivot = node
        .right
        .take()
        .expect("left rotation on a node without a right child");
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    return pivot;
}

/// Restore the AVL property at `node`, assuming both children already
/// satisfy it, and refresh the cached height.
///
/// Left-heavy nodes take an LL rotation when the left child's outer subtree
/// is at least as tall as its inner one, and an LR double rotation
/// otherwise. Right-heavy nodes are symmetric.
pub(crate) fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let factor = node.balance_factor();

    if factor < -1 {
        let inner_taller = node
            .left
            .as_ref()
            .is_some_and(|left| height(&left.left) < height(&left.right));
        if inner_taller {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if factor > 1 {
        let inner_taller = node
            .right
            .as_ref()
            .is_some_and(|right| height(&right.right) < height(&right.left));
        if inner_taller {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    return node;
}

/// Insert `item` below `link`.
///
/// Returns the new subtree root and whether a node was created. An item
/// equal to one already present leaves the subtree untouched.
pub(crate) fn insert<T: Ord>(link: Link<T>, item: T) -> (Box<Node<T>>, bool) {
    let Some(mut node) = link else {
        return (Node::leaf(item), true);
    };

    let inserted = match item.cmp(&node.item) {
        Ordering::Less => {
            let (child, inserted) = insert(node.left.take(), item);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let (child, inserted) = insert(node.right.take(), item);
            node.right = Some(child);
            inserted
        }
        Ordering::Equal => false,
    };

    if !inserted {
        return (node, false);
    }
    return (rebalance(node), true);
}

/// Remove the item equal to `key` below `link`.
///
/// Returns the new subtree root and the removed item, if any. A node with
/// two children takes over its in-order predecessor's item, and the
/// predecessor is unlinked from the left subtree.
pub(crate) fn remove<T: Ord>(link: Link<T>, key: &T) -> (Link<T>, Option<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(&node.item) {
        Ordering::Less => {
            let (child, removed) = remove(node.left.take(), key);
            node.left = child;
            removed
        }
        Ordering::Greater => {
            let (child, removed) = remove(node.right.take(), key);
            node.right = child;
            removed
        }
        Ordering::Equal => {
            return match (node.left.take(), node.right.take()) {
                (None, right) => {
                    let Node { item, .. } = *node;
                    (right, Some(item))
                }
                (left, None) => {
                    let Node { item, .. } = *node;
                    (left, Some(item))
                }
                (Some(left), right) => {
                    let (left, predecessor) = remove_max(left);
                    let item = std::mem::replace(&mut node.item, predecessor);
                    node.left = left;
                    node.right = right;
                    (Some(rebalance(node)), Some(item))
                }
            };
        }
    };

    if removed.is_none() {
        return (Some(node), None);
    }
    return (Some(rebalance(node)), removed);
}

/// Unlink the rightmost node of a non-empty subtree, rebalancing on the way
/// back up. Returns the remaining subtree and the detached item.
fn remove_max<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.right.take() {
        None => {
            let Node { item, left, .. } = *node;
            return (left, item);
        }
        Some(right) => {
            let (right, max) = remove_max(right);
            node.right = right;
            return (Some(rebalance(node)), max);
        }
    }
}
