//! In-order traversal over an [`AvlTree`](super::AvlTree).

use std::iter::FusedIterator;

use super::node::Link;
use super::node::Node;

/// Borrowing in-order iterator.
///
/// Keeps the path of pending ancestors on an explicit stack, so traversal
/// never recurses regardless of tree size.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Iter<'a, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root.as_deref());
        return iter;
    }

    fn descend_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        return Some(&node.item);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
