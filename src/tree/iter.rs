//! Traversal iterators.
//!
//! Each iterator owns its stack(s) and borrows the tree, so the tree cannot
//! be modified while a traversal is in progress.

use std::iter::FusedIterator;

use super::TreeNode;

/// In-order traversal (ascending order)
pub struct InorderIter<'a, T> {
    /// Nodes whose element has not been yielded yet; the top of the stack is
    /// the next one
    stack: Vec<&'a TreeNode<T>>,
}

impl<'a, T> InorderIter<'a, T> {
    pub(super) fn new(root: Option<&'a TreeNode<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for InorderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.element)
    }
}

impl<T> FusedIterator for InorderIter<'_, T> {}

/// Pre-order traversal (node, left subtree, right subtree)
pub struct PreorderIter<'a, T> {
    stack: Vec<&'a TreeNode<T>>,
}

impl<'a, T> PreorderIter<'a, T> {
    pub(super) fn new(root: Option<&'a TreeNode<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreorderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so that the left child is on top
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(&node.element)
    }
}

impl<T> FusedIterator for PreorderIter<'_, T> {}

/// Post-order traversal (left subtree, right subtree, node).
///
/// The whole output stack is filled when the iterator is created: popping
/// nodes in (node, right, left) order and pushing them on a second stack
/// leaves them in (left, right, node) order from the top.
pub struct PostorderIter<'a, T> {
    output: Vec<&'a TreeNode<T>>,
}

impl<'a, T> PostorderIter<'a, T> {
    pub(super) fn new(root: Option<&'a TreeNode<T>>) -> Self {
        let mut pending: Vec<&'a TreeNode<T>> = root.into_iter().collect();
        let mut output = Vec::new();

        while let Some(node) = pending.pop() {
            output.push(node);
            pending.extend(node.left());
            pending.extend(node.right());
        }

        Self { output }
    }

    /// Remaining nodes in post-order
    pub(super) fn into_nodes(self) -> impl Iterator<Item = &'a TreeNode<T>> {
        self.output.into_iter().rev()
    }
}

impl<'a, T> Iterator for PostorderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.output.pop().map(|node| &node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.output.len(), Some(self.output.len()))
    }
}

impl<T> ExactSizeIterator for PostorderIter<'_, T> {}
impl<T> FusedIterator for PostorderIter<'_, T> {}
