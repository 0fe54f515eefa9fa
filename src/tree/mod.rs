//! Unbalanced binary search tree.
//!
//! Each node exclusively owns its children, so splicing a node out of the
//! tree is a matter of replacing the owning child slot. All walks (insertion,
//! search, height, traversals, drop) use loops and explicit stacks: a tree
//! built from sorted input degenerates into a chain, and native recursion on
//! such a chain would exhaust the call stack.
//!
//! ## Usage
//!
//! ```
//! use word_tracker::tree::OrderedTree;
//!
//! let mut tree: OrderedTree<&str> = OrderedTree::new();
//! for word in ["the", "be", "to", "of", "and", "a", "in"] {
//!     assert_eq!(tree.add(word), Ok(true));
//! }
//! let sorted: Vec<_> = tree.inorder_iter().copied().collect();
//! assert_eq!(sorted, ["a", "and", "be", "in", "of", "the", "to"]);
//! ```

mod encoding;
pub mod iter;

use std::cmp::Ordering;
use std::fmt;

use crate::error::TreeError;
pub use iter::{InorderIter, PostorderIter, PreorderIter};

type Link<T> = Option<Box<TreeNode<T>>>;

/// A node of the tree: one element and up to two owned children
pub struct TreeNode<T> {
    element: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> TreeNode<T> {
    fn new(element: T) -> Self {
        Self {
            element,
            left: None,
            right: None,
        }
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    /// Consumes a node and returns its element
    pub fn into_element(self) -> T {
        self.element
    }

    pub fn left(&self) -> Option<&TreeNode<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&TreeNode<T>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("element", &self.element)
            .field("left", &self.left.is_some())
            .field("right", &self.right.is_some())
            .finish()
    }
}

/// A binary search tree over totally ordered elements.
///
/// Elements comparing equal are never both stored: [`OrderedTree::add`]
/// rejects them. Merging payloads of equal elements is up to the caller.
pub struct OrderedTree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> OrderedTree<T> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Creates a tree holding a single element
    pub fn with_root(element: T) -> Self {
        Self {
            root: Some(Box::new(TreeNode::new(element))),
            size: 1,
        }
    }

    /// Returns the root node
    pub fn root(&self) -> Result<&TreeNode<T>, TreeError> {
        self.root.as_deref().ok_or(TreeError::EmptyTree)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of levels of the tree (0 when empty).
    ///
    /// Computed on each call as `1 + max(height(left), height(right))`,
    /// evaluated with an explicit stack of (node, depth) pairs.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&TreeNode<T>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = node.left() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Discards all the nodes
    pub fn clear(&mut self) {
        dismantle(self.root.take().into_iter().collect());
        self.size = 0;
    }

    /// Removes the smallest element.
    ///
    /// The removed node's right subtree takes its place. Returns `None` when
    /// the tree is empty.
    pub fn remove_min(&mut self) -> Option<TreeNode<T>> {
        let mut slot = &mut self.root;
        while slot.as_ref().is_some_and(|node| node.left.is_some()) {
            if let Some(node) = slot {
                slot = &mut node.left;
            }
        }

        let mut node = slot.take()?;
        *slot = node.right.take();
        self.size -= 1;
        Some(*node)
    }

    /// Removes the largest element; symmetric to [`OrderedTree::remove_min`]
    pub fn remove_max(&mut self) -> Option<TreeNode<T>> {
        let mut slot = &mut self.root;
        while slot.as_ref().is_some_and(|node| node.right.is_some()) {
            if let Some(node) = slot {
                slot = &mut node.right;
            }
        }

        let mut node = slot.take()?;
        *slot = node.left.take();
        self.size -= 1;
        Some(*node)
    }

    /// Elements in ascending order
    pub fn inorder_iter(&self) -> InorderIter<'_, T> {
        InorderIter::new(self.root.as_deref())
    }

    /// Each node before its left then right subtrees
    pub fn preorder_iter(&self) -> PreorderIter<'_, T> {
        PreorderIter::new(self.root.as_deref())
    }

    /// Left subtree, right subtree, then the node itself
    pub fn postorder_iter(&self) -> PostorderIter<'_, T> {
        PostorderIter::new(self.root.as_deref())
    }
}

impl<T: Ord> OrderedTree<T> {
    /// Looks for the node holding an element equal to `key`.
    ///
    /// Fails with [`TreeError::InvalidArgument`] when no key is given;
    /// a missing element is `Ok(None)`.
    pub fn search<'k>(
        &self,
        key: impl Into<Option<&'k T>>,
    ) -> Result<Option<&TreeNode<T>>, TreeError>
    where
        T: 'k,
    {
        let key = key
            .into()
            .ok_or(TreeError::InvalidArgument("search key cannot be absent"))?;
        Ok(self.find(key))
    }

    /// Mutable access to the element equal to `key`.
    ///
    /// The caller must not change the part of the element that drives its
    /// ordering.
    pub fn search_mut<'k>(
        &mut self,
        key: impl Into<Option<&'k T>>,
    ) -> Result<Option<&mut T>, TreeError>
    where
        T: 'k,
    {
        let key = key
            .into()
            .ok_or(TreeError::InvalidArgument("search key cannot be absent"))?;

        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(&node.element) {
                Ordering::Equal => return Ok(Some(&mut node.element)),
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        Ok(None)
    }

    pub fn contains<'k>(&self, key: impl Into<Option<&'k T>>) -> Result<bool, TreeError>
    where
        T: 'k,
    {
        let key = key
            .into()
            .ok_or(TreeError::InvalidArgument("entry cannot be absent"))?;
        Ok(self.find(key).is_some())
    }

    /// Inserts an element as a new leaf.
    ///
    /// Returns `Ok(false)` without modifying the tree when an equal element
    /// is already stored.
    pub fn add(&mut self, element: impl Into<Option<T>>) -> Result<bool, TreeError> {
        let element = element
            .into()
            .ok_or(TreeError::InvalidArgument("new entry cannot be absent"))?;
        Ok(self.insert(element))
    }

    fn find(&self, key: &T) -> Option<&TreeNode<T>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.element) {
                Ordering::Equal => return Some(node),
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
            }
        }
        None
    }

    fn insert(&mut self, element: T) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match element.cmp(&node.element) {
                Ordering::Equal => return false,
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
            }
        }

        *slot = Some(Box::new(TreeNode::new(element)));
        self.size += 1;
        true
    }
}

/// Frees subtrees one node at a time
fn dismantle<T>(mut stack: Vec<Box<TreeNode<T>>>) {
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inorder_iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = InorderIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder_iter()
    }
}

/// Duplicates are skipped
impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(node: Option<&TreeNode<i32>>) -> Option<i32> {
        node.map(|n| *n.element())
    }

    #[test]
    fn test_leaf_attachment() {
        let tree: OrderedTree<i32> = [4, 2, 6, 1, 3, 5].into_iter().collect();

        let root = tree.root().expect("tree should not be empty");
        assert_eq!(*root.element(), 4);
        assert_eq!(elements(root.left()), Some(2));
        assert_eq!(elements(root.right()), Some(6));

        let two = root.left().unwrap();
        assert_eq!(elements(two.left()), Some(1));
        assert_eq!(elements(two.right()), Some(3));

        let six = root.right().unwrap();
        assert_eq!(elements(six.left()), Some(5));
        assert_eq!(elements(six.right()), None);
    }

    #[test]
    fn test_remove_min_splices_right_subtree() {
        // 5 -> left 2 -> right 3 -> right 4
        let mut tree: OrderedTree<i32> = [5, 2, 3, 4, 8].into_iter().collect();

        let removed = tree.remove_min().expect("should remove a node");
        assert!(removed.is_leaf());
        assert_eq!(removed.into_element(), 2);

        let root = tree.root().unwrap();
        assert_eq!(elements(root.left()), Some(3));
        assert_eq!(elements(root.left().unwrap().right()), Some(4));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_remove_root_promotes_subtree() {
        let mut tree: OrderedTree<i32> = [1, 3, 2].into_iter().collect();
        assert_eq!(tree.remove_min().map(TreeNode::into_element), Some(1));
        assert_eq!(*tree.root().unwrap().element(), 3);

        let mut tree: OrderedTree<i32> = [9, 4, 6].into_iter().collect();
        assert_eq!(tree.remove_max().map(TreeNode::into_element), Some(9));
        assert_eq!(*tree.root().unwrap().element(), 4);
        assert_eq!(elements(tree.root().unwrap().right()), Some(6));
    }
}
