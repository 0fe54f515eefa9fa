//! Serde support for [`OrderedTree`].
//!
//! A tree is written as a flat sequence of `(children, element)` entries in
//! post-order, where `children` flags whether the node has a left and/or a
//! right subtree. Decoding rebuilds the exact same shape bottom-up with a
//! stack of finished subtrees, without nesting in the encoded form and
//! without recursion.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{dismantle, OrderedTree, TreeNode};

const HAS_LEFT: u8 = 0b01;
const HAS_RIGHT: u8 = 0b10;

#[derive(Serialize, Deserialize)]
struct NodeEntry<E>(u8, E);

impl<T: Serialize> Serialize for OrderedTree<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for node in self.postorder_iter().into_nodes() {
            let mut children = 0;
            if node.left.is_some() {
                children |= HAS_LEFT;
            }
            if node.right.is_some() {
                children |= HAS_RIGHT;
            }
            seq.serialize_element(&NodeEntry(children, &node.element))?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for OrderedTree<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(PostorderVisitor(PhantomData))
    }
}

/// Subtrees decoded but not yet attached to a parent
struct Forest<T>(Vec<Box<TreeNode<T>>>);

impl<T> Drop for Forest<T> {
    fn drop(&mut self) {
        dismantle(std::mem::take(&mut self.0));
    }
}

struct PostorderVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for PostorderVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = OrderedTree<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a post-order sequence of tree nodes")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut forest = Forest(Vec::new());
        let mut size = 0;

        while let Some(NodeEntry(children, element)) = seq.next_element::<NodeEntry<T>>()? {
            if children & !(HAS_LEFT | HAS_RIGHT) != 0 {
                return Err(de::Error::custom(format!(
                    "invalid children flags {:#04b}",
                    children
                )));
            }

            if forest.0.len() < children.count_ones() as usize {
                return Err(de::Error::custom("child entry missing in serialized tree"));
            }

            let mut node = Box::new(TreeNode::new(element));
            // The right subtree was completed last, so it is on top
            if children & HAS_RIGHT != 0 {
                node.right = forest.0.pop();
            }
            if children & HAS_LEFT != 0 {
                node.left = forest.0.pop();
            }
            forest.0.push(node);
            size += 1;
        }

        let root = forest.0.pop();
        if !forest.0.is_empty() {
            return Err(de::Error::custom(format!(
                "{} subtrees left without a parent",
                forest.0.len()
            )));
        }

        let tree = OrderedTree { root, size };
        let mut previous: Option<&T> = None;
        for element in tree.inorder_iter() {
            if previous.is_some_and(|p| p >= element) {
                return Err(de::Error::custom(
                    "serialized tree elements are not strictly ordered",
                ));
            }
            previous = Some(element);
        }
        Ok(tree)
    }
}
