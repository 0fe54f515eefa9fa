//! A persistent index of word occurrences across text files.
//!
//! Words are kept in an unbalanced binary search tree ([`tree::OrderedTree`])
//! of [`record::OccurrenceRecord`]s. The [`index::WordIndex`] folds the words
//! of a source into the tree, and the [`store::IndexStore`] saves and reloads
//! the whole tree so that several runs over different files accumulate.

pub mod base;
pub mod error;
pub mod format;
pub mod index;
pub mod record;
pub mod store;
pub mod tokenize;
pub mod tree;
