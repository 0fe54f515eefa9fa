//! Error types, one per concern.
//!
//! "Not found" is never an error: lookups return `None` or `false`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`crate::tree::OrderedTree`] operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A required key or element was absent
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("the tree is empty")]
    EmptyTree,
}

/// Errors raised while reading or writing the repository file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on repository {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a word index repository (bad magic {0:?})")]
    BadMagic([u8; 4]),

    #[error("unsupported repository version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("could not decode repository: {0}")]
    Decode(String),

    #[error("could not encode repository: {0}")]
    Encode(String),
}

/// Errors raised while indexing a source
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot read source {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tree(#[from] TreeError),
}
