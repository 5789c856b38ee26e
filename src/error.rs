//! Error types for tree construction, traversal and proof handling

use thiserror::Error;

/// Broad classification of a [`TreeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller handed in something the tree cannot accept.
    InvalidInput,
    /// Internal traversal bookkeeping went out of sync with the tree.
    InvalidState,
}

/// Error type for tree operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The leaf count is zero or not a power of two
    #[error("leaf count must be a power of two, got {count}")]
    NotPowerOfTwo { count: usize },
    /// A leaf index past the end of the tree was requested
    #[error("leaf index {index} out of range for a tree of {leaves} leaves")]
    LeafIndexOutOfRange { index: usize, leaves: usize },
    /// The authentication path does not match the height of the tree
    #[error("authentication path has {actual} entries, expected {expected}")]
    PathLengthMismatch { expected: usize, actual: usize },
    /// A digest could not be parsed from its hex form
    #[error("malformed digest: {0}")]
    MalformedDigest(String),
    /// An encoded authentication path could not be decoded
    #[error("malformed authentication path: {0}")]
    MalformedPath(String),
    /// The traversal found no node where leaf `leaf` needs one at `height`.
    /// Only a corrupted traversal state can produce it.
    #[error("no authentication node at height {height} for leaf {leaf}")]
    InvalidState { height: usize, leaf: usize },
}

impl TreeError {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::NotPowerOfTwo { .. }
            | TreeError::LeafIndexOutOfRange { .. }
            | TreeError::PathLengthMismatch { .. }
            | TreeError::MalformedDigest(_)
            | TreeError::MalformedPath(_) => ErrorKind::InvalidInput,
            TreeError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }
}
