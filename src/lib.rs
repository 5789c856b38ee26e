//! Perfect binary Merkle tree with streaming authentication paths
//!
//! This crate builds a Merkle tree over `2^H` opaque leaves, computes its root and
//! produces the authentication path of every leaf in a single pass over the tree,
//! in O(N * H) total work instead of walking the tree once per leaf.
//!
//! The crate provides:
//! - SHA-256 digests, with parent nodes hashing the hex text of their children
//! - Root computation, with or without keeping the levels around
//! - Streaming and parallel authentication path generation
//! - Verification that hands the leaf back whatever the outcome
//! - A compact byte encoding of authentication paths

mod error;
mod node;
mod proof;
mod tree;

pub use error::{ErrorKind, TreeError};
pub use node::{leaf_digest, node_digest, Digest, Orientation, Sibling, DIGEST_SIZE};
pub use proof::{verify, verify_with_height, AuthenticationPath, Verification};
pub use tree::{
    build_authentication_paths, build_root, root_from_leaf_digests, validate_leaf_count,
    AuthPaths, MerkleTree,
};

#[cfg(test)]
mod tests;
