mod digest;
mod sibling;

use sha2::{Digest as _, Sha256};

pub use digest::{Digest, DIGEST_SIZE};
pub use sibling::{Orientation, Sibling};

/// Hashes the raw data of a leaf.
pub fn leaf_digest(data: &[u8]) -> Digest {
    Digest::new(Sha256::digest(data).into())
}

/// Hashes two child digests into their parent.
///
/// The input is the concatenation of the two lowercase hex strings, not of
/// the raw bytes. Changing this changes every root.
pub fn node_digest(left: &Digest, right: &Digest) -> Digest {
    let hash = Sha256::new()
        .chain_update(left.to_hex())
        .chain_update(right.to_hex())
        .finalize();
    Digest::new(hash.into())
}
