mod merkle;
mod traversal;

pub use merkle::MerkleTree;
pub use traversal::AuthPaths;

use crate::node::{leaf_digest, node_digest, Digest};
use crate::{AuthenticationPath, TreeError};

/// Checks that `count` leaves form a perfect binary tree and returns its
/// height.
///
/// This is the only place the power-of-two precondition is enforced: every
/// level of a tree that passes it has even length until the root.
pub fn validate_leaf_count(count: usize) -> Result<usize, TreeError> {
    if !count.is_power_of_two() {
        return Err(TreeError::NotPowerOfTwo { count });
    }
    Ok(count.trailing_zeros() as usize)
}

/// Hashes adjacent pairs of `level` into the next level up.
pub(crate) fn fold_level(level: &[Digest]) -> Vec<Digest> {
    debug_assert!(level.len() % 2 == 0);
    level
        .chunks_exact(2)
        .map(|pair| node_digest(&pair[0], &pair[1]))
        .collect()
}

/// Computes the root of `leaves` without keeping the intermediate levels.
pub fn build_root<I, T>(leaves: I) -> Result<Digest, TreeError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    root_from_leaf_digests(
        leaves
            .into_iter()
            .map(|leaf| leaf_digest(leaf.as_ref()))
            .collect(),
    )
}

/// Same as [`build_root`] for leaves that are already hashed.
pub fn root_from_leaf_digests(leaf_digests: Vec<Digest>) -> Result<Digest, TreeError> {
    validate_leaf_count(leaf_digests.len())?;
    let mut level = leaf_digests;
    while level.len() > 1 {
        level = fold_level(&level);
    }
    level
        .pop()
        .ok_or(TreeError::NotPowerOfTwo { count: 0 })
}

/// Builds the tree over `leaves` and returns one authentication path per
/// leaf, in leaf order.
pub fn build_authentication_paths<I, T>(leaves: I) -> Result<Vec<AuthenticationPath>, TreeError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    MerkleTree::new(leaves)?.authentication_paths()
}

#[cfg(test)]
mod test {
    use super::{build_root, fold_level, validate_leaf_count};
    use crate::node::{leaf_digest, node_digest};
    use crate::TreeError;

    #[test]
    fn test_validate_leaf_count() {
        assert_eq!(validate_leaf_count(1), Ok(0));
        assert_eq!(validate_leaf_count(2), Ok(1));
        assert_eq!(validate_leaf_count(64), Ok(6));
        for count in [0, 3, 5, 6, 7, 12, 100] {
            assert_eq!(
                validate_leaf_count(count),
                Err(TreeError::NotPowerOfTwo { count })
            );
        }
    }

    #[test]
    fn test_fold_level() {
        let level: Vec<_> = [b"a", b"b", b"c", b"d"]
            .iter()
            .map(|leaf| leaf_digest(*leaf))
            .collect();
        let folded = fold_level(&level);
        assert_eq!(
            folded,
            vec![
                node_digest(&level[0], &level[1]),
                node_digest(&level[2], &level[3])
            ]
        );
    }

    #[test]
    fn test_build_root_single_leaf() {
        assert_eq!(build_root([b"x"]).unwrap(), leaf_digest(b"x"));
    }

    #[test]
    fn test_build_root_rejects_bad_counts() {
        assert_eq!(
            build_root(Vec::<Vec<u8>>::new()),
            Err(TreeError::NotPowerOfTwo { count: 0 })
        );
        assert_eq!(
            build_root(["a", "b", "c"]),
            Err(TreeError::NotPowerOfTwo { count: 3 })
        );
    }
}
