//! Fully materialised perfect binary Merkle tree

use tracing::debug;

use super::{fold_level, validate_leaf_count, AuthPaths};
use crate::node::{leaf_digest, Digest, Sibling};
use crate::{AuthenticationPath, TreeError};

/// Perfect binary Merkle tree over `2^height` leaves.
/// * `levels[0]` - one digest per leaf, in input order.
/// * `levels[h]` - `2^(height - h)` digests.
/// * `levels[height]` - the root, alone.
///
/// The tree is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Hashes every leaf and builds all the levels up to the root.
    pub fn new<I, T>(leaves: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        Self::from_leaf_digests(
            leaves
                .into_iter()
                .map(|leaf| leaf_digest(leaf.as_ref()))
                .collect(),
        )
    }

    /// Builds the tree from leaves that are already hashed.
    pub fn from_leaf_digests(leaf_digests: Vec<Digest>) -> Result<Self, TreeError> {
        let height = validate_leaf_count(leaf_digests.len())?;
        let mut levels = Vec::with_capacity(height + 1);
        levels.push(leaf_digests);
        for h in 0..height {
            let next = fold_level(&levels[h]);
            levels.push(next);
        }
        debug!(
            "Built merkle tree with {} leaves, height {}",
            levels[0].len(),
            height
        );
        Ok(Self { levels })
    }

    /// Root digest of the tree.
    pub fn root(&self) -> Digest {
        // levels is never empty and the last level holds exactly one digest
        self.levels[self.height()][0]
    }

    /// Number of levels above the leaves.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of leaves, a power of two.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Digests at `height`, leaves being height 0.
    pub fn level(&self, height: usize) -> Option<&[Digest]> {
        self.levels.get(height).map(Vec::as_slice)
    }

    /// Every level, leaves first.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Digest of the leaf at `index`.
    pub fn leaf(&self, index: usize) -> Option<&Digest> {
        self.levels[0].get(index)
    }

    /// Authentication path of a single leaf, read straight off the levels.
    pub fn authentication_path(&self, index: usize) -> Result<AuthenticationPath, TreeError> {
        self.check_index(index)?;
        let siblings = (0..self.height())
            .map(|h| {
                let node = index >> h;
                Sibling::of(&self.levels[h], node)
                    .ok_or(TreeError::InvalidState { height: h, leaf: index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AuthenticationPath::new(siblings))
    }

    /// Streams the authentication path of every leaf, starting at leaf 0.
    pub fn auth_paths(&self) -> AuthPaths<'_> {
        AuthPaths::new(self)
    }

    /// Authentication paths of every leaf, index aligned with the leaves.
    pub fn authentication_paths(&self) -> Result<Vec<AuthenticationPath>, TreeError> {
        let paths = self.auth_paths().collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Generated {} authentication paths of length {}",
            paths.len(),
            self.height()
        );
        Ok(paths)
    }

    /// Generates every authentication path on the rayon thread pool.
    ///
    /// The leaves are split into at most `chunks` contiguous ranges and each
    /// range is streamed from its own checkpoint, so the output is the same
    /// as [`MerkleTree::authentication_paths`].
    #[cfg(feature = "multi-thread")]
    pub fn par_authentication_paths(
        &self,
        chunks: std::num::NonZeroUsize,
    ) -> Result<Vec<AuthenticationPath>, TreeError> {
        use rayon::prelude::*;

        let leaves = self.leaf_count();
        let chunk = leaves.div_ceil(chunks.get());
        let starts: Vec<usize> = (0..leaves).step_by(chunk).collect();
        let ranges = starts
            .par_iter()
            .map(|&start| {
                AuthPaths::starting_at(self, start)?
                    .take(chunk)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Generated {} authentication paths in {} ranges",
            leaves,
            ranges.len()
        );
        Ok(ranges.into_iter().flatten().collect())
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), TreeError> {
        if index >= self.leaf_count() {
            return Err(TreeError::LeafIndexOutOfRange {
                index,
                leaves: self.leaf_count(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::MerkleTree;
    use crate::node::{leaf_digest, node_digest, Orientation, Sibling};
    use crate::{build_root, TreeError};
    use hex_literal::hex;

    #[test]
    fn test_tree_levels() {
        let tree = MerkleTree::new(["a", "b", "c", "d"]).unwrap();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.level(0).unwrap().len(), 4);
        assert_eq!(tree.level(1).unwrap().len(), 2);
        assert_eq!(tree.level(2).unwrap().len(), 1);
        assert!(tree.level(3).is_none());
        assert_eq!(tree.leaf(2), Some(&leaf_digest(b"c")));
        assert_eq!(
            tree.level(1).unwrap()[0],
            node_digest(&leaf_digest(b"a"), &leaf_digest(b"b"))
        );
    }

    #[test]
    fn test_tree_root() {
        let tree = MerkleTree::new(["a", "b", "c", "d"]).unwrap();
        assert_eq!(
            tree.root().as_bytes(),
            &hex!("58c89d709329eb37285837b042ab6ff72c7c8f74de0446b091b6a0131c102cfd")
        );
        assert_eq!(tree.root(), build_root(["a", "b", "c", "d"]).unwrap());
    }

    #[test]
    fn test_tree_single_leaf() {
        let tree = MerkleTree::new(["x"]).unwrap();
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.root(), leaf_digest(b"x"));
        assert!(tree.authentication_path(0).unwrap().is_empty());
    }

    #[test]
    fn test_tree_rejects_non_power_of_two() {
        for count in [0usize, 3, 5, 6, 9] {
            let leaves: Vec<Vec<u8>> = (0..count).map(|i| vec![i as u8]).collect();
            assert_eq!(
                MerkleTree::new(leaves).unwrap_err(),
                TreeError::NotPowerOfTwo { count }
            );
        }
    }

    #[test]
    fn test_authentication_path_direct() {
        let tree = MerkleTree::new(["a", "b", "c", "d"]).unwrap();
        let path = tree.authentication_path(1).unwrap();
        let ab = tree.level(1).unwrap();
        assert_eq!(
            path.siblings(),
            &[
                Sibling::new(Orientation::Left, leaf_digest(b"a")),
                Sibling::new(Orientation::Right, ab[1]),
            ]
        );
        assert_eq!(
            tree.authentication_path(4).unwrap_err(),
            TreeError::LeafIndexOutOfRange {
                index: 4,
                leaves: 4
            }
        );
    }

    #[cfg(feature = "multi-thread")]
    #[test]
    fn test_par_authentication_paths() {
        use std::num::NonZeroUsize;

        let leaves: Vec<Vec<u8>> = (0..64u8).map(|i| vec![i; 3]).collect();
        let tree = MerkleTree::new(&leaves).unwrap();
        let sequential = tree.authentication_paths().unwrap();
        for chunks in [1, 2, 3, 4, 64, 100, 5000] {
            assert_eq!(
                tree.par_authentication_paths(NonZeroUsize::new(chunks).unwrap())
                    .unwrap(),
                sequential
            );
        }
    }
}
