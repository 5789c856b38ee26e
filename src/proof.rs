//! Authentication paths and their verification.
//!
//! An authentication path is the list of sibling digests met while walking
//! from a leaf up to the root, lowest height first. Folding a leaf digest
//! with its path gives back the root.
//!
//! A path can be encoded into bytes: the digests followed by a bitmap of
//! their orientations.

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use tracing::debug;

use crate::node::{leaf_digest, Digest, Orientation, Sibling, DIGEST_SIZE};
use crate::TreeError;

/// Size of the entry count prefix of an encoded path.
const COUNT_SIZE: usize = 2;

/// Proof that a leaf belongs to a tree with a given root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AuthenticationPath {
    siblings: Vec<Sibling>,
}

impl AuthenticationPath {
    /// Creates a path from siblings ordered from the leaf up.
    pub fn new(siblings: Vec<Sibling>) -> Self {
        Self { siblings }
    }

    /// Siblings from the leaf up.
    pub fn siblings(&self) -> &[Sibling] {
        &self.siblings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sibling> {
        self.siblings.iter()
    }

    /// Number of siblings, i.e. the height of the tree the path was taken from.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Root obtained by folding `leaf` with every sibling of the path.
    pub fn root_from(&self, leaf: &[u8]) -> Digest {
        self.root_from_digest(leaf_digest(leaf))
    }

    /// Same as [`AuthenticationPath::root_from`] for an already hashed leaf.
    pub fn root_from_digest(&self, leaf: Digest) -> Digest {
        self.siblings
            .iter()
            .fold(leaf, |acc, sibling| sibling.fold(&acc))
    }

    /// Copy of the path with the orientation of entry `index` flipped.
    pub fn with_flipped(&self, index: usize) -> Option<Self> {
        let mut siblings = self.siblings.clone();
        let sibling = siblings.get_mut(index)?;
        *sibling = sibling.flipped();
        Some(Self::new(siblings))
    }

    /// Encodes the path into bytes.
    ///
    /// Layout: entry count as a big endian `u16`, the digests, then one bit
    /// per entry (least significant first, set for [`Orientation::Left`]).
    pub fn encode(&self) -> Result<Vec<u8>, TreeError> {
        let count = u16::try_from(self.siblings.len()).map_err(|_| {
            TreeError::MalformedPath(format!(
                "{} entries do not fit the encoding",
                self.siblings.len()
            ))
        })?;
        let mut bits = BitVec::<u8, Lsb0>::with_capacity(self.siblings.len());
        let mut encoded = Vec::with_capacity(encoded_len(self.siblings.len()));
        encoded.extend_from_slice(&count.to_be_bytes());
        for sibling in &self.siblings {
            encoded.extend_from_slice(sibling.digest().as_bytes());
            bits.push(sibling.orientation() == Orientation::Left);
        }
        encoded.extend_from_slice(bits.as_raw_slice());
        Ok(encoded)
    }

    /// Decodes a path produced by [`AuthenticationPath::encode`].
    pub fn decode(data: &[u8]) -> Result<Self, TreeError> {
        let Some(prefix) = data.get(..COUNT_SIZE) else {
            return Err(TreeError::MalformedPath(format!(
                "{} bytes is too short for the entry count",
                data.len()
            )));
        };
        let count = u16::from_be_bytes([prefix[0], prefix[1]]) as usize;
        if data.len() != encoded_len(count) {
            return Err(TreeError::MalformedPath(format!(
                "{} entries need {} bytes, got {}",
                count,
                encoded_len(count),
                data.len()
            )));
        }

        let digests_end = COUNT_SIZE + count * DIGEST_SIZE;
        let bits = BitVec::<u8, Lsb0>::from_slice(&data[digests_end..]);
        if bits[count..].any() {
            return Err(TreeError::MalformedPath(
                "orientation bitmap has trailing bits set".to_string(),
            ));
        }

        let siblings = data[COUNT_SIZE..digests_end]
            .chunks_exact(DIGEST_SIZE)
            .zip(bits.iter().by_vals())
            .map(|(chunk, left)| {
                let mut digest = [0u8; DIGEST_SIZE];
                digest.copy_from_slice(chunk);
                let orientation = if left {
                    Orientation::Left
                } else {
                    Orientation::Right
                };
                Sibling::new(orientation, Digest::new(digest))
            })
            .collect();
        Ok(Self::new(siblings))
    }
}

impl<'a> IntoIterator for &'a AuthenticationPath {
    type Item = &'a Sibling;
    type IntoIter = std::slice::Iter<'a, Sibling>;

    fn into_iter(self) -> Self::IntoIter {
        self.siblings.iter()
    }
}

impl FromIterator<Sibling> for AuthenticationPath {
    fn from_iter<I: IntoIterator<Item = Sibling>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn encoded_len(count: usize) -> usize {
    COUNT_SIZE + count * DIGEST_SIZE + count.div_ceil(8)
}

/// Outcome of a verification. Both variants hand the leaf back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification<T> {
    /// The leaf and path fold to the expected root.
    Valid(T),
    /// They fold to something else.
    Invalid(T),
}

impl<T> Verification<T> {
    /// Whether the leaf folded to the expected root.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the leaf, whatever the outcome.
    pub fn into_inner(self) -> T {
        match self {
            Self::Valid(leaf) | Self::Invalid(leaf) => leaf,
        }
    }

    /// `Ok(leaf)` when valid, `Err(leaf)` otherwise.
    pub fn into_result(self) -> Result<T, T> {
        match self {
            Self::Valid(leaf) => Ok(leaf),
            Self::Invalid(leaf) => Err(leaf),
        }
    }
}

/// Checks `leaf` against `root` using its authentication path.
///
/// A mismatch is a normal outcome, not an error: the leaf comes back in
/// [`Verification::Invalid`]. The path length is not checked here, so a
/// path of the wrong length also shows up as `Invalid`. Use
/// [`verify_with_height`] to reject it as [`TreeError::PathLengthMismatch`].
pub fn verify<T: AsRef<[u8]>>(
    leaf: T,
    root: &Digest,
    path: &AuthenticationPath,
) -> Verification<T> {
    let got = path.root_from(leaf.as_ref());
    if got == *root {
        Verification::Valid(leaf)
    } else {
        debug!("Authentication path folds to {}, expected {}", got, root);
        Verification::Invalid(leaf)
    }
}

/// Like [`verify`], but first rejects a path whose length is not the
/// height of the tree.
pub fn verify_with_height<T: AsRef<[u8]>>(
    leaf: T,
    root: &Digest,
    path: &AuthenticationPath,
    height: usize,
) -> Result<Verification<T>, TreeError> {
    if path.len() != height {
        return Err(TreeError::PathLengthMismatch {
            expected: height,
            actual: path.len(),
        });
    }
    Ok(verify(leaf, root, path))
}
