use std::fmt::Display;
use std::str::FromStr;

use super::{node_digest, Digest};
use crate::TreeError;

/// Which operand a sibling digest is when it gets hashed against the
/// running value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// The sibling is the left operand.
    Left,
    /// The sibling is the right operand.
    Right,
}

impl Orientation {
    /// Orientation of the node sitting at `index` within its level.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// The other side.
    pub fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Orientation {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(TreeError::MalformedPath(format!(
                "unknown orientation tag {:?}",
                other
            ))),
        }
    }
}

/// One element of an authentication path: a sibling digest and the side
/// it is hashed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "(Orientation, Digest)", into = "(Orientation, Digest)")
)]
pub struct Sibling {
    orientation: Orientation,
    digest: Digest,
}

impl Sibling {
    /// Creates a sibling hashed on the `orientation` side.
    pub fn new(orientation: Orientation, digest: Digest) -> Self {
        Self {
            orientation,
            digest,
        }
    }

    /// Sibling of the node at `index` in `level`, if the level has one.
    pub(crate) fn of(level: &[Digest], index: usize) -> Option<Self> {
        let sibling = index ^ 1;
        level
            .get(sibling)
            .map(|digest| Self::new(Orientation::for_index(sibling), *digest))
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Hashes `acc` together with this sibling, on the side given by the
    /// orientation.
    pub fn fold(&self, acc: &Digest) -> Digest {
        match self.orientation {
            Orientation::Left => node_digest(&self.digest, acc),
            Orientation::Right => node_digest(acc, &self.digest),
        }
    }

    /// Same digest, opposite side.
    pub fn flipped(&self) -> Self {
        Self::new(self.orientation.flip(), self.digest)
    }
}

impl From<(Orientation, Digest)> for Sibling {
    fn from((orientation, digest): (Orientation, Digest)) -> Self {
        Self::new(orientation, digest)
    }
}

impl From<Sibling> for (Orientation, Digest) {
    fn from(sibling: Sibling) -> Self {
        (sibling.orientation, sibling.digest)
    }
}

impl Display for Sibling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.orientation, self.digest)
    }
}

#[cfg(test)]
mod test {
    use super::{Orientation, Sibling};
    use crate::node::{leaf_digest, node_digest};

    #[test]
    fn test_orientation_for_index() {
        assert_eq!(Orientation::for_index(0), Orientation::Left);
        assert_eq!(Orientation::for_index(1), Orientation::Right);
        assert_eq!(Orientation::for_index(6), Orientation::Left);
    }

    #[test]
    fn test_orientation_text() {
        assert_eq!(Orientation::Left.to_string(), "left");
        assert_eq!("right".parse::<Orientation>().unwrap(), Orientation::Right);
        assert!("up".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_sibling_fold_respects_side() {
        let a = leaf_digest(b"a");
        let b = leaf_digest(b"b");
        assert_eq!(
            Sibling::new(Orientation::Left, a).fold(&b),
            node_digest(&a, &b)
        );
        assert_eq!(
            Sibling::new(Orientation::Right, b).fold(&a),
            node_digest(&a, &b)
        );
        assert_ne!(
            Sibling::new(Orientation::Right, b).flipped().fold(&a),
            node_digest(&a, &b)
        );
    }

    #[test]
    fn test_sibling_of() {
        let level = [leaf_digest(b"a"), leaf_digest(b"b"), leaf_digest(b"c")];
        assert_eq!(
            Sibling::of(&level, 0),
            Some(Sibling::new(Orientation::Right, level[1]))
        );
        assert_eq!(
            Sibling::of(&level, 1),
            Some(Sibling::new(Orientation::Left, level[0]))
        );
        assert_eq!(Sibling::of(&level, 2), None);
    }
}
