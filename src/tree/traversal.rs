//! Streaming generation of authentication paths.
//!
//! Leaf `L + 1` shares every authentication node with leaf `L` except at the
//! heights where incrementing `L` carries, i.e. heights `h` with
//! `(L + 1) % 2^h == 0`. For each height the traversal keeps the node that
//! is valid now (`auth`) and the node that becomes valid at the next carry
//! (`stack`). A carry commits the staged node and stages the following one,
//! so each height is touched `2^(H - h)` times over the whole run. No node is
//! rehashed and all N paths cost O(N * H) work in total.

use std::iter::FusedIterator;

use tracing::trace;

use super::MerkleTree;
use crate::node::{Orientation, Sibling};
use crate::{AuthenticationPath, TreeError};

/// Per run bookkeeping, one slot per height below the root.
#[derive(Debug, Clone)]
struct TraversalState {
    /// Authentication node of the current leaf.
    auth: Vec<Sibling>,
    /// Authentication node for the next carry. `None` once the level has
    /// no node left to hand out.
    stack: Vec<Option<Sibling>>,
}

impl TraversalState {
    /// State valid for `leaf`.
    ///
    /// For leaf 0 this is every node's right neighbour in `auth` and the
    /// leftmost node of every level in `stack`, which the first carry at
    /// each height commits.
    fn at(tree: &MerkleTree, leaf: usize) -> Result<Self, TreeError> {
        let height = tree.height();
        let mut auth = Vec::with_capacity(height);
        let mut stack = Vec::with_capacity(height);
        for (h, level) in tree.levels()[..height].iter().enumerate() {
            let node = leaf >> h;
            auth.push(
                Sibling::of(level, node).ok_or(TreeError::InvalidState { height: h, leaf })?,
            );
            stack.push(Sibling::of(level, node + 1));
        }
        Ok(Self { auth, stack })
    }

    /// Moves the state from leaf `next - 1` to leaf `next`.
    fn advance(&mut self, tree: &MerkleTree, next: usize) -> Result<(), TreeError> {
        let mut h = 0;
        while h < self.auth.len() && next % (1 << h) == 0 {
            let staged = self.stack[h].ok_or(TreeError::InvalidState {
                height: h,
                leaf: next,
            })?;
            self.auth[h] = staged;

            // The node after the committed one sits two slots further right
            // when the committed sibling was on the left, and is the
            // committed node's own neighbour otherwise.
            let start = match staged.orientation() {
                Orientation::Left => next + 2 * (1 << h),
                Orientation::Right => next,
            };
            let index = start >> h;
            self.stack[h] = tree.levels()[h]
                .get(index)
                .map(|digest| Sibling::new(Orientation::for_index(index), *digest));
            trace!(
                "Leaf {}: committed {} at height {}, staged index {}",
                next,
                staged,
                h,
                index
            );
            h += 1;
        }
        Ok(())
    }

    fn path(&self) -> AuthenticationPath {
        AuthenticationPath::new(self.auth.clone())
    }
}

/// Iterator over the authentication paths of a [`MerkleTree`], in leaf
/// order.
///
/// Yields an error at most once, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct AuthPaths<'a> {
    tree: &'a MerkleTree,
    state: Option<TraversalState>,
    /// Leaf the state was built for. Its path is yielded without advancing.
    start: usize,
    next: usize,
    init: Option<TreeError>,
}

impl<'a> AuthPaths<'a> {
    /// Streams every path of `tree`, starting at leaf 0.
    pub fn new(tree: &'a MerkleTree) -> Self {
        match TraversalState::at(tree, 0) {
            Ok(state) => Self {
                tree,
                state: Some(state),
                start: 0,
                next: 0,
                init: None,
            },
            Err(e) => Self {
                tree,
                state: None,
                start: 0,
                next: 0,
                init: Some(e),
            },
        }
    }

    /// Streams the paths of leaves `leaf..N`, replaying the state at `leaf`
    /// directly instead of walking from leaf 0.
    pub fn starting_at(tree: &'a MerkleTree, leaf: usize) -> Result<Self, TreeError> {
        tree.check_index(leaf)?;
        Ok(Self {
            tree,
            state: Some(TraversalState::at(tree, leaf)?),
            start: leaf,
            next: leaf,
            init: None,
        })
    }

    /// Index of the leaf whose path is yielded next.
    pub fn next_leaf(&self) -> usize {
        self.next
    }
}

impl Iterator for AuthPaths<'_> {
    type Item = Result<AuthenticationPath, TreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.init.take() {
            return Some(Err(e));
        }
        let state = self.state.as_mut()?;
        if self.next >= self.tree.leaf_count() {
            self.state = None;
            return None;
        }
        if self.next > self.start {
            if let Err(e) = state.advance(self.tree, self.next) {
                self.state = None;
                return Some(Err(e));
            }
        }
        let path = state.path();
        self.next += 1;
        Some(Ok(path))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match (&self.state, &self.init) {
            (_, Some(_)) => 1,
            (Some(_), None) => self.tree.leaf_count() - self.next,
            (None, None) => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AuthPaths<'_> {}

impl FusedIterator for AuthPaths<'_> {}
