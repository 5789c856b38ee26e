use proptest::collection::vec;
use proptest::prelude::*;

use crate::{build_authentication_paths, build_root, verify, MerkleTree, TreeError};

/// Leaves of a tree of height 0 to 6. The index suffix keeps them distinct.
fn leaves() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (0u32..=6).prop_flat_map(|height| {
        vec(vec(any::<u8>(), 0..16), 1usize << height).prop_map(|leaves| {
            leaves
                .into_iter()
                .enumerate()
                .map(|(i, mut leaf)| {
                    leaf.extend_from_slice(&(i as u32).to_be_bytes());
                    leaf
                })
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn test_root_is_deterministic(leaves in leaves()) {
        prop_assert_eq!(build_root(&leaves).unwrap(), build_root(&leaves).unwrap());
        prop_assert_eq!(build_root(&leaves).unwrap(), MerkleTree::new(&leaves).unwrap().root());
    }

    #[test]
    fn test_every_path_verifies(leaves in leaves()) {
        let root = build_root(&leaves).unwrap();
        let paths = build_authentication_paths(&leaves).unwrap();
        prop_assert_eq!(paths.len(), leaves.len());
        for (leaf, path) in leaves.iter().zip(&paths) {
            prop_assert_eq!(verify(leaf.as_slice(), &root, path).into_result(), Ok(leaf.as_slice()));
        }
    }

    #[test]
    fn test_mutated_leaf_fails(leaves in leaves(), pick in any::<prop::sample::Index>(), delta in 1u8..=255) {
        let root = build_root(&leaves).unwrap();
        let paths = build_authentication_paths(&leaves).unwrap();
        let i = pick.index(leaves.len());
        let mut mutated = leaves[i].clone();
        let byte = mutated.len() - 1;
        mutated[byte] = mutated[byte].wrapping_add(delta);
        let outcome = verify(mutated.clone(), &root, &paths[i]);
        prop_assert!(!outcome.is_valid());
        prop_assert_eq!(outcome.into_inner(), mutated);
    }

    #[test]
    fn test_flipped_orientation_fails(leaves in leaves(), pick in any::<prop::sample::Index>(), entry in any::<prop::sample::Index>()) {
        prop_assume!(leaves.len() > 1);
        let root = build_root(&leaves).unwrap();
        let paths = build_authentication_paths(&leaves).unwrap();
        let i = pick.index(leaves.len());
        let flipped = paths[i].with_flipped(entry.index(paths[i].len())).unwrap();
        prop_assert!(!verify(&leaves[i], &root, &flipped).is_valid());
    }

    #[test]
    fn test_bad_counts_are_rejected(count in 0usize..200) {
        prop_assume!(!count.is_power_of_two());
        let leaves = vec![b"leaf".to_vec(); count];
        prop_assert_eq!(build_root(&leaves), Err(TreeError::NotPowerOfTwo { count }));
        prop_assert_eq!(build_authentication_paths(&leaves), Err(TreeError::NotPowerOfTwo { count }));
    }
}
