//! Basic example of building a tree and checking leaves against its root
//!
//! This example demonstrates:
//! - Building a tree over four leaves
//! - Getting the root hash
//! - Streaming the authentication path of every leaf
//! - Encoding a path and verifying a leaf with it

use merkle_traversal::{verify, AuthenticationPath, MerkleTree, TreeError};

fn main() -> Result<(), TreeError> {
    let leaves = ["alice", "bob", "carol", "dave"];

    // Build the tree, this hashes every leaf and every level
    let tree = MerkleTree::new(leaves)?;
    let root = tree.root();
    println!("Root hash: {}", root);
    println!("Height: {}", tree.height());

    // Paths come out in leaf order, one per leaf
    for (leaf, path) in leaves.iter().zip(tree.auth_paths()) {
        let path = path?;
        let siblings: Vec<String> = path.iter().map(|sibling| sibling.to_string()).collect();
        println!("{}: {}", leaf, siblings.join(" "));
    }

    // Ship the proof of "carol" somewhere else and check it there
    let encoded = tree.authentication_path(2)?.encode()?;
    println!("Encoded proof: {} bytes", encoded.len());
    let path = AuthenticationPath::decode(&encoded)?;
    println!("carol verifies: {}", verify("carol", &root, &path).is_valid());
    println!("mallory verifies: {}", verify("mallory", &root, &path).is_valid());
    Ok(())
}
