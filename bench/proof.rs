use criterion::{black_box, criterion_group, criterion_main, Criterion};
use merkle_traversal::{build_root, verify, AuthenticationPath, MerkleTree};

pub fn generate_random_leaves(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| (0..32).map(|_| rand::random::<u8>()).collect())
        .collect()
}

fn bench_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("Root Computation");
    let leaves = generate_random_leaves(1 << 10);

    // Benchmark the fold that drops intermediate levels
    group.bench_function("Standalone", |b| {
        b.iter(|| black_box(build_root(&leaves)).unwrap())
    });

    // Benchmark building every level
    group.bench_function("Full Tree", |b| {
        b.iter(|| black_box(MerkleTree::new(&leaves)).unwrap().root())
    });

    group.finish();
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Proof Verification");
    let leaves = generate_random_leaves(1 << 10);
    let tree = MerkleTree::new(&leaves).unwrap();
    let root = tree.root();
    let paths = tree.authentication_paths().unwrap();

    group.bench_function("Verify", |b| {
        b.iter(|| {
            for (leaf, path) in leaves.iter().zip(&paths) {
                black_box(verify(leaf, &root, path));
            }
        })
    });

    let encoded: Vec<Vec<u8>> = paths.iter().map(|path| path.encode().unwrap()).collect();
    group.bench_function("Decode", |b| {
        b.iter(|| {
            for bytes in &encoded {
                black_box(AuthenticationPath::decode(bytes)).unwrap();
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_root, bench_verification);
criterion_main!(benches);
