use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle_traversal::MerkleTree;

pub fn generate_random_leaves(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| (0..32).map(|_| rand::random::<u8>()).collect())
        .collect()
}

fn bench_path_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Authentication Paths");

    for height in [6, 10, 12] {
        let tree = MerkleTree::new(generate_random_leaves(1 << height)).unwrap();

        // Benchmark the streaming traversal
        group.bench_with_input(BenchmarkId::new("Streaming", height), &tree, |b, tree| {
            b.iter(|| black_box(tree.authentication_paths()).unwrap())
        });

        // Benchmark extracting every path on its own
        group.bench_with_input(BenchmarkId::new("Per Leaf", height), &tree, |b, tree| {
            b.iter(|| {
                for i in 0..tree.leaf_count() {
                    black_box(tree.authentication_path(i)).unwrap();
                }
            })
        });

        #[cfg(feature = "multi-thread")]
        group.bench_with_input(BenchmarkId::new("Parallel", height), &tree, |b, tree| {
            let chunks = std::num::NonZeroUsize::new(rayon::current_num_threads())
                .unwrap_or(std::num::NonZeroUsize::MIN);
            b.iter(|| black_box(tree.par_authentication_paths(chunks)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_path_generation);
criterion_main!(benches);
