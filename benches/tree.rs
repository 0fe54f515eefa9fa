use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use helpers::corpus::{create_document, create_vocabulary};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use word_tracker::index::WordIndex;
use word_tracker::tree::OrderedTree;

fn insertion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut group = c.benchmark_group("insert");

    for size in [1_000, 5_000] {
        let sorted: Vec<u32> = (0..size).collect();
        let mut shuffled = sorted.clone();
        shuffled.shuffle(&mut rng);

        group.bench_with_input(BenchmarkId::new("random", size), &shuffled, |b, values| {
            b.iter(|| values.iter().copied().collect::<OrderedTree<u32>>())
        });
        // Degenerates into a chain
        group.bench_with_input(BenchmarkId::new("sorted", size), &sorted, |b, values| {
            b.iter(|| values.iter().copied().collect::<OrderedTree<u32>>())
        });
    }
    group.finish();
}

fn traversal_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut values: Vec<u32> = (0..100_000).collect();
    values.shuffle(&mut rng);
    let tree: OrderedTree<u32> = values.into_iter().collect();

    c.bench_function("inorder", |b| b.iter(|| tree.inorder_iter().count()));
    c.bench_function("preorder", |b| b.iter(|| tree.preorder_iter().count()));
    c.bench_function("postorder", |b| b.iter(|| tree.postorder_iter().count()));
}

fn indexing_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let vocabulary = create_vocabulary(5_000, 10, &mut rng);
    let (text, _) = create_document(&vocabulary, 1_000, 20, &mut rng);

    c.bench_function("index", |b| {
        b.iter(|| {
            let mut index = WordIndex::new();
            index
                .index_reader("bench.txt", text.as_bytes())
                .expect("Error while indexing");
            index
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(50);
    targets = insertion_benchmark, traversal_benchmark, indexing_benchmark
}
criterion_main!(benches);
