use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use oset_trees::radix::RadixTree;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

fn random_words(n: usize, len: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("radix_insert");
    for size in [1_000usize, 10_000] {
        let words = random_words(size, 8, 17);
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                let mut tree = RadixTree::new();
                for w in words {
                    black_box(tree.insert(w));
                }
                tree
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("radix_search");
    for size in [1_000usize, 10_000] {
        let words = random_words(size, 8, 23);
        let tree: RadixTree = words.iter().cloned().collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                for w in words {
                    black_box(tree.contains(w));
                }
            });
        });
    }
    group.finish();
}

fn bench_get_possible_suffix(c: &mut Criterion) {
    let mut group = c.benchmark_group("radix_get_possible_suffix");
    for size in [1_000usize, 10_000] {
        let words = random_words(size, 8, 29);
        let tree: RadixTree = words.iter().cloned().collect();
        let prefixes: Vec<String> = words.iter().map(|w| w[..3].to_string()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &prefixes, |b, prefixes| {
            b.iter(|| {
                for p in prefixes {
                    black_box(tree.get_possible_suffix(p));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_search, bench_get_possible_suffix);
criterion_main!(benches);
