use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matcher::{Catalog, Item, VibeMatcher};
use semantic::{HashingEmbedder, SemanticConfig};

const QUERIES: [&str; 4] = [
    "energetic urban chic",
    "cozy rainy day book",
    "futuristic cyberpunk",
    "rainy day in a tokyo cafe",
];

/// Catalog of `size` synthetic items built from a fixed tag vocabulary.
fn synthetic_catalog(size: usize) -> Catalog {
    const WORDS: [&str; 12] = [
        "cozy", "urban", "beach", "vintage", "minimalist", "cyberpunk", "relaxed", "elegant",
        "festival", "academic", "athletic", "summer",
    ];
    let items = (0..size)
        .map(|i| Item {
            name: format!("item-{i}"),
            description: format!("synthetic item {i}"),
            vibes: vec![WORDS[i % WORDS.len()].to_string()],
            ai_tags: format!(
                "{} {} {} style number {i}",
                WORDS[i % WORDS.len()],
                WORDS[(i / 3) % WORDS.len()],
                WORDS[(i * 7 + 1) % WORDS.len()]
            ),
        })
        .collect();
    Catalog::from_items(items).expect("synthetic catalog")
}

fn build_matcher(size: usize) -> VibeMatcher {
    let embedder = HashingEmbedder::new(&SemanticConfig::fast()).expect("hashing embedder");
    let matcher = VibeMatcher::new(synthetic_catalog(size), Arc::new(embedder));
    matcher.build_vectors().expect("build");
    matcher
}

fn bench_find_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");
    for size in [7usize, 100, 1_000] {
        let matcher = build_matcher(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &matcher, |b, m| {
            let mut i = 0usize;
            b.iter(|| {
                let query = QUERIES[i % QUERIES.len()];
                i += 1;
                black_box(m.find_matches(black_box(query), 3).expect("rank"))
            });
        });
    }
    group.finish();
}

fn bench_build_vectors(c: &mut Criterion) {
    c.bench_function("build_vectors/7", |b| {
        b.iter(|| black_box(build_matcher(7)));
    });
}

criterion_group!(benches, bench_find_matches, bench_build_vectors);
criterion_main!(benches);
