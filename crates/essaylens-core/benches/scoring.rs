use criterion::{black_box, criterion_group, criterion_main, Criterion};

use essaylens_core::features;
use essaylens_core::feedback;
use essaylens_core::rng::SplitMix64;
use essaylens_core::scorer;

fn sample_essay(words: usize) -> String {
    let vocabulary = [
        "argument", "evidence", "therefore", "analysis", "context", "however",
        "structure", "clarity", "position", "support",
    ];
    let mut text = String::new();
    for i in 0..words {
        text.push_str(vocabulary[i % vocabulary.len()]);
        if i % 18 == 17 {
            text.push_str(". ");
        } else {
            text.push(' ');
        }
    }
    text
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for words in [100usize, 500, 2000] {
        let text = sample_essay(words);
        group.bench_function(format!("{words}_words"), |b| {
            b.iter(|| features::extract(black_box(&text)))
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for words in [100usize, 500, 2000] {
        let text = sample_essay(words);
        group.bench_function(format!("{words}_words"), |b| {
            b.iter(|| {
                let mut rng = SplitMix64::seeded(1);
                let extracted = features::extract(black_box(&text));
                let (_, breakdown) = scorer::score(&extracted, &mut rng);
                feedback::synthesize(black_box(&text), &extracted, &breakdown)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_full_pipeline);
criterion_main!(benches);
