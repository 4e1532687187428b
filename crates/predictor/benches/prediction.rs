//! Benchmarks for the prediction engine
//!
//! Run with: cargo bench --package predictor
//!
//! Uses a synthetic store so the benchmark needs no dataset on disk: 500
//! users rating from a pool of 200 movies in a deterministic pattern.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Rating, RatingStore};
use predictor::{similarity, Predictor};
use std::sync::Arc;

fn build_synthetic_store() -> Arc<RatingStore> {
    let mut ratings = Vec::new();
    for user_id in 1..=500u32 {
        for k in 0..40u32 {
            let movie_id = (user_id * 7 + k * 13) % 200 + 1;
            let score = ((user_id + movie_id) % 5 + 1) as f64;
            ratings.push(Rating {
                movie_id,
                user_id,
                score,
            });
        }
    }
    Arc::new(RatingStore::from_ratings(ratings))
}

fn bench_warm_prediction(c: &mut Criterion) {
    let store = build_synthetic_store();
    let predictor = Predictor::new(store);

    c.bench_function("predict_warm_path", |b| {
        b.iter(|| {
            let estimate = predictor.predict(black_box(1), black_box(8));
            black_box(estimate)
        })
    });
}

fn bench_cold_prediction(c: &mut Criterion) {
    let store = build_synthetic_store();
    let predictor = Predictor::new(store);

    c.bench_function("predict_cold_start", |b| {
        b.iter(|| {
            let estimate = predictor.predict(black_box(9999), black_box(8));
            black_box(estimate)
        })
    });
}

fn bench_similarity(c: &mut Criterion) {
    let store = build_synthetic_store();

    c.bench_function("similarity_pair", |b| {
        b.iter(|| {
            let w = similarity(&store, black_box(1), black_box(2));
            black_box(w)
        })
    });
}

criterion_group!(
    benches,
    bench_warm_prediction,
    bench_cold_prediction,
    bench_similarity
);
criterion_main!(benches);
