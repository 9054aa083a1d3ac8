use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use urania::aspects::{AspectCalculator, AspectTable};
use urania::ephemeris::types::Body;

fn bench_calculate_aspect(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let table = AspectTable::default();

    c.bench_function("calculate_aspect", |b| {
        b.iter(|| calculator.calculate_aspect(black_box(100.0), black_box(102.0), black_box(&table)))
    });
}

fn bench_compute_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let points: Vec<(Body, f64)> = Body::ALL
        .iter()
        .enumerate()
        .map(|(i, &body)| (body, (i as f64) * 29.7))
        .collect();

    let mut orbs = HashMap::new();
    orbs.insert("trine".to_string(), 7.0);
    let table = AspectTable::default().with_orbs(&orbs).unwrap();

    c.bench_function("compute_aspects", |b| {
        b.iter(|| calculator.compute_aspects(black_box(&points), black_box(&table)))
    });
}

criterion_group!(benches, bench_calculate_aspect, bench_compute_aspects);
criterion_main!(benches);
