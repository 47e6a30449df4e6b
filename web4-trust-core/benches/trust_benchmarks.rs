//! Benchmarks for the two hot paths §5 calls out as parallelizable reads:
//! the weighted tensor update and (in `web4-mrh`) bounded MRH traversal.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use web4_trust_core::params::TrustParams;
use web4_trust_core::tensor::{T3Record, T3Tensor};

fn weighted_update_benchmark(c: &mut Criterion) {
    let params = TrustParams::default();

    c.bench_function("t3_weighted_update", |b| {
        b.iter(|| {
            let mut record = T3Record::new("lct:bench", T3Tensor::neutral(), chrono::Utc::now());
            for i in 0..10 {
                record
                    .update_dimension(
                        "training",
                        black_box(0.9),
                        format!("evidence-{i}"),
                        &params,
                        chrono::Utc::now(),
                    )
                    .unwrap();
            }
            black_box(record.tensor.training)
        })
    });
}

fn composite_benchmark(c: &mut Criterion) {
    let params = TrustParams::default();
    let record = T3Record::new("lct:bench", T3Tensor::new(0.7, 0.8, 0.6), chrono::Utc::now());

    c.bench_function("t3_composite", |b| {
        b.iter(|| black_box(record.composite_with_own_modifier(&params)))
    });
}

criterion_group!(benches, weighted_update_benchmark, composite_benchmark);
criterion_main!(benches);
