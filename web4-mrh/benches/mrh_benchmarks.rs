//! Benchmarks for bounded MRH traversal (see also `t3_weighted_update` in
//! `web4-trust-core`): `Context` and `Path` over a fixed-depth chain.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use web4_mrh::{InMemoryMrhStore, MrhGraphStore, Predicate};

fn chain_store(len: u32) -> MrhGraphStore<InMemoryMrhStore> {
    let store = MrhGraphStore::new(InMemoryMrhStore::new());
    for i in 0..len {
        let from = format!("lct:{i}");
        let to = format!("lct:{}", i + 1);
        store
            .add_triple(&from, Predicate::Witnessed, &to, 1.0)
            .unwrap();
    }
    store
}

fn context_benchmark(c: &mut Criterion) {
    let store = chain_store(20);

    c.bench_function("mrh_context_depth_10", |b| {
        b.iter(|| black_box(store.context("lct:0", 10).unwrap()))
    });
}

fn path_benchmark(c: &mut Criterion) {
    let store = chain_store(10);

    c.bench_function("mrh_path_depth_10", |b| {
        b.iter(|| black_box(store.path("lct:0", "lct:10", 10).unwrap()))
    });
}

criterion_group!(benches, context_benchmark, path_benchmark);
criterion_main!(benches);
