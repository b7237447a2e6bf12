use bitcache::{Filter, Identifier, MergeOp};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn identifiers(n: usize) -> Vec<Identifier> {
    (0..n)
        .map(|i| Identifier::digest(&(i as u64).to_le_bytes()))
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let ids = identifiers(1024);
    c.bench_function("filter_insert_1024", |b| {
        b.iter(|| {
            let mut filter = Filter::new();
            for id in &ids {
                filter.insert(id).unwrap();
            }
            black_box(filter)
        })
    });
}

fn bench_contains(c: &mut Criterion) {
    let ids = identifiers(1024);
    let filter = Filter::from_elements(&ids, None).unwrap();
    let probes = identifiers(2048);
    c.bench_function("filter_contains_2048", |b| {
        b.iter(|| probes.iter().filter(|id| filter.contains(*id)).count())
    });
}

fn bench_merge(c: &mut Criterion) {
    let ids = identifiers(2048);
    let (left, right) = ids.split_at(1024);
    let a = Filter::from_elements(left, Some(4096)).unwrap();
    let b = Filter::from_elements(right, Some(4096)).unwrap();
    c.bench_function("filter_merge_or_4k", |bench| {
        bench.iter(|| black_box(a.merge(&b, MergeOp::Or).unwrap()))
    });
}

criterion_group!(benches, bench_insert, bench_contains, bench_merge);
criterion_main!(benches);
