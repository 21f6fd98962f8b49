//! # PX-03 Index Rebuilder Benchmarks
//!
//! Full rebuild of N version-1 records with the default batch size.

use crate::fixtures::{item_at_index, Record};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput};
use px_01_kv_store::{Database, InMemoryKVStore, Transaction};
use px_02_secondary_index::IndexRegistry;
use px_03_index_rebuilder::{Rebuilder, RebuilderConfig};
use std::sync::Arc;

fn stale_db(records: u32) -> Arc<Database<InMemoryKVStore>> {
    let db = Arc::new(Database::new(InMemoryKVStore::new()));
    let v1 = Rebuilder::new(Arc::clone(&db), RebuilderConfig::new(1));
    let Ok(builder) = IndexRegistry::new().with_index(v1.index().clone()) else {
        return db;
    };
    let _ = db.update_with(
        |txn| {
            for i in 0..records {
                let record = Record::numbered(i);
                let json = serde_json::to_vec(&record).unwrap_or_default();
                txn.set(record.id.as_bytes(), &json)?;
            }
            Ok(())
        },
        &builder,
    );
    db
}

pub fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("px-03-rebuild");
    group.sample_size(10);

    for records in [1_000u32, 5_000] {
        group.throughput(Throughput::Elements(u64::from(records)));
        group.bench_with_input(BenchmarkId::new("rebuild", records), &records, |b, &records| {
            b.iter_batched(
                || stale_db(records),
                |db| {
                    let v2 = Rebuilder::new(db, RebuilderConfig::new(2));
                    if let Ok(builder) = IndexRegistry::new()
                        .with_index(v2.index().clone())
                        .and_then(|r| r.with_index(item_at_index()))
                    {
                        let _ = v2.rebuild(&builder);
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_rebuild(c);
}
