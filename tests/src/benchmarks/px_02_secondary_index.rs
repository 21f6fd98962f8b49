//! # PX-02 Secondary Index Benchmarks
//!
//! - Emit: one comment with N tags per commit
//! - Query: prefix page and count mode over 10k indexed comments

use crate::fixtures::{comment_registry, Comment};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use px_01_kv_store::{Database, InMemoryKVStore, Transaction};
use px_02_secondary_index::{query_index, IndexQuery, IndexRegistry};

const TAGS: [&str; 8] = [
    "golang", "nosql", "rust", "storage", "index", "query", "btree", "lsm",
];

fn loaded_db(registry: &IndexRegistry, documents: usize) -> Database<InMemoryKVStore> {
    let db = Database::new(InMemoryKVStore::new());
    let comments: Vec<(String, Vec<u8>)> = (0..documents)
        .map(|i| {
            let id = format!("CMNT::{i:06}");
            let tags = [TAGS[i % TAGS.len()], TAGS[(i / 3) % TAGS.len()]];
            let json = serde_json::to_vec(&Comment::new(&id, "Frodo Baggins", &tags))
                .unwrap_or_default();
            (id, json)
        })
        .collect();

    for chunk in comments.chunks(500) {
        let _ = db.update_with(
            |txn| {
                for (id, json) in chunk {
                    txn.set(id.as_bytes(), json)?;
                }
                Ok(())
            },
            registry,
        );
    }
    db
}

pub fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("px-02-emit");
    let Ok(registry) = comment_registry() else {
        return;
    };

    for tag_count in [1usize, 4, 8] {
        let db = Database::new(InMemoryKVStore::new());
        let comment = Comment::new("CMNT::bench", "Frodo Baggins", &TAGS[..tag_count]);
        let Ok(json) = serde_json::to_vec(&comment) else {
            continue;
        };

        group.throughput(Throughput::Elements(tag_count as u64));
        group.bench_with_input(
            BenchmarkId::new("rewrite_comment", tag_count),
            &json,
            |b, json| {
                b.iter(|| {
                    black_box(db.update_with(
                        |txn| Ok(txn.set(b"CMNT::bench", json)?),
                        &registry,
                    ))
                })
            },
        );
    }
    group.finish();
}

pub fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("px-02-query");
    let Ok(registry) = comment_registry() else {
        return;
    };
    let db = loaded_db(&registry, 10_000);

    for limit in [10usize, 100] {
        let query = IndexQuery::new("tags").with_prefix("rust").with_limit(limit);
        group.bench_with_input(BenchmarkId::new("prefix_page", limit), &query, |b, query| {
            b.iter(|| black_box(db.view(|txn| query_index(query, txn))))
        });
    }

    let count = IndexQuery::new("tags").with_prefix("rust").count_only();
    group.bench_function("prefix_count", |b| {
        b.iter(|| black_box(db.view(|txn| query_index(&count, txn))))
    });

    let skip = IndexQuery::new("tags").with_skip(5_000).with_limit(10);
    group.bench_function("deep_skip", |b| {
        b.iter(|| black_box(db.view(|txn| query_index(&skip, txn))))
    });
    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_emit(c);
    bench_query(c);
}
