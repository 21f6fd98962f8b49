//! # Peripheral Index Benchmarks
//!
//! | Crate | Operation | Scenario |
//! |-------|-----------|----------|
//! | px-02 Secondary Index | Emit | Rewrite one comment with 1/4/8 tags |
//! | px-02 Secondary Index | Query | Prefix page, count mode, deep skip over 10k comments |
//! | px-03 Index Rebuilder | Rebuild | 1k / 5k stale records |

use criterion::{criterion_group, criterion_main};
use px_tests::benchmarks::{px_02_secondary_index, px_03_index_rebuilder};

criterion_group!(
    benches,
    px_02_secondary_index::register_benchmarks,
    px_03_index_rebuilder::register_benchmarks,
);

criterion_main!(benches);
