//! QueryIndex: range, prefix and paginated scans over one index.

use crate::domain::errors::IndexError;
use crate::domain::hash::IndexHash;
use crate::domain::keys::{IndexKey, Partition};
use crate::domain::query::{IndexQuery, QueryOutcome, QueryResult, ScanBounds};
use px_01_kv_store::{ScanOptions, Transaction};

/// Query the reverse partition (derived value → primary key).
pub fn query_index<T>(query: &IndexQuery, txn: &T) -> Result<QueryOutcome, IndexError>
where
    T: Transaction + ?Sized,
{
    query_index_in(query, txn, Partition::Reverse)
}

/// Query either partition of an index.
///
/// Results always carry the primary key in `key` and the derived value in
/// `index`, whichever partition was scanned. Forward queries do not swap the
/// two: `start`, `end` and `prefix` bound the primary key, and `value` holds
/// the back-pointer to the reverse entry. An index that was never written
/// yields no results.
pub fn query_index_in<T>(
    query: &IndexQuery,
    txn: &T,
    partition: Partition,
) -> Result<QueryOutcome, IndexError>
where
    T: Transaction + ?Sized,
{
    if query.index.is_empty() {
        return Err(IndexError::NoIndexName);
    }

    let hash = IndexHash::of(&query.index);
    let bounds = ScanBounds::new(&hash, partition, query);
    let opts = if query.count {
        ScanOptions::keys_only()
    } else {
        ScanOptions::with_values()
    };

    let mut to_skip = query.skip;
    let mut remaining = query.effective_limit();
    let mut matched = 0;
    let mut results = Vec::new();

    for item in txn.scan_prefix(&bounds.seek, &bounds.prefix, opts)? {
        if remaining == Some(0) {
            break;
        }
        let entry = item?;
        if bounds.past_end(&entry.key) {
            break;
        }
        if !bounds.within_end(&entry.key) {
            continue;
        }
        if to_skip > 0 {
            to_skip -= 1;
            continue;
        }
        if let Some(left) = remaining.as_mut() {
            *left -= 1;
        }

        if query.count {
            matched += 1;
            continue;
        }
        let decoded = IndexKey::decode(&entry.key)?;
        results.push(QueryResult {
            key: decoded.primary_key,
            value: entry.value,
            index: decoded.derived,
        });
    }

    let count = if query.count { matched } else { results.len() };
    tracing::trace!(index = %query.index, count, "index query");
    Ok(QueryOutcome { results, count })
}
