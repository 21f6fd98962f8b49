//! # Comments Scenario
//!
//! Two indexes (`tags`, `by`) over JSON comments, queried by prefix, then
//! kept in sync through an update and a delete.

use crate::fixtures::{
    comment_registry, count_keys, delete_document, query_hits, save_comment, Comment,
};
use px_01_kv_store::{Database, KeyValueStore};
use px_02_secondary_index::{query_index, IndexQuery};

fn exact(index: &str, value: &str) -> IndexQuery {
    IndexQuery::new(index).with_start(value).with_prefix(value)
}

fn hits(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(key, index)| (key.to_string(), index.to_string()))
        .collect()
}

/// Run the full scenario against `db`, which must be empty.
pub fn comments_scenario<S: KeyValueStore>(db: &Database<S>) -> anyhow::Result<()> {
    let registry = comment_registry()?;

    save_comment(db, &registry, &Comment::new("CMNT::001", "Frodo Baggins", &["nosql"]))?;
    save_comment(
        db,
        &registry,
        &Comment::new("CMNT::002", "Frodo Baggins", &["nosql", "golang"]),
    )?;

    // 2 documents, 3 tag pairs, 2 author pairs
    assert_eq!(count_keys(db)?, 2 + 3 * 2 + 2 * 2);

    assert_eq!(
        query_hits(db, &exact("tags", "nosql"))?,
        hits(&[("CMNT::001", "nosql"), ("CMNT::002", "nosql")])
    );
    assert_eq!(
        query_hits(db, &exact("tags", "golang"))?,
        hits(&[("CMNT::002", "golang")])
    );
    assert_eq!(
        query_hits(db, &exact("by", "Frodo Baggins"))?,
        hits(&[("CMNT::001", "Frodo Baggins"), ("CMNT::002", "Frodo Baggins")])
    );

    // Rewrite the first comment under a different author and tag.
    save_comment(
        db,
        &registry,
        &Comment::new("CMNT::001", "Samwise Gamgee", &["golang"]),
    )?;

    assert_eq!(
        query_hits(db, &exact("tags", "nosql"))?,
        hits(&[("CMNT::002", "nosql")])
    );
    assert_eq!(
        query_hits(db, &exact("tags", "golang"))?,
        hits(&[("CMNT::001", "golang"), ("CMNT::002", "golang")])
    );
    assert_eq!(
        query_hits(db, &exact("by", "Frodo Baggins"))?,
        hits(&[("CMNT::002", "Frodo Baggins")])
    );
    assert_eq!(
        query_hits(db, &IndexQuery::new("by").with_prefix("S"))?,
        hits(&[("CMNT::001", "Samwise Gamgee")])
    );

    delete_document(db, &registry, "CMNT::002")?;

    let tags = db.view(|txn| query_index(&IndexQuery::new("tags").count_only(), txn))?;
    assert_eq!(tags.count, 1);
    assert!(query_hits(db, &exact("tags", "nosql"))?.is_empty());
    assert_eq!(count_keys(db)?, 1 + 2 + 2);

    delete_document(db, &registry, "CMNT::001")?;
    assert_eq!(count_keys(db)?, 0);
    Ok(())
}

/// A comment with no tags and no author derives nothing.
pub fn anonymous_comment_scenario<S: KeyValueStore>(db: &Database<S>) -> anyhow::Result<()> {
    let registry = comment_registry()?;
    save_comment(db, &registry, &Comment::new("CMNT::003", "", &[]))?;

    assert_eq!(count_keys(db)?, 1);
    assert!(query_hits(db, &IndexQuery::new("by"))?.is_empty());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{init_test_logging, tags_index};
    use px_01_kv_store::{InMemoryKVStore, Transaction};
    use px_02_secondary_index::{IndexError, IndexRegistry};

    fn memory_db() -> Database<InMemoryKVStore> {
        Database::new(InMemoryKVStore::new())
    }

    #[test]
    fn test_comments_in_memory() {
        init_test_logging();
        comments_scenario(&memory_db()).unwrap();
    }

    #[test]
    fn test_anonymous_comment_in_memory() {
        init_test_logging();
        anonymous_comment_scenario(&memory_db()).unwrap();
    }

    #[test]
    fn test_invalid_json_aborts_commit() {
        init_test_logging();
        let db = memory_db();
        let registry = IndexRegistry::new().with_index(tags_index()).unwrap();

        let err = db
            .update_with(|txn| Ok(txn.set(b"CMNT::004", b"not json")?), &registry)
            .unwrap_err();

        assert!(matches!(err, IndexError::IndexFunction(_)));
        assert_eq!(db.store().len(), 0);
    }

    #[test]
    fn test_multiple_documents_in_one_transaction() {
        init_test_logging();
        let db = memory_db();
        let registry = comment_registry().unwrap();
        let first = serde_json::to_vec(&Comment::new("CMNT::010", "Bilbo", &["ring"])).unwrap();
        let second = serde_json::to_vec(&Comment::new("CMNT::011", "Bilbo", &["ring"])).unwrap();

        db.update_with(
            |txn| {
                txn.set(b"CMNT::010", &first)?;
                txn.set(b"CMNT::011", &second)?;
                txn.delete(b"CMNT::010")?;
                Ok(())
            },
            &registry,
        )
        .unwrap();

        assert_eq!(
            query_hits(&db, &exact("tags", "ring")).unwrap(),
            hits(&[("CMNT::011", "ring")])
        );
    }
}
