use breach_accounts::core::email::parse;
use breach_accounts::core::merge::build_record;
use breach_accounts::{AccountBreachMerger, AccountStore, BreachError, InMemoryStore, StoreError};
use std::collections::BTreeSet;

fn breaches(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

async fn stored_breaches(store: &InMemoryStore, email: &str) -> Option<BTreeSet<String>> {
    let key = parse(email).unwrap().record_key();
    store.get(&key).await.unwrap().map(|r| r.breaches)
}

#[tokio::test]
async fn test_existing_record_gets_new_breach() {
    let existing = build_record(&parse("alice@example.com").unwrap(), breaches(&["LeakA"]));
    let merger = AccountBreachMerger::new(InMemoryStore::with_records([existing]));

    let count = merger.apply(&["alice@example.com"], "LeakB").await.unwrap();

    assert_eq!(count, 1);
    assert_eq!(
        stored_breaches(merger.store(), "alice@example.com").await,
        Some(breaches(&["LeakA", "LeakB"]))
    );
}

#[tokio::test]
async fn test_known_breach_still_counts_and_writes() {
    let existing = build_record(&parse("alice@example.com").unwrap(), breaches(&["LeakA"]));
    let merger = AccountBreachMerger::new(InMemoryStore::with_records([existing]));

    let count = merger
        .apply(&["alice@example.com", "bob@example.org"], "LeakA")
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(merger.store().writes(), 2);
    assert_eq!(
        stored_breaches(merger.store(), "alice@example.com").await,
        Some(breaches(&["LeakA"]))
    );
    assert_eq!(
        stored_breaches(merger.store(), "bob@example.org").await,
        Some(breaches(&["LeakA"]))
    );
}

#[tokio::test]
async fn test_repeated_batches_are_idempotent() {
    let merger = AccountBreachMerger::new(InMemoryStore::new());
    let accounts = vec![
        "alice@example.com".to_string(),
        "bob@example.org".to_string(),
        "carol+news@mail.example.net".to_string(),
    ];

    merger.apply(&accounts, "LeakA").await.unwrap();
    let once = merger.store().snapshot().await;
    merger.apply(&accounts, "LeakA").await.unwrap();
    let twice = merger.store().snapshot().await;

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 3);
}

#[tokio::test]
async fn test_accounts_sharing_a_domain_share_a_partition() {
    let merger = AccountBreachMerger::new(InMemoryStore::new());
    merger
        .apply(&["alice@example.com", "bob@example.com"], "LeakA")
        .await
        .unwrap();

    let records = merger.store().snapshot().await;
    assert!(records.iter().all(|r| r.partition_key == "EMAIL#example.com"));
    let sort_keys: Vec<_> = records.iter().map(|r| r.sort_key.as_str()).collect();
    assert_eq!(sort_keys, vec!["EMAIL#alice", "EMAIL#bob"]);
}

#[tokio::test]
async fn test_invalid_email_anywhere_blocks_the_batch() {
    let merger = AccountBreachMerger::new(InMemoryStore::new());
    let err = merger
        .apply(
            &["alice@example.com", "bob@example.org", "user@-badlabel-.com"],
            "BigLeak",
        )
        .await
        .unwrap_err();

    assert!(
        matches!(err, BreachError::InvalidEmail { ref email } if email == "user@-badlabel-.com")
    );
    assert_eq!(merger.store().reads(), 0);
    assert_eq!(merger.store().writes(), 0);
    assert!(merger.store().snapshot().await.is_empty());
}

#[tokio::test]
async fn test_read_failure_keeps_earlier_writes() {
    let failing = parse("bob@example.org").unwrap().record_key();
    let merger = AccountBreachMerger::new(InMemoryStore::new().fail_reads_for(failing));

    let err = merger
        .apply(
            &["alice@example.com", "bob@example.org", "carol@example.net"],
            "LeakA",
        )
        .await
        .unwrap_err();

    match err {
        BreachError::StoreRead { account, source } => {
            assert_eq!(account, "bob@example.org");
            assert!(matches!(source, StoreError::Backend(_)));
        }
        other => panic!("expected StoreRead, got {:?}", other),
    }

    // alice 已寫入且不回滾，carol 未被處理
    assert_eq!(
        stored_breaches(merger.store(), "alice@example.com").await,
        Some(breaches(&["LeakA"]))
    );
    assert_eq!(stored_breaches(merger.store(), "carol@example.net").await, None);
    assert_eq!(merger.store().writes(), 1);
}

#[tokio::test]
async fn test_write_failure_stops_the_batch() {
    let failing = parse("alice@example.com").unwrap().record_key();
    let merger = AccountBreachMerger::new(InMemoryStore::new().fail_writes_for(failing));

    let err = merger
        .apply(&["alice@example.com", "bob@example.org"], "LeakA")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("alice@example.com"));
    match err {
        BreachError::StoreWrite { account, .. } => assert_eq!(account, "alice@example.com"),
        other => panic!("expected StoreWrite, got {:?}", other),
    }
    assert_eq!(merger.store().reads(), 1);
    assert!(merger.store().snapshot().await.is_empty());
}
