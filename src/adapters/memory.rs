use crate::domain::model::{AccountRecord, RecordKey};
use crate::domain::ports::AccountStore;
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Process-local store. Used by tests and for dry runs; keys can be set up
/// to fail on read or write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<RecordKey, AccountRecord>>,
    failing_reads: HashSet<RecordKey>,
    failing_writes: HashSet<RecordKey>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = AccountRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.key(), r)).collect();
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    pub fn fail_reads_for(mut self, key: RecordKey) -> Self {
        self.failing_reads.insert(key);
        self
    }

    pub fn fail_writes_for(mut self, key: RecordKey) -> Self {
        self.failing_writes.insert(key);
        self
    }

    /// Number of `get` calls seen, failed ones included.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `put` calls seen, failed ones included.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// All records ordered by key.
    pub async fn snapshot(&self) -> Vec<AccountRecord> {
        let mut records: Vec<_> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.key());
        records
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn get(&self, key: &RecordKey) -> StoreResult<Option<AccountRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads.contains(key) {
            return Err(StoreError::Backend(format!("simulated read failure for {}", key)));
        }
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, record: &AccountRecord) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let key = record.key();
        if self.failing_writes.contains(&key) {
            return Err(StoreError::Backend(format!("simulated write failure for {}", key)));
        }
        self.records.write().await.insert(key, record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::email::parse;
    use crate::core::merge::build_record;
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryStore::new();
        let identity = parse("alice@example.com").unwrap();
        let record = build_record(&identity, BTreeSet::from(["LeakA".to_string()]));

        store.put(&record).await.unwrap();
        assert_eq!(store.get(&identity.record_key()).await.unwrap(), Some(record));
        assert_eq!(store.reads(), 1);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let key = parse("bob@example.org").unwrap().record_key();
        let store = InMemoryStore::new()
            .fail_reads_for(key.clone())
            .fail_writes_for(key.clone());

        assert!(store.get(&key).await.is_err());
        let record = build_record(&parse("bob@example.org").unwrap(), BTreeSet::new());
        assert!(store.put(&record).await.is_err());
        assert!(store.snapshot().await.is_empty());
    }
}
