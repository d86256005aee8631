use crate::domain::model::{AccountRecord, RecordKey};
use crate::utils::error::StoreResult;
use async_trait::async_trait;

/// Key-value store holding account items.
///
/// No transactional semantics: every call stands alone and `put` replaces the
/// whole item.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get(&self, key: &RecordKey) -> StoreResult<Option<AccountRecord>>;
    async fn put(&self, record: &AccountRecord) -> StoreResult<()>;
}
