use crate::domain::model::{AccountRecord, RecordKey};
use crate::domain::ports::AccountStore;
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// Keeps every record in a single JSON array on disk.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    // 同一行程內的讀改寫需要序列化
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<AccountRecord>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&data).map_err(|e| {
            StoreError::MalformedItem(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Writes a sibling temp file and renames it over the target, so a failed
    /// write never leaves a truncated store behind.
    fn save(&self, records: &[AccountRecord]) -> StoreResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let data = serde_json::to_vec_pretty(records)?;
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(&data)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for LocalStore {
    async fn get(&self, key: &RecordKey) -> StoreResult<Option<AccountRecord>> {
        let records = self.load()?;
        Ok(records.into_iter().find(|r| r.key() == *key))
    }

    async fn put(&self, record: &AccountRecord) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load()?;
        let key = record.key();
        match records.iter_mut().find(|r| r.key() == key) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        records.sort_by_key(|r| r.key());

        tracing::debug!("Writing {} records to {}", records.len(), self.path.display());
        self.save(&records)
    }
}
