//! In-memory repository for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{RecordId, Repository, RepositoryError, Result};

/// Stores cloned records keyed by id.
pub struct InMemoryRepository<K, T> {
    records: RwLock<BTreeMap<K, T>>,
}

impl<K: RecordId, T: Clone> InMemoryRepository<K, T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create pre-filled with records.
    pub fn with_records(records: impl IntoIterator<Item = (K, T)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: RecordId, T: Clone> Default for InMemoryRepository<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Repository<K, T> for InMemoryRepository<K, T>
where
    K: RecordId,
    T: Clone + Send + Sync,
{
    fn save(&self, id: K, record: &T) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(id, record.clone());
        Ok(())
    }

    fn load(&self, id: K) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn exists(&self, id: K) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: K) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<K>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.keys().copied().collect())
    }
}
