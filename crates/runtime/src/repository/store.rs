//! Write-behind cache in front of a [`Repository`].
//!
//! The world holds the authoritative copy of every live record. A store only
//! remembers which ids diverged from storage and flushes them in one
//! [`Store::commit`] per processing pass. Ids that fail to save stay dirty
//! and are retried by the next commit.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{RecordId, Repository, Result};

/// Outcome of one commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub saved: usize,
    pub failed: usize,
}

pub struct Store<K: RecordId, T> {
    repo: Arc<dyn Repository<K, T>>,
    dirty: BTreeSet<K>,
    next_id: u32,
}

impl<K: RecordId, T> Store<K, T> {
    /// Opens a store, continuing id allocation after the highest stored id.
    pub fn open(repo: Arc<dyn Repository<K, T>>) -> Result<Self> {
        let next_id = repo
            .list_ids()?
            .last()
            .map_or(1, |id| id.raw().saturating_add(1));
        Ok(Self {
            repo,
            dirty: BTreeSet::new(),
            next_id,
        })
    }

    pub fn get(&self, id: K) -> Result<Option<T>> {
        self.repo.load(id)
    }

    pub fn ids(&self) -> Result<Vec<K>> {
        self.repo.list_ids()
    }

    /// Reserves a fresh id.
    pub fn allocate(&mut self) -> K {
        let id = K::from_raw(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Builds a new record under a fresh id and marks it for saving.
    pub fn insert_new(&mut self, build: impl FnOnce(K) -> T) -> (K, T) {
        let id = self.allocate();
        self.dirty.insert(id);
        (id, build(id))
    }

    pub fn set_dirty(&mut self, id: K) {
        self.dirty.insert(id);
    }

    /// Number of ids still waiting to be saved.
    pub fn pending(&self) -> usize {
        self.dirty.len()
    }

    /// Saves every dirty id, reading the current value through `lookup`.
    ///
    /// Ids `lookup` no longer knows are dropped from the dirty set.
    pub fn commit<'a, F>(&mut self, lookup: F) -> CommitReport
    where
        T: 'a,
        F: Fn(K) -> Option<&'a T>,
    {
        let mut report = CommitReport::default();
        let dirty = std::mem::take(&mut self.dirty);
        for id in dirty {
            let Some(record) = lookup(id) else {
                debug!(target: "runtime::store", kind = K::KIND, id = %id, "dirty record no longer live");
                continue;
            };
            match self.repo.save(id, record) {
                Ok(()) => report.saved += 1,
                Err(error) => {
                    warn!(
                        target: "runtime::store",
                        kind = K::KIND,
                        id = %id,
                        error = %error,
                        "save failed; will retry"
                    );
                    self.dirty.insert(id);
                    report.failed += 1;
                }
            }
        }
        report
    }
}
