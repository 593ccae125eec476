//! Repository contracts for saving and loading persisted records.

use std::fmt;

use game_core::{ItemId, PlayerId, ZoneId};

use super::Result;

/// Key of a persisted record.
///
/// Every record kind is keyed by a numeric id; `KIND` names the record in
/// file names and log lines.
pub trait RecordId: Copy + Ord + fmt::Display + Send + Sync + 'static {
    const KIND: &'static str;

    fn from_raw(raw: u32) -> Self;

    fn raw(self) -> u32;
}

impl RecordId for ZoneId {
    const KIND: &'static str = "zone";

    fn from_raw(raw: u32) -> Self {
        ZoneId(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl RecordId for PlayerId {
    const KIND: &'static str = "player";

    fn from_raw(raw: u32) -> Self {
        PlayerId(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl RecordId for ItemId {
    const KIND: &'static str = "item";

    fn from_raw(raw: u32) -> Self {
        ItemId(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

/// Keyed storage for one record kind.
///
/// Implementations are synchronous; the coordinator calls them between
/// messages, never in the middle of a mutation.
pub trait Repository<K: RecordId, T>: Send + Sync {
    /// Save a record, replacing any previous version.
    fn save(&self, id: K, record: &T) -> Result<()>;

    /// Load a record by id.
    fn load(&self, id: K) -> Result<Option<T>>;

    /// Check if a record exists.
    fn exists(&self, id: K) -> bool;

    /// Delete a record. Deleting a missing record is not an error.
    fn delete(&self, id: K) -> Result<()>;

    /// List every stored id in ascending order.
    fn list_ids(&self) -> Result<Vec<K>>;
}
