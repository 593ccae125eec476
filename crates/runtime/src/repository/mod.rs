//! Persistence collaborator: keyed repositories and write-behind stores.
//!
//! Zones, players and items are persisted as independent records. The
//! coordinator only ever talks to [`Store`]s; repositories are the swappable
//! backend underneath.
mod error;
mod file;
mod memory;
mod store;
mod traits;

use std::path::Path;
use std::sync::Arc;

use game_core::{Item, ItemId, Player, PlayerId, Zone, ZoneId};

pub use error::{RepositoryError, Result};
pub use file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use store::{CommitReport, Store};
pub use traits::{RecordId, Repository};

/// One repository per record kind.
#[derive(Clone)]
pub struct Repositories {
    pub zones: Arc<dyn Repository<ZoneId, Zone>>,
    pub players: Arc<dyn Repository<PlayerId, Player>>,
    pub items: Arc<dyn Repository<ItemId, Item>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            zones: Arc::new(InMemoryRepository::new()),
            players: Arc::new(InMemoryRepository::new()),
            items: Arc::new(InMemoryRepository::new()),
        }
    }

    /// JSON files under `root/zones`, `root/players` and `root/items`.
    pub fn json_files(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        Ok(Self {
            zones: Arc::new(JsonFileRepository::new(root.join("zones"))?),
            players: Arc::new(JsonFileRepository::new(root.join("players"))?),
            items: Arc::new(JsonFileRepository::new(root.join("items"))?),
        })
    }
}
