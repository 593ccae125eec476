//! Worker tasks that back the runtime.
//!
//! The coordinator owns the world; the ticker only feeds it ticks.

mod bootstrap;
mod coordinator;
pub(crate) mod ticker;

use game_core::{Item, ItemId, Player, PlayerId, Zone, ZoneId};

pub(crate) use bootstrap::load_world;
pub use coordinator::{Command, Coordinator};

use crate::repository::{Repositories, Result, Store};

/// Write-behind stores for every record kind.
pub struct Stores {
    pub zones: Store<ZoneId, Zone>,
    pub players: Store<PlayerId, Player>,
    pub items: Store<ItemId, Item>,
}

impl Stores {
    pub fn open(repos: &Repositories) -> Result<Self> {
        Ok(Self {
            zones: Store::open(repos.zones.clone())?,
            players: Store::open(repos.players.clone())?,
            items: Store::open(repos.items.clone())?,
        })
    }
}
