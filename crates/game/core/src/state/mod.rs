//! Authoritative world state.
//!
//! Zones own their map, entities, NPCs, ground items and resident players.
//! [`WorldState`] owns every zone plus the players that are not placed, and
//! the [`ChangeSet`] that records what a processing pass touched. Runtime
//! layers read this state freely but mutate it only through
//! [`ZoneEngine`](crate::engine::ZoneEngine).
mod changes;
mod collision;
mod map;
mod snapshot;
pub mod types;
mod world;
mod zone;

pub use changes::{ChangeSet, ZoneFields};
pub use collision::CollisionMap;
pub use map::{PlacedTile, Tile, ZoneMap};
pub use snapshot::{
    CombatView, CombatantView, EntityView, ItemView, NpcView, PlayerDetail, PlayerView,
    ZoneSnapshot,
};
pub use types::{
    CORPSE, Direction, Entity, EntityId, Item, ItemId, ItemState, Npc, NpcGear, NpcId, Player,
    PlayerId, Position, RegenTimers, ZoneId,
};
pub use world::{Notice, WorldState};
pub use zone::Zone;
