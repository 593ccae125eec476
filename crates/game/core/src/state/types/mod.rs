//! Live instance types owned by zones.
mod common;
mod entity;
mod item;
mod npc;
mod player;

pub use common::{Direction, EntityId, ItemId, NpcId, PlayerId, Position, ZoneId};
pub use entity::{CORPSE, Entity};
pub use item::{Item, ItemState};
pub use npc::{Npc, NpcGear};
pub use player::{Player, RegenTimers};
