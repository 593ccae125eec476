use super::{ItemId, PlayerId, Position, ZoneId};
use crate::env::{EquipSlot, ItemDef, ItemKind};
use crate::stats::StatBlock;

/// Where an item currently is. Held and on-the-ground are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "lowercase"))]
pub enum ItemState {
    Held {
        owner: PlayerId,
        slot: Option<EquipSlot>,
    },
    Ground {
        zone: ZoneId,
        position: Position,
    },
}

/// A live item instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    /// Definition key the item was created from.
    pub key: String,
    pub name: String,
    pub kind: ItemKind,
    pub quality: i32,
    pub max_qty: i32,
    pub durability: i32,
    pub special: Vec<String>,
    pub stats: StatBlock,
    pub state: ItemState,
}

impl Item {
    pub fn from_def(id: ItemId, key: &str, def: &ItemDef, state: ItemState) -> Self {
        Self {
            id,
            key: key.to_owned(),
            name: def.name.clone(),
            kind: def.kind,
            quality: def.quality,
            max_qty: def.max_qty,
            durability: def.durability,
            special: def.special.clone(),
            stats: def.stats,
            state,
        }
    }

    pub fn slot(&self) -> Option<EquipSlot> {
        match self.state {
            ItemState::Held { slot, .. } => slot,
            ItemState::Ground { .. } => None,
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        match self.state {
            ItemState::Held { owner, .. } => Some(owner),
            ItemState::Ground { .. } => None,
        }
    }

    pub fn ground_position(&self) -> Option<Position> {
        match self.state {
            ItemState::Ground { position, .. } => Some(position),
            ItemState::Held { .. } => None,
        }
    }
}
