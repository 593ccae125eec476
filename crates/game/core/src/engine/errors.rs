//! Reasons a zone mutator declines to act.

use crate::env::{DefinitionError, EquipSlot};
use crate::state::{EntityId, ItemId, NpcId, PlayerId, Position};

/// Why an action was dropped.
///
/// Every variant is a no-op outcome: the zone is left exactly as it was. The
/// coordinator logs these and moves on; they are stale-client races or
/// malformed input, never protocol failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionRejected {
    #[error("missing parameter `{0}`")]
    MissingParam(&'static str),

    #[error("invalid parameter `{0}`")]
    InvalidParam(&'static str),

    #[error("player {0} is not in this zone")]
    NotInZone(PlayerId),

    #[error("not this player's turn")]
    OutOfTurn,

    #[error("needs {cost} AP but only {available} left")]
    InsufficientAp { cost: i32, available: i32 },

    #[error("cell {0} is blocked")]
    Blocked(Position),

    #[error("target is out of reach")]
    NotAdjacent,

    #[error("no entity {0}")]
    UnknownEntity(EntityId),

    #[error("no npc {0}")]
    UnknownNpc(NpcId),

    #[error("no item {0} here")]
    UnknownItem(ItemId),

    #[error("entity {0} cannot be used")]
    NotUsable(EntityId),

    #[error("item {0} cannot be equipped")]
    NotEquippable(ItemId),

    #[error("nothing equipped in {0}")]
    EmptySlot(EquipSlot),

    #[error("spell `{0}` is above the caster's level")]
    SpellLocked(String),

    #[error("player is not editing")]
    NotEditing,

    #[error("unsupported action `{0}`")]
    Unsupported(String),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

/// Failures inside use-functions and NPC logic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BehaviorError {
    #[error("no use function `{0}`")]
    UnknownUseFunction(String),

    #[error("no npc logic `{0}`")]
    UnknownLogic(String),

    #[error("entity {entity} is missing field `{field}`")]
    MissingField { entity: EntityId, field: &'static str },

    #[error("no free cell next to {0}")]
    NoFreeCell(Position),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}
