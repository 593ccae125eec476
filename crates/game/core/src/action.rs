//! Inbound action kinds.

/// Every action a player message can carry.
///
/// Parsed from the wire name (`take_item`, `equip_item`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Join,
    Leave,
    Move,
    Face,
    Use,
    TakeItem,
    EquipItem,
    UnequipItem,
    DropItem,
    Attack,
    Edit,
}

impl ActionKind {
    /// Join and leave are never gated by turn order.
    pub fn is_gated(self) -> bool {
        !matches!(self, ActionKind::Join | ActionKind::Leave)
    }
}
