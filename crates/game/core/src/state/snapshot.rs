//! Client-facing views of zone and player state.
//!
//! Snapshots are plain data built on demand for broadcasts. Entity fields
//! are filtered down to the ones their definition marks as exported.

use std::collections::BTreeMap;

use super::{
    Direction, EntityId, Item, ItemId, NpcId, PlacedTile, Player, PlayerId, Position, Zone, ZoneId,
};
use crate::combat::CombatantId;
use crate::env::{Alignment, Definitions, EquipSlot, FieldValue, ItemKind};
use crate::stats::{SkillBlock, StatBlock};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSnapshot {
    pub id: ZoneId,
    pub name: String,
    pub tiles: Vec<PlacedTile>,
    pub entities: Vec<EntityView>,
    pub npcs: Vec<NpcView>,
    pub items: Vec<ItemView>,
    pub players: Vec<PlayerView>,
    pub combat: CombatView,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    pub id: EntityId,
    pub kind: String,
    pub name: String,
    pub position: Position,
    pub rotation: i32,
    pub usable: bool,
    pub fields: BTreeMap<String, FieldValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcView {
    pub id: NpcId,
    pub kind: String,
    pub name: String,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub alignment: Alignment,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub quality: i32,
    pub position: Option<Position>,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            kind: item.kind,
            quality: item.quality,
            position: item.ground_position(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub facing: Direction,
    pub hp: i32,
    pub max_hp: i32,
    pub ap: i32,
    pub max_ap: i32,
    pub equipped: BTreeMap<EquipSlot, String>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            position: player.position,
            facing: player.facing,
            hp: player.hp,
            max_hp: player.stats.max_hp,
            ap: player.ap,
            max_ap: player.stats.max_ap,
            equipped: player
                .inventory
                .values()
                .filter_map(|item| Some((item.slot()?, item.name.clone())))
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub id: CombatantId,
    pub initiative: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatView {
    pub in_combat: bool,
    pub turn: u32,
    pub current: Option<CombatantId>,
    /// True while playback or an announcement delay holds the turn.
    pub busy: bool,
    /// Highest initiative first.
    pub combatants: Vec<CombatantView>,
}

/// Private view sent to the owning player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerDetail {
    pub player: PlayerView,
    pub zone: Option<ZoneId>,
    pub editing: bool,
    pub skills: SkillBlock,
    pub stats: StatBlock,
    pub inventory: Vec<Item>,
    /// Spell keys the player can cast.
    pub spells: Vec<String>,
}

impl PlayerDetail {
    pub fn new(player: &Player, defs: &Definitions) -> Self {
        Self {
            player: player.into(),
            zone: player.zone,
            editing: player.editing,
            skills: player.skills,
            stats: player.stats,
            inventory: player.inventory.values().cloned().collect(),
            spells: defs
                .spells_for(&player.skills)
                .map(|(key, _)| key.to_owned())
                .collect(),
        }
    }
}

impl Zone {
    /// Public view of the whole zone.
    pub fn snapshot(&self, defs: &Definitions) -> ZoneSnapshot {
        let entities = self
            .entities
            .values()
            .map(|entity| {
                let exported = defs.entities.get(&entity.kind);
                EntityView {
                    id: entity.id,
                    kind: entity.kind.clone(),
                    name: entity.name.clone(),
                    position: entity.position,
                    rotation: entity.rotation,
                    usable: entity.usable,
                    fields: entity
                        .fields
                        .iter()
                        .filter(|(name, _)| {
                            exported
                                .and_then(|def| def.field(name))
                                .is_some_and(|field| field.exported)
                        })
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect(),
                }
            })
            .collect();

        let npcs = self
            .npcs
            .values()
            .map(|npc| NpcView {
                id: npc.id,
                kind: npc.kind.clone(),
                name: npc.name.clone(),
                position: npc.position,
                hp: npc.hp,
                max_hp: npc.stats.max_hp,
                alignment: npc.alignment,
            })
            .collect();

        let combat = &self.combat;
        ZoneSnapshot {
            id: self.id,
            name: self.name.clone(),
            tiles: self.map.placed(),
            entities,
            npcs,
            items: self.items.values().map(ItemView::from).collect(),
            players: self.players.values().map(PlayerView::from).collect(),
            combat: CombatView {
                in_combat: combat.in_combat,
                turn: combat.turn(),
                current: combat.current(),
                busy: combat.delay > 0 || self.sequence.is_playing(),
                combatants: combat
                    .queue
                    .iter()
                    .map(|(id, initiative)| CombatantView { id, initiative })
                    .collect(),
            },
        }
    }
}
