use std::collections::BTreeMap;

use super::{NpcId, Position};
use crate::env::{Alignment, Definitions, EquipSlot, NpcDef};
use crate::stats::{SkillBlock, StatBlock};

/// Item worn by an NPC; only its stat bonuses matter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcGear {
    pub name: String,
    pub stats: StatBlock,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    pub id: NpcId,
    /// Definition key the NPC was spawned from.
    pub kind: String,
    pub name: String,
    pub position: Position,
    pub hp: i32,
    pub alignment: Alignment,
    /// Key into the NPC logic table.
    pub logic: String,
    pub skills: SkillBlock,
    pub stats: StatBlock,
    pub gear: BTreeMap<EquipSlot, NpcGear>,
}

impl Npc {
    /// Spawns an NPC from its template at full health.
    ///
    /// Gear naming an unknown item is skipped.
    pub fn from_def(
        id: NpcId,
        key: &str,
        def: &NpcDef,
        defs: &Definitions,
        name: Option<String>,
        position: Position,
    ) -> Self {
        let gear: BTreeMap<EquipSlot, NpcGear> = def
            .slots
            .iter()
            .filter_map(|(slot, item)| {
                let item = defs.items.get(item)?;
                Some((
                    *slot,
                    NpcGear {
                        name: item.name.clone(),
                        stats: item.stats,
                    },
                ))
            })
            .collect();
        let mut npc = Self {
            id,
            kind: key.to_owned(),
            name: name.unwrap_or_else(|| def.default_name.clone()),
            position,
            hp: 0,
            alignment: def.alignment,
            logic: def.logic.clone(),
            skills: def.skills,
            stats: StatBlock::default(),
            gear,
        };
        npc.rebuild_stats();
        npc.hp = npc.stats.max_hp;
        npc
    }

    pub fn rebuild_stats(&mut self) {
        let gear: StatBlock = self.gear.values().map(|gear| &gear.stats).sum();
        self.stats = self.skills.build_stats() + gear;
    }

    pub fn is_hostile(&self) -> bool {
        self.alignment == Alignment::Hostile
    }

    pub fn total_level(&self) -> i32 {
        self.skills.total_level()
    }
}
