use std::collections::BTreeMap;

use super::{Direction, Item, ItemId, ItemState, PlayerId, Position, ZoneId};
use crate::config::GameConfig;
use crate::env::EquipSlot;
use crate::stats::{SkillBlock, StatBlock};

/// Countdown timers for passive regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenTimers {
    pub hp: i32,
    pub ap: i32,
}

/// A connected (or parked) player character.
///
/// Stats are derived state: they are rebuilt from skills and equipped items
/// and never persisted. Inventory items are persisted through the item store,
/// not as part of the player record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Zone the player was last placed in.
    pub zone: Option<ZoneId>,
    pub position: Position,
    pub facing: Direction,
    pub hp: i32,
    pub ap: i32,
    pub timers: RegenTimers,
    pub skills: SkillBlock,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub inventory: BTreeMap<ItemId, Item>,
    /// Admin mode: no AP costs, no collision. Never persisted.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub editing: bool,
}

impl Player {
    /// Fresh level-1 character at full health.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        let skills = SkillBlock::uniform(1);
        let stats = skills.build_stats();
        Self {
            id,
            name: name.into(),
            zone: None,
            position: Position::ORIGIN,
            facing: Direction::South,
            hp: stats.max_hp,
            ap: stats.max_ap,
            timers: RegenTimers::default(),
            skills,
            stats,
            inventory: BTreeMap::new(),
            editing: false,
        }
    }

    /// Recomputes derived stats from skills plus equipped items.
    pub fn rebuild_stats(&mut self) {
        let gear: StatBlock = self
            .inventory
            .values()
            .filter(|item| item.slot().is_some())
            .map(|item| &item.stats)
            .sum();
        self.stats = self.skills.build_stats() + gear;
    }

    pub fn equipped(&self, slot: EquipSlot) -> Option<&Item> {
        self.inventory.values().find(|item| item.slot() == Some(slot))
    }

    /// Sets the slot of a held item, returning false if it is not held.
    pub(crate) fn set_slot(&mut self, item: ItemId, slot: Option<EquipSlot>) -> bool {
        let owner = self.id;
        match self.inventory.get_mut(&item) {
            Some(held) => {
                held.state = ItemState::Held { owner, slot };
                true
            }
            None => false,
        }
    }

    /// Gives the player an item, clearing any previous placement.
    pub fn give(&mut self, mut item: Item) {
        item.state = ItemState::Held {
            owner: self.id,
            slot: None,
        };
        self.inventory.insert(item.id, item);
    }

    pub fn total_level(&self) -> i32 {
        self.skills.total_level()
    }

    pub fn restore(&mut self) {
        self.hp = self.stats.max_hp;
        self.ap = self.stats.max_ap;
    }

    /// Advances both regeneration countdowns by one tick.
    ///
    /// Returns true if HP or AP actually changed.
    pub fn regen(&mut self, config: &GameConfig) -> bool {
        let hp = regen_point(
            &mut self.timers.hp,
            &mut self.hp,
            self.stats.max_hp,
            config.hp_regen_ticks,
        );
        let ap = regen_point(
            &mut self.timers.ap,
            &mut self.ap,
            self.stats.max_ap,
            config.ap_regen_ticks,
        );
        hp || ap
    }
}

fn regen_point(timer: &mut i32, value: &mut i32, max: i32, reset: i32) -> bool {
    *timer -= 1;
    if *timer > 0 {
        return false;
    }
    *timer = reset;
    if *value < max {
        *value += 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ItemDef, ItemKind};

    fn helmet(id: u32) -> Item {
        let def = ItemDef {
            name: "Iron Helm".into(),
            kind: ItemKind::Helmet,
            stats: StatBlock {
                defence: 3,
                ..StatBlock::default()
            },
            ..ItemDef::default()
        };
        Item::from_def(
            ItemId(id),
            "iron_helm",
            &def,
            ItemState::Ground {
                zone: ZoneId(0),
                position: Position::ORIGIN,
            },
        )
    }

    #[test]
    fn only_equipped_items_contribute_stats() {
        let mut player = Player::new(PlayerId(1), "ann");
        let base = player.stats.defence;

        player.give(helmet(7));
        player.rebuild_stats();
        assert_eq!(player.stats.defence, base);

        assert!(player.set_slot(ItemId(7), Some(EquipSlot::Head)));
        player.rebuild_stats();
        assert_eq!(player.stats.defence, base + 3);
        assert_eq!(player.equipped(EquipSlot::Head).map(|i| i.id), Some(ItemId(7)));
    }

    #[test]
    fn hp_regenerates_every_eighth_tick() {
        let config = GameConfig::new();
        let mut player = Player::new(PlayerId(1), "ann");
        player.hp -= 2;
        player.ap = player.stats.max_ap;
        player.timers = RegenTimers {
            hp: config.hp_regen_ticks,
            ap: config.ap_regen_ticks,
        };

        let changed: Vec<bool> = (0..8).map(|_| player.regen(&config)).collect();
        assert_eq!(changed, vec![false, false, false, false, false, false, false, true]);
        assert_eq!(player.hp, player.stats.max_hp - 1);
    }

    #[test]
    fn regen_reports_no_change_at_full_resources() {
        let config = GameConfig::new();
        let mut player = Player::new(PlayerId(1), "ann");
        assert!((0..20).all(|_| !player.regen(&config)));
    }

    #[test]
    fn ap_regenerates_every_tick_up_to_max() {
        let config = GameConfig::new();
        let mut player = Player::new(PlayerId(1), "ann");
        player.ap = player.stats.max_ap - 2;
        assert!(player.regen(&config));
        assert!(player.regen(&config));
        assert!(!player.regen(&config));
        assert_eq!(player.ap, player.stats.max_ap);
    }
}
