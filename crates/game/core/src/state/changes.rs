//! Dirty tracking for write-behind persistence and broadcast.
//!
//! The coordinator owns exactly one [`ChangeSet`]. Mutators only ever add to
//! it; it is drained in one go by [`ChangeSet::take`] when the pass commits.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;

use super::{ItemId, PlayerId, ZoneId};

bitflags! {
    /// Which parts of a zone changed during the current pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ZoneFields: u8 {
        const TILES     = 1 << 0;
        const ENTITIES  = 1 << 1;
        const NPCS      = 1 << 2;
        const ITEMS     = 1 << 3;
        /// Players entered, left, moved or changed visibly.
        const RESIDENTS = 1 << 4;
        const COMBAT    = 1 << 5;

        /// Parts that live in the persisted zone record.
        const PERSISTED = Self::TILES.bits()
            | Self::ENTITIES.bits()
            | Self::NPCS.bits()
            | Self::ITEMS.bits();
    }
}

impl ZoneFields {
    pub fn needs_save(self) -> bool {
        self.intersects(Self::PERSISTED)
    }
}

/// Ids whose in-memory state has diverged from storage or from clients.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub zones: BTreeMap<ZoneId, ZoneFields>,
    pub players: BTreeSet<PlayerId>,
    pub items: BTreeSet<ItemId>,
}

impl ChangeSet {
    pub fn mark_zone(&mut self, zone: ZoneId, fields: ZoneFields) {
        *self.zones.entry(zone).or_default() |= fields;
    }

    pub fn mark_player(&mut self, player: PlayerId) {
        self.players.insert(player);
    }

    pub fn mark_item(&mut self, item: ItemId) {
        self.items.insert(item);
    }

    pub fn zone(&self, zone: ZoneId) -> ZoneFields {
        self.zones.get(&zone).copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty() && self.players.is_empty() && self.items.is_empty()
    }

    /// Drains every recorded change.
    pub fn take(&mut self) -> ChangeSet {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_accumulate_until_taken() {
        let mut changes = ChangeSet::default();
        changes.mark_zone(ZoneId(1), ZoneFields::RESIDENTS);
        changes.mark_zone(ZoneId(1), ZoneFields::NPCS);
        changes.mark_player(PlayerId(4));

        let fields = changes.zone(ZoneId(1));
        assert!(fields.contains(ZoneFields::RESIDENTS | ZoneFields::NPCS));
        assert!(fields.needs_save());
        assert!(!ZoneFields::RESIDENTS.needs_save());

        let drained = changes.take();
        assert!(changes.is_empty());
        assert_eq!(drained.players.len(), 1);
        assert!(drained.players.contains(&PlayerId(4)));
        assert!(changes.zone(ZoneId(1)).is_empty());
    }
}
