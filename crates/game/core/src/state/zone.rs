use std::collections::BTreeMap;

use super::{
    CollisionMap, Entity, EntityId, Item, ItemId, Npc, NpcId, Player, PlayerId, Position, ZoneId,
    ZoneMap,
};
use crate::combat::CombatState;
use crate::engine::ZoneEvent;
use crate::env::{DefinitionError, Definitions, RollStream, ZoneDef};
use crate::sequence::Sequence;

/// One simulated area: map, residents, and its turn state.
///
/// The persisted record covers the map, entities, NPCs and id counters.
/// Residents and ground items are re-attached at load time; combat,
/// playback and collision data are rebuilt.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub spawn: Position,
    pub map: ZoneMap,
    pub entities: BTreeMap<EntityId, Entity>,
    pub npcs: BTreeMap<NpcId, Npc>,
    pub next_entity: u32,
    pub next_npc: u32,
    pub rolls: RollStream,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub items: BTreeMap<ItemId, Item>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub players: BTreeMap<PlayerId, Player>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub combat: CombatState,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub sequence: Sequence,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub collision: CollisionMap,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub outbox: Vec<ZoneEvent>,
}

impl Zone {
    pub fn new(id: ZoneId, name: impl Into<String>, world_seed: u64) -> Self {
        Self {
            id,
            name: name.into(),
            spawn: Position::ORIGIN,
            map: ZoneMap::default(),
            entities: BTreeMap::new(),
            npcs: BTreeMap::new(),
            next_entity: 0,
            next_npc: 0,
            rolls: RollStream::new(world_seed, id.0),
            items: BTreeMap::new(),
            players: BTreeMap::new(),
            combat: CombatState::default(),
            sequence: Sequence::default(),
            collision: CollisionMap::default(),
            outbox: Vec::new(),
        }
    }

    /// Builds a zone from its definition: tiles, entities and NPCs.
    ///
    /// Ground items need store-allocated ids and are placed by the caller.
    pub fn from_def(
        id: ZoneId,
        name: &str,
        def: &ZoneDef,
        defs: &Definitions,
        world_seed: u64,
    ) -> Result<Self, DefinitionError> {
        let mut zone = Self::new(id, name, world_seed);
        zone.spawn = def.spawn;
        zone.map = ZoneMap::from_def(def, defs)?;

        for placed in &def.entities {
            let entity_def = defs.entity(&placed.kind)?;
            let entity = Entity::from_def(
                zone.allocate_entity(),
                &placed.kind,
                entity_def,
                placed.name.clone(),
                placed.position,
                placed.fields.clone(),
            )?;
            zone.entities.insert(entity.id, entity);
        }
        for placed in &def.npcs {
            let npc_def = defs.npc(&placed.kind)?;
            let npc = Npc::from_def(
                zone.allocate_npc(),
                &placed.kind,
                npc_def,
                defs,
                placed.name.clone(),
                placed.position,
            );
            zone.npcs.insert(npc.id, npc);
        }
        zone.rebuild_collision();
        Ok(zone)
    }

    pub(crate) fn allocate_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    pub(crate) fn allocate_npc(&mut self) -> NpcId {
        let id = NpcId(self.next_npc);
        self.next_npc += 1;
        id
    }

    /// Recomputes the collision map from tiles, blocking entity footprints and
    /// NPC-occupied cells.
    pub fn rebuild_collision(&mut self) {
        let mut collision = CollisionMap::from_tiles(&self.map);
        for entity in self.entities.values().filter(|entity| entity.blocking) {
            collision.block_all(entity.footprint());
        }
        collision.block_all(self.npcs.values().map(|npc| npc.position));
        self.collision = collision;
    }

    /// True if a player or NPC stands on `position`.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.players.values().any(|player| player.position == position)
            || self.npcs.values().any(|npc| npc.position == position)
    }

    /// Walkable and unoccupied.
    pub fn is_free(&self, position: Position) -> bool {
        !self.collision.is_blocked(position) && !self.is_occupied(position)
    }

    /// First free cell next to `origin`, scanning N, S, E, W.
    pub fn free_neighbour(&self, origin: Position) -> Option<Position> {
        crate::state::Direction::ALL
            .iter()
            .filter_map(|direction| origin.step(*direction))
            .find(|cell| self.is_free(*cell))
    }

    pub fn has_hostiles(&self) -> bool {
        self.npcs.values().any(Npc::is_hostile)
    }

    pub fn npc_positions(&self) -> Vec<(NpcId, Position)> {
        self.npcs.values().map(|npc| (npc.id, npc.position)).collect()
    }

    /// Removes and returns any queued zone events.
    pub fn drain_events(&mut self) -> Vec<ZoneEvent> {
        std::mem::take(&mut self.outbox)
    }
}
