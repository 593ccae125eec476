//! Creation and removal of NPCs and entities, including deaths.

use std::collections::BTreeMap;

use tracing::info;

use super::{ZoneEngine, ZoneEvent};
use crate::env::{DefinitionError, FieldValue};
use crate::state::{Entity, EntityId, Npc, NpcId, PlayerId, Position, ZoneFields};

impl ZoneEngine<'_> {
    /// Spawns an NPC from its definition on a free cell.
    pub fn spawn_npc(
        &mut self,
        key: &str,
        name: Option<String>,
        position: Position,
    ) -> Result<NpcId, DefinitionError> {
        let defs = self.env.defs;
        let def = defs.npc(key)?;
        if !self.zone.is_free(position) {
            return Err(DefinitionError::Blocked(position));
        }
        let id = self.zone.allocate_npc();
        let npc = Npc::from_def(id, key, def, defs, name, position);
        info!(target: "game::zone", zone = %self.zone.id, npc = %id, kind = key, "npc spawned");
        self.zone.npcs.insert(id, npc);
        self.zone.rebuild_collision();
        self.mark(ZoneFields::NPCS);
        self.check_combat();
        Ok(id)
    }

    /// Moves an NPC onto a free cell.
    pub fn move_npc(&mut self, npc: NpcId, to: Position) -> bool {
        if !self.zone.is_free(to) {
            return false;
        }
        let Some(moving) = self.zone.npcs.get_mut(&npc) else {
            return false;
        };
        moving.position = to;
        self.zone.rebuild_collision();
        self.mark(ZoneFields::NPCS);
        true
    }

    pub fn remove_npc(&mut self, npc: NpcId) -> Option<Npc> {
        let removed = self.zone.npcs.remove(&npc)?;
        self.zone.rebuild_collision();
        self.mark(ZoneFields::NPCS);
        self.check_combat();
        Some(removed)
    }

    /// Places a new entity from its definition.
    pub fn add_entity(
        &mut self,
        key: &str,
        name: Option<String>,
        position: Position,
        fields: BTreeMap<String, FieldValue>,
    ) -> Result<EntityId, DefinitionError> {
        let defs = self.env.defs;
        let def = defs.entity(key)?;
        let entity = Entity::from_def(
            EntityId(self.zone.next_entity),
            key,
            def,
            name,
            position,
            fields,
        )?;
        let id = self.zone.allocate_entity();
        let blocking = entity.blocking;
        self.zone.entities.insert(id, entity);
        if blocking {
            self.zone.rebuild_collision();
        }
        self.mark(ZoneFields::ENTITIES);
        Ok(id)
    }

    pub fn remove_entity(&mut self, entity: EntityId) -> Option<Entity> {
        let removed = self.zone.entities.remove(&entity)?;
        if removed.blocking {
            self.zone.rebuild_collision();
        }
        self.mark(ZoneFields::ENTITIES);
        Some(removed)
    }

    fn spawn_corpse(&mut self, of: &str, position: Position) {
        let id = self.zone.allocate_entity();
        self.zone
            .entities
            .insert(id, Entity::corpse(id, of, position));
        self.mark(ZoneFields::ENTITIES);
    }

    pub(crate) fn kill_npc(&mut self, npc: NpcId) {
        let Some(dead) = self.zone.npcs.remove(&npc) else {
            return;
        };
        info!(target: "game::combat", zone = %self.zone.id, npc = %npc, name = %dead.name, "npc died");
        self.spawn_corpse(&dead.name, dead.position);
        self.zone.rebuild_collision();
        self.mark(ZoneFields::NPCS);
        self.message(None, format!("{} died", dead.name));
    }

    /// Takes a dead player out of the zone and hands them to the coordinator.
    pub(crate) fn kill_player(&mut self, player: PlayerId) {
        let Some(dead) = self.detach_player(player) else {
            return;
        };
        info!(target: "game::combat", zone = %self.zone.id, player = %player, "player died");
        self.spawn_corpse(&dead.name, dead.position);
        self.message(None, format!("{} died", dead.name));
        self.zone.outbox.push(ZoneEvent::PlayerDied(Box::new(dead)));
    }
}
