//! Strategy tables for entity use-functions and NPC logic.
//!
//! Entity and NPC definitions name their behaviour by string key. The
//! [`BehaviorRegistry`] maps those keys to implementations once at startup and
//! is injected into every engine through [`GameEnv`](crate::env::GameEnv).

use std::collections::HashMap;
use std::sync::Arc;

use super::{BehaviorError, ZoneEngine, ZoneRef};
use crate::combat::CombatantId;
use crate::state::{Direction, EntityId, NpcId, PlayerId, Position};

/// What happens when a player uses an entity.
pub trait UseFunction: Send + Sync {
    fn apply(
        &self,
        engine: &mut ZoneEngine<'_>,
        entity: EntityId,
        user: PlayerId,
    ) -> Result<(), BehaviorError>;
}

/// What an NPC does when it holds the turn.
pub trait NpcLogic: Send + Sync {
    fn take_turn(&self, engine: &mut ZoneEngine<'_>, npc: NpcId) -> Result<(), BehaviorError>;
}

#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    uses: HashMap<String, Arc<dyn UseFunction>>,
    logic: HashMap<String, Arc<dyn NpcLogic>>,
}

impl BehaviorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the stock behaviours.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_use("sign", Arc::new(Sign));
        registry.register_use("door", Arc::new(Door));
        registry.register_use("spawner", Arc::new(Spawner));
        registry.register_logic("blob", Arc::new(Blob));
        registry.register_logic("idle", Arc::new(Idle));
        registry
    }

    pub fn register_use(&mut self, key: impl Into<String>, function: Arc<dyn UseFunction>) {
        self.uses.insert(key.into(), function);
    }

    pub fn register_logic(&mut self, key: impl Into<String>, logic: Arc<dyn NpcLogic>) {
        self.logic.insert(key.into(), logic);
    }

    pub fn use_function(&self, key: &str) -> Option<&Arc<dyn UseFunction>> {
        self.uses.get(key)
    }

    pub fn logic(&self, key: &str) -> Option<&Arc<dyn NpcLogic>> {
        self.logic.get(key)
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut uses: Vec<_> = self.uses.keys().collect();
        let mut logic: Vec<_> = self.logic.keys().collect();
        uses.sort();
        logic.sort();
        f.debug_struct("BehaviorRegistry")
            .field("uses", &uses)
            .field("logic", &logic)
            .finish()
    }
}

/// Shows the entity's `text` field to the user.
#[derive(Debug)]
pub struct Sign;

impl UseFunction for Sign {
    fn apply(
        &self,
        engine: &mut ZoneEngine<'_>,
        entity: EntityId,
        user: PlayerId,
    ) -> Result<(), BehaviorError> {
        let text = engine
            .zone()
            .entities
            .get(&entity)
            .and_then(|sign| sign.field_str("text"))
            .ok_or(BehaviorError::MissingField {
                entity,
                field: "text",
            })?
            .to_owned();
        engine.message(Some(user), text);
        Ok(())
    }
}

/// Sends the user to the zone named by `zone`, at `x`,`y` when both are set.
#[derive(Debug)]
pub struct Door;

impl UseFunction for Door {
    fn apply(
        &self,
        engine: &mut ZoneEngine<'_>,
        entity: EntityId,
        user: PlayerId,
    ) -> Result<(), BehaviorError> {
        let door = engine
            .zone()
            .entities
            .get(&entity)
            .ok_or(BehaviorError::MissingField {
                entity,
                field: "zone",
            })?;
        let zone = door
            .field_str("zone")
            .ok_or(BehaviorError::MissingField {
                entity,
                field: "zone",
            })?
            .to_owned();
        let position = match (door.field_int("x"), door.field_int("y")) {
            (Some(x), Some(y)) => Position::from_params(x, y),
            _ => None,
        };
        engine.transfer(user, ZoneRef::Name(zone), position);
        Ok(())
    }
}

/// Spawns the NPC named by `npc` next to the entity.
#[derive(Debug)]
pub struct Spawner;

impl UseFunction for Spawner {
    fn apply(
        &self,
        engine: &mut ZoneEngine<'_>,
        entity: EntityId,
        _user: PlayerId,
    ) -> Result<(), BehaviorError> {
        let spawner = engine.zone().entities.get(&entity).ok_or(BehaviorError::MissingField {
            entity,
            field: "npc",
        })?;
        let origin = spawner.position;
        let kind = spawner
            .field_str("npc")
            .ok_or(BehaviorError::MissingField {
                entity,
                field: "npc",
            })?
            .to_owned();
        let cell = engine
            .zone()
            .free_neighbour(origin)
            .ok_or(BehaviorError::NoFreeCell(origin))?;
        engine.spawn_npc(&kind, None, cell)?;
        Ok(())
    }
}

/// Hits an adjacent player, otherwise shuffles one cell in a random direction.
#[derive(Debug)]
pub struct Blob;

impl NpcLogic for Blob {
    fn take_turn(&self, engine: &mut ZoneEngine<'_>, npc: NpcId) -> Result<(), BehaviorError> {
        let Some(position) = engine.zone().npcs.get(&npc).map(|npc| npc.position) else {
            return Ok(());
        };
        let prey = engine
            .zone()
            .players
            .values()
            .find(|player| player.position.is_adjacent(position))
            .map(|player| player.id);

        match prey {
            Some(player) => {
                engine.melee(CombatantId::Npc(npc), CombatantId::Player(player));
            }
            None => {
                let roll = engine.roll(Direction::ALL.len() as u32) as usize;
                if let Some(direction) = Direction::ALL.get(roll)
                    && let Some(target) = position.step(*direction)
                {
                    engine.move_npc(npc, target);
                }
            }
        }
        Ok(())
    }
}

/// Passes every turn.
#[derive(Debug)]
pub struct Idle;

impl NpcLogic for Idle {
    fn take_turn(&self, _engine: &mut ZoneEngine<'_>, _npc: NpcId) -> Result<(), BehaviorError> {
        Ok(())
    }
}
