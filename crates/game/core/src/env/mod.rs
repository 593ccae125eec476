//! Read-only collaborators of the zone engine.
//!
//! Definitions, behaviour tables and tunables are loaded once at startup and
//! never mutated afterwards. [`GameEnv`] bundles borrowed references to them
//! so the engine can reach everything it needs without owning any of it.
mod definitions;
mod error;
pub(crate) mod rng;

pub use definitions::{
    Alignment, Definitions, EntityDef, EquipSlot, FieldDef, FieldKind, FieldValue, GameDef,
    ItemDef, ItemKind, NpcDef, Size, SpellDef, SpellEffectDef, TileDef, ZoneDef, ZoneEntityDef,
    ZoneInfoDef, ZoneItemDef, ZoneNpcDef,
};
pub use error::DefinitionError;
pub use rng::{PcgRng, RngOracle, RollStream, Roller, compute_seed};

use crate::config::GameConfig;
use crate::engine::BehaviorRegistry;

/// Borrowed view of every read-only collaborator.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    pub defs: &'a Definitions,
    pub behaviors: &'a BehaviorRegistry,
    pub config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        defs: &'a Definitions,
        behaviors: &'a BehaviorRegistry,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            defs,
            behaviors,
            config,
        }
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("zones", &self.defs.zones.len())
            .field("behaviors", self.behaviors)
            .field("config", self.config)
            .finish()
    }
}
