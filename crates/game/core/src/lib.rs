//! Zone simulation and turn-based combat rules.
//!
//! `game-core` is pure and synchronous: stats and damage, collision, the
//! initiative queue, effect playback, and the zone engine that ties them
//! together. All zone mutation flows through [`engine::ZoneEngine`]; the
//! runtime drives it from a single worker and persists what the
//! [`state::ChangeSet`] reports.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod params;
pub mod sequence;
pub mod state;
pub mod stats;

pub use action::ActionKind;
pub use combat::{CombatState, CombatantId, DamageInfo, DamageKind, InitiativeQueue};
pub use config::{ActionCosts, GameConfig};
pub use engine::{
    ActionRejected, BehaviorError, BehaviorRegistry, NpcLogic, UseFunction, ZoneEngine, ZoneEvent,
    ZoneRef,
};
pub use env::{DefinitionError, Definitions, GameEnv, RollStream, Roller};
pub use params::{ActionParams, ParamValue};
pub use sequence::{Sequence, Step, StepAction};
pub use state::{
    ChangeSet, Direction, Entity, EntityId, Item, ItemId, ItemState, Notice, Npc, NpcId, Player,
    PlayerDetail, PlayerId, Position, WorldState, Zone, ZoneFields, ZoneId, ZoneSnapshot,
};
pub use stats::{Skill, SkillBlock, SkillKind, StatBlock};
