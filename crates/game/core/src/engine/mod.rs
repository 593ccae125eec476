//! Zone simulation: tick loop, player mutators and turn arbitration.
//!
//! A [`ZoneEngine`] borrows one [`Zone`], the read-only [`GameEnv`] and the
//! coordinator's [`ChangeSet`] for the duration of a single operation. Every
//! mutator validates first and mutates second, so a rejected action leaves the
//! zone untouched. Anything the zone cannot resolve itself (deaths, transfers,
//! chat text, visual effects) is queued on the zone's outbox as a
//! [`ZoneEvent`].
//!
//! - `turns`: combat membership, initiative and turn hand-over
//! - `actions`: player mutators and melee/damage resolution
//! - `edit`: admin-only world editing
//! - `spawn`: NPC/entity creation, death and removal
//! - `behaviors`: entity use-functions and NPC logic tables

mod actions;
mod behaviors;
mod edit;
mod errors;
mod events;
mod spawn;
mod turns;

pub use behaviors::{BehaviorRegistry, Blob, Door, Idle, NpcLogic, Sign, Spawner, UseFunction};
pub use errors::{ActionRejected, BehaviorError};
pub use events::{ZoneEvent, ZoneRef};

use tracing::debug;

use crate::action::ActionKind;
use crate::env::{EquipSlot, GameEnv, Roller};
use crate::params::ActionParams;
use crate::state::{
    ChangeSet, Direction, EntityId, ItemId, NpcId, Player, PlayerId, Position, Zone, ZoneFields,
};

pub struct ZoneEngine<'a> {
    zone: &'a mut Zone,
    env: GameEnv<'a>,
    changes: &'a mut ChangeSet,
}

impl<'a> ZoneEngine<'a> {
    pub fn new(zone: &'a mut Zone, env: GameEnv<'a>, changes: &'a mut ChangeSet) -> Self {
        Self { zone, env, changes }
    }

    pub fn zone(&self) -> &Zone {
        self.zone
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    pub fn mark(&mut self, fields: ZoneFields) {
        self.changes.mark_zone(self.zone.id, fields);
    }

    pub fn mark_player(&mut self, player: PlayerId) {
        self.changes.mark_player(player);
    }

    pub fn mark_item(&mut self, item: ItemId) {
        self.changes.mark_item(item);
    }

    /// Queues chat text for one player, or everyone in the zone.
    pub fn message(&mut self, to: Option<PlayerId>, text: impl Into<String>) {
        self.zone.outbox.push(ZoneEvent::Message {
            to,
            text: text.into(),
        });
    }

    pub fn effect(&mut self, name: impl Into<String>, params: ActionParams) {
        self.zone.outbox.push(ZoneEvent::Effect {
            name: name.into(),
            params,
        });
    }

    /// Uniform roll in `0..n` from the zone's stream.
    pub fn roll(&mut self, n: u32) -> u32 {
        self.zone.rolls.below(n)
    }

    pub fn rebuild_collision(&mut self) {
        self.zone.rebuild_collision();
    }

    /// Re-derives resident stats, the collision map and combat membership.
    pub fn refresh(&mut self) {
        for player in self.zone.players.values_mut() {
            player.rebuild_stats();
        }
        self.zone.rebuild_collision();
        self.check_combat();
    }

    /// Places a player in the zone.
    ///
    /// The requested cell is used when it is free; otherwise the zone spawn,
    /// or the first free cell next to it. Adding a resident twice is a no-op.
    pub fn add_player(&mut self, mut player: Player, position: Option<Position>) {
        if self.zone.players.contains_key(&player.id) {
            return;
        }
        let spawn = self.zone.spawn;
        player.position = position
            .filter(|cell| self.zone.is_free(*cell))
            .or_else(|| self.zone.is_free(spawn).then_some(spawn))
            .or_else(|| self.zone.free_neighbour(spawn))
            .unwrap_or(spawn);
        player.zone = Some(self.zone.id);
        player.rebuild_stats();

        let id = player.id;
        debug!(
            target: "game::zone",
            zone = %self.zone.id,
            player = %id,
            position = %player.position,
            "player entered"
        );
        self.zone.players.insert(id, player);
        self.mark(ZoneFields::RESIDENTS);
        self.mark_player(id);
        self.check_combat();
    }

    /// Detaches a player and re-evaluates combat membership.
    pub fn remove_player(&mut self, player: PlayerId) -> Option<Player> {
        let removed = self.detach_player(player)?;
        self.check_combat();
        Some(removed)
    }

    fn detach_player(&mut self, player: PlayerId) -> Option<Player> {
        let removed = self.zone.players.remove(&player)?;
        debug!(target: "game::zone", zone = %self.zone.id, player = %player, "player left");
        self.mark(ZoneFields::RESIDENTS);
        self.mark_player(player);
        Some(removed)
    }

    /// Moves a player out of this zone towards another one.
    pub fn transfer(&mut self, player: PlayerId, zone: ZoneRef, position: Option<Position>) -> bool {
        let Some(removed) = self.detach_player(player) else {
            return false;
        };
        self.zone.outbox.push(ZoneEvent::Transfer {
            player: Box::new(removed),
            zone,
            position,
        });
        self.check_combat();
        true
    }

    /// Advances the zone by one tick.
    ///
    /// In combat this drives playback, the announcement delay and the
    /// current combatant. Otherwise any lingering playback is finished and
    /// residents regenerate.
    pub fn tick(&mut self) {
        if self.zone.combat.in_combat {
            self.combat_tick();
            return;
        }

        if self.zone.sequence.is_playing() {
            self.play_sequence();
            if self.zone.combat.in_combat {
                return;
            }
        }
        self.regen();
    }

    fn regen(&mut self) {
        let config = self.env.config;
        let changed: Vec<PlayerId> = self
            .zone
            .players
            .values_mut()
            .filter_map(|player| player.regen(config).then_some(player.id))
            .collect();
        if changed.is_empty() {
            return;
        }
        for player in changed {
            self.mark_player(player);
        }
        self.mark(ZoneFields::RESIDENTS);
    }

    /// Parses `params` for `kind` and runs the matching mutator.
    pub fn perform(
        &mut self,
        player: PlayerId,
        kind: ActionKind,
        params: &ActionParams,
    ) -> Result<(), ActionRejected> {
        match kind {
            ActionKind::Move => self.move_player(player, direction(params)?),
            ActionKind::Face => self.face(player, direction(params)?),
            ActionKind::Use => {
                let entity = id_param(params, "id", EntityId::from_param)?;
                self.use_entity(player, entity)
            }
            ActionKind::TakeItem => self.take_item(player, id_param(params, "id", ItemId::from_param)?),
            ActionKind::EquipItem => {
                self.equip_item(player, id_param(params, "id", ItemId::from_param)?)
            }
            ActionKind::UnequipItem => {
                let slot = params
                    .get_string("slot")
                    .ok_or(ActionRejected::MissingParam("slot"))?
                    .parse::<EquipSlot>()
                    .map_err(|_| ActionRejected::InvalidParam("slot"))?;
                self.unequip_item(player, slot)
            }
            ActionKind::DropItem => self.drop_item(player, id_param(params, "id", ItemId::from_param)?),
            ActionKind::Attack => {
                match params
                    .get_string("mode")
                    .ok_or(ActionRejected::MissingParam("mode"))?
                {
                    "melee" => {
                        self.attack_melee(player, id_param(params, "id", NpcId::from_param)?)
                    }
                    "spell" => {
                        let spell = params
                            .get_string("spell")
                            .ok_or(ActionRejected::MissingParam("spell"))?;
                        self.cast_spell(player, spell, position_param(params)?)
                    }
                    _ => Err(ActionRejected::InvalidParam("mode")),
                }
            }
            ActionKind::Edit => self.edit(player, params),
            ActionKind::Join | ActionKind::Leave => {
                Err(ActionRejected::Unsupported(kind.to_string()))
            }
        }
    }
}

fn direction(params: &ActionParams) -> Result<Direction, ActionRejected> {
    params
        .get_string("direction")
        .ok_or(ActionRejected::MissingParam("direction"))?
        .parse()
        .map_err(|_| ActionRejected::InvalidParam("direction"))
}

pub(crate) fn id_param<T>(
    params: &ActionParams,
    key: &'static str,
    parse: impl FnOnce(i64) -> Option<T>,
) -> Result<T, ActionRejected> {
    let raw = params
        .get_int(key)
        .ok_or(ActionRejected::MissingParam(key))?;
    parse(raw).ok_or(ActionRejected::InvalidParam(key))
}

pub(crate) fn position_param(params: &ActionParams) -> Result<Position, ActionRejected> {
    let x = params.get_int("x").ok_or(ActionRejected::MissingParam("x"))?;
    let y = params.get_int("y").ok_or(ActionRejected::MissingParam("y"))?;
    Position::from_params(x, y).ok_or(ActionRejected::InvalidParam("x"))
}

#[cfg(test)]
pub(crate) mod tests;
