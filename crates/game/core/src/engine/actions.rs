//! Player mutators and damage resolution.
//!
//! Each mutator runs the same gauntlet: validate the target, check the turn,
//! charge AP, apply, mark what changed, then let combat move on.

use tracing::debug;

use super::{ActionRejected, BehaviorError, ZoneEngine};
use crate::combat::{CombatantId, DamageInfo, DamageKind, mitigate, roll_physical};
use crate::env::EquipSlot;
use crate::params::ActionParams;
use crate::sequence::cast_spell;
use crate::state::{
    Direction, EntityId, ItemId, ItemState, NpcId, Player, PlayerId, Position, ZoneFields,
};
use crate::stats::{StatBlock, XpEvent, award_xp};

impl ZoneEngine<'_> {
    fn resident(&self, player: PlayerId) -> Result<&Player, ActionRejected> {
        self.zone
            .players
            .get(&player)
            .ok_or(ActionRejected::NotInZone(player))
    }

    fn ensure_can_act(&self, player: PlayerId) -> Result<(), ActionRejected> {
        if self.can_act(player) {
            Ok(())
        } else {
            Err(ActionRejected::OutOfTurn)
        }
    }

    /// Charges `cost` AP, the single gate every costed action passes.
    ///
    /// Editing players pay nothing. AP is only deducted when enough remains.
    /// Returns the amount actually charged.
    pub fn check_ap_cost(&mut self, player: PlayerId, cost: i32) -> Result<i32, ActionRejected> {
        let resident = self
            .zone
            .players
            .get_mut(&player)
            .ok_or(ActionRejected::NotInZone(player))?;
        if resident.editing {
            return Ok(0);
        }
        if resident.ap < cost {
            return Err(ActionRejected::InsufficientAp {
                cost,
                available: resident.ap,
            });
        }
        resident.ap -= cost;
        if cost != 0 {
            self.changes.mark_player(player);
        }
        Ok(cost)
    }

    pub fn move_player(&mut self, player: PlayerId, direction: Direction) -> Result<(), ActionRejected> {
        let resident = self.resident(player)?;
        let target = resident
            .position
            .step(direction)
            .ok_or(ActionRejected::InvalidParam("direction"))?;
        if !resident.editing && !self.zone.is_free(target) {
            return Err(ActionRejected::Blocked(target));
        }
        self.ensure_can_act(player)?;
        self.check_ap_cost(player, self.env.config.costs.movement)?;

        if let Some(resident) = self.zone.players.get_mut(&player) {
            resident.position = target;
        }
        self.mark(ZoneFields::RESIDENTS);
        self.mark_player(player);
        self.post_player_action(player);
        Ok(())
    }

    pub fn face(&mut self, player: PlayerId, direction: Direction) -> Result<(), ActionRejected> {
        self.resident(player)?;
        self.ensure_can_act(player)?;
        if let Some(resident) = self.zone.players.get_mut(&player) {
            resident.facing = direction;
        }
        self.mark(ZoneFields::RESIDENTS);
        self.mark_player(player);
        Ok(())
    }

    /// Uses an adjacent entity through its use-function, or shows its text.
    pub fn use_entity(&mut self, player: PlayerId, entity: EntityId) -> Result<(), ActionRejected> {
        let position = self.resident(player)?.position;
        let target = self
            .zone
            .entities
            .get(&entity)
            .ok_or(ActionRejected::UnknownEntity(entity))?;
        if !target.is_adjacent(position) {
            return Err(ActionRejected::NotAdjacent);
        }
        if !target.usable {
            return Err(ActionRejected::NotUsable(entity));
        }
        let behaviors = self.env.behaviors;
        let function = match &target.use_func {
            Some(key) => Some(
                behaviors
                    .use_function(key)
                    .ok_or_else(|| BehaviorError::UnknownUseFunction(key.clone()))?,
            ),
            None => None,
        };
        let text = target.use_text.clone();
        self.ensure_can_act(player)?;
        let charged = self.check_ap_cost(player, self.env.config.costs.use_entity)?;

        match function {
            Some(function) => {
                if let Err(error) = function.apply(self, entity, player) {
                    if let Some(resident) = self.zone.players.get_mut(&player) {
                        resident.ap += charged;
                    }
                    return Err(error.into());
                }
            }
            None => {
                if let Some(text) = text {
                    self.message(Some(player), text);
                }
            }
        }
        debug!(target: "game::zone", zone = %self.zone.id, player = %player, entity = %entity, "entity used");
        self.post_player_action(player);
        Ok(())
    }

    pub fn take_item(&mut self, player: PlayerId, item: ItemId) -> Result<(), ActionRejected> {
        let position = self.resident(player)?.position;
        let ground = self
            .zone
            .items
            .get(&item)
            .and_then(|item| item.ground_position())
            .ok_or(ActionRejected::UnknownItem(item))?;
        if !ground.is_adjacent(position) {
            return Err(ActionRejected::NotAdjacent);
        }
        self.ensure_can_act(player)?;
        self.check_ap_cost(player, self.env.config.costs.take_item)?;

        if let (Some(taken), Some(resident)) = (
            self.zone.items.remove(&item),
            self.zone.players.get_mut(&player),
        ) {
            resident.give(taken);
        }
        self.mark(ZoneFields::ITEMS | ZoneFields::RESIDENTS);
        self.mark_item(item);
        self.mark_player(player);
        self.post_player_action(player);
        Ok(())
    }

    /// Equips a held item, first clearing whatever occupies its slot.
    pub fn equip_item(&mut self, player: PlayerId, item: ItemId) -> Result<(), ActionRejected> {
        let held = self
            .resident(player)?
            .inventory
            .get(&item)
            .ok_or(ActionRejected::UnknownItem(item))?;
        let slot = held.kind.slot().ok_or(ActionRejected::NotEquippable(item))?;
        self.ensure_can_act(player)?;
        self.check_ap_cost(player, self.env.config.costs.equip)?;

        if let Some(resident) = self.zone.players.get_mut(&player) {
            if let Some(previous) = resident.equipped(slot).map(|equipped| equipped.id) {
                resident.set_slot(previous, None);
                self.changes.mark_item(previous);
            }
            resident.set_slot(item, Some(slot));
            resident.rebuild_stats();
        }
        self.mark_item(item);
        self.mark_player(player);
        self.mark(ZoneFields::RESIDENTS);
        self.post_player_action(player);
        Ok(())
    }

    pub fn unequip_item(&mut self, player: PlayerId, slot: EquipSlot) -> Result<(), ActionRejected> {
        let item = self
            .resident(player)?
            .equipped(slot)
            .map(|item| item.id)
            .ok_or(ActionRejected::EmptySlot(slot))?;
        self.ensure_can_act(player)?;
        self.check_ap_cost(player, self.env.config.costs.unequip)?;

        if let Some(resident) = self.zone.players.get_mut(&player) {
            resident.set_slot(item, None);
            resident.rebuild_stats();
        }
        self.mark_item(item);
        self.mark_player(player);
        self.mark(ZoneFields::RESIDENTS);
        self.post_player_action(player);
        Ok(())
    }

    /// Puts a held item on the ground under the player.
    pub fn drop_item(&mut self, player: PlayerId, item: ItemId) -> Result<(), ActionRejected> {
        if !self.resident(player)?.inventory.contains_key(&item) {
            return Err(ActionRejected::UnknownItem(item));
        }
        self.ensure_can_act(player)?;
        self.check_ap_cost(player, self.env.config.costs.drop_item)?;

        let zone = self.zone.id;
        if let Some(resident) = self.zone.players.get_mut(&player)
            && let Some(mut dropped) = resident.inventory.remove(&item)
        {
            dropped.state = ItemState::Ground {
                zone,
                position: resident.position,
            };
            resident.rebuild_stats();
            self.zone.items.insert(item, dropped);
        }
        self.mark(ZoneFields::ITEMS | ZoneFields::RESIDENTS);
        self.mark_item(item);
        self.mark_player(player);
        self.post_player_action(player);
        Ok(())
    }

    pub fn attack_melee(&mut self, player: PlayerId, npc: NpcId) -> Result<(), ActionRejected> {
        let position = self.resident(player)?.position;
        let target = self
            .zone
            .npcs
            .get(&npc)
            .ok_or(ActionRejected::UnknownNpc(npc))?;
        if !target.position.is_adjacent(position) {
            return Err(ActionRejected::NotAdjacent);
        }
        self.ensure_can_act(player)?;
        self.check_ap_cost(player, self.env.config.costs.melee)?;

        self.melee(CombatantId::Player(player), CombatantId::Npc(npc));
        self.post_player_action(player);
        Ok(())
    }

    /// Queues a spell's effects on the zone sequence.
    pub fn cast_spell(
        &mut self,
        player: PlayerId,
        spell: &str,
        target: Position,
    ) -> Result<(), ActionRejected> {
        let defs = self.env.defs;
        let caster = self.resident(player)?;
        let def = defs.spell(spell)?;
        if caster.skills.get(def.skill).level < def.level {
            return Err(ActionRejected::SpellLocked(spell.to_owned()));
        }
        self.ensure_can_act(player)?;
        self.check_ap_cost(player, def.cost)?;

        let sequence = cast_spell(
            def,
            CombatantId::Player(player),
            target,
            &self.zone.npc_positions(),
        );
        debug!(
            target: "game::combat",
            zone = %self.zone.id,
            player = %player,
            spell,
            steps = sequence.len(),
            ticks = sequence.total_duration(),
            "spell cast"
        );
        self.zone.sequence.append(sequence);
        self.mark(ZoneFields::COMBAT);
        self.post_player_action(player);
        Ok(())
    }

    /// Rolls and applies a melee hit, announcing it to the zone.
    pub fn melee(&mut self, attacker: CombatantId, defender: CombatantId) -> Option<DamageInfo> {
        let stats = self.combatant_stats(attacker)?;
        let attacker_name = self.combatant_name(attacker)?;
        let defender_name = self.combatant_name(defender)?;
        let position = self.combatant_position(defender)?;

        let raw = roll_physical(&stats, &mut self.zone.rolls);
        let dealt = self.apply_damage(defender, raw, Some(attacker))?;

        let suffix = if dealt.crit { " (CRITICAL)" } else { "" };
        self.message(
            None,
            format!(
                "{attacker_name} attacked {defender_name} for {} damage{suffix}",
                dealt.amount
            ),
        );
        self.effect(
            "wood_ex",
            ActionParams::new()
                .with("x", i64::from(position.x))
                .with("y", i64::from(position.y)),
        );
        self.effect("screen_shake", ActionParams::new().with("x", 8).with("y", 8));
        Some(dealt)
    }

    /// Mitigates and applies damage to a live combatant, awarding XP to any
    /// player involved. Returns `None` if the target is gone.
    pub fn apply_damage(
        &mut self,
        target: CombatantId,
        damage: DamageInfo,
        source: Option<CombatantId>,
    ) -> Option<DamageInfo> {
        let defender_stats = self.combatant_stats(target)?;
        let defender_level = self.combatant_level(target)?;
        let source_level = source.and_then(|source| self.combatant_level(source));
        let dealt = mitigate(&defender_stats, damage);

        match target {
            CombatantId::Player(id) => {
                let player = self.zone.players.get_mut(&id)?;
                player.hp -= dealt.amount;
                if let Some(level) = source_level {
                    let absorbed = damage.amount - dealt.amount;
                    let (event, amount) = match damage.kind {
                        DamageKind::Magic => (XpEvent::MagicDefence, absorbed),
                        DamageKind::Physical if dealt.amount == 0 => (XpEvent::Dodge, damage.amount),
                        DamageKind::Physical => (XpEvent::PhysicalDefence, absorbed),
                    };
                    if award_xp(&mut player.skills, event, level, amount) > 0 {
                        player.rebuild_stats();
                    }
                }
                self.mark_player(id);
                self.mark(ZoneFields::RESIDENTS);
            }
            CombatantId::Npc(id) => {
                self.zone.npcs.get_mut(&id)?.hp -= dealt.amount;
                self.mark(ZoneFields::NPCS);
            }
        }

        if let Some(CombatantId::Player(id)) = source
            && let Some(player) = self.zone.players.get_mut(&id)
        {
            let event = match dealt.kind {
                DamageKind::Physical => XpEvent::PhysicalDamage,
                DamageKind::Magic => XpEvent::MagicDamage,
            };
            if award_xp(&mut player.skills, event, defender_level, dealt.amount) > 0 {
                player.rebuild_stats();
            }
            self.changes.mark_player(id);
        }

        debug!(
            target: "game::combat",
            zone = %self.zone.id,
            combatant = %target,
            amount = dealt.amount,
            crit = dealt.crit,
            "damage applied"
        );
        Some(dealt)
    }

    pub(crate) fn combatant_stats(&self, id: CombatantId) -> Option<StatBlock> {
        match id {
            CombatantId::Player(id) => self.zone.players.get(&id).map(|player| player.stats),
            CombatantId::Npc(id) => self.zone.npcs.get(&id).map(|npc| npc.stats),
        }
    }

    pub(crate) fn combatant_level(&self, id: CombatantId) -> Option<i32> {
        match id {
            CombatantId::Player(id) => self.zone.players.get(&id).map(Player::total_level),
            CombatantId::Npc(id) => self.zone.npcs.get(&id).map(|npc| npc.total_level()),
        }
    }

    pub(crate) fn combatant_name(&self, id: CombatantId) -> Option<String> {
        match id {
            CombatantId::Player(id) => self.zone.players.get(&id).map(|player| player.name.clone()),
            CombatantId::Npc(id) => self.zone.npcs.get(&id).map(|npc| npc.name.clone()),
        }
    }

    pub(crate) fn combatant_position(&self, id: CombatantId) -> Option<Position> {
        match id {
            CombatantId::Player(id) => self.zone.players.get(&id).map(|player| player.position),
            CombatantId::Npc(id) => self.zone.npcs.get(&id).map(|npc| npc.position),
        }
    }
}
