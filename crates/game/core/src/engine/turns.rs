//! Combat membership, turn hand-over and the per-tick combat driver.

use tracing::{debug, info, warn};

use super::ZoneEngine;
use crate::combat::CombatantId;
use crate::params::ActionParams;
use crate::sequence::StepAction;
use crate::state::{NpcId, PlayerId, ZoneFields};

impl ZoneEngine<'_> {
    /// True if `player` may act right now.
    ///
    /// Outside combat anyone may act. In combat only the current combatant
    /// may, and only once playback and the announcement delay are over.
    pub fn can_act(&self, player: PlayerId) -> bool {
        let combat = &self.zone.combat;
        !combat.in_combat
            || (!self.zone.sequence.is_playing()
                && combat.delay == 0
                && combat.current() == Some(CombatantId::Player(player)))
    }

    /// Runs after every accepted player action.
    ///
    /// Outside combat it only settles deaths. Only an action taken by the
    /// current combatant advances combat; an action that itself started the
    /// fight leaves the fresh turn alone.
    pub(crate) fn post_player_action(&mut self, player: PlayerId) {
        if !self.zone.combat.in_combat {
            self.check_alive();
            return;
        }
        let combat = &self.zone.combat;
        if combat.in_combat
            && combat.delay == 0
            && combat.current() == Some(CombatantId::Player(player))
        {
            self.post_combat_action();
        }
    }

    /// Lets the current combatant spend its action, settles deaths and
    /// membership, then hands the turn on if it is over.
    pub(crate) fn post_combat_action(&mut self) {
        let Some(current) = self.zone.combat.current() else {
            return;
        };
        match current {
            CombatantId::Player(_) => {
                if let Some(entry) = self.zone.combat.queue.entry_mut(current) {
                    entry.timer -= 1;
                }
            }
            CombatantId::Npc(npc) => self.run_npc_logic(npc),
        }

        self.check_alive();
        self.check_combat();

        if self.zone.combat.in_combat
            && self.zone.combat.current() == Some(current)
            && self.is_turn_over(current)
        {
            self.next_combatant();
        }
    }

    fn run_npc_logic(&mut self, npc: NpcId) {
        let Some(key) = self.zone.npcs.get(&npc).map(|npc| npc.logic.clone()) else {
            return;
        };
        let behaviors = self.env.behaviors;
        let Some(logic) = behaviors.logic(&key) else {
            warn!(target: "game::combat", zone = %self.zone.id, npc = %npc, logic = %key, "unknown npc logic");
            return;
        };
        if let Err(error) = logic.take_turn(self, npc) {
            warn!(target: "game::combat", zone = %self.zone.id, npc = %npc, %error, "npc turn failed");
        }
    }

    /// Players end their turn when out of AP or time; NPCs after one action.
    fn is_turn_over(&self, combatant: CombatantId) -> bool {
        match combatant {
            CombatantId::Player(id) => {
                let timed_out = self
                    .zone
                    .combat
                    .queue
                    .entry(combatant)
                    .is_none_or(|entry| entry.timer <= 0);
                timed_out || self.zone.players.get(&id).is_none_or(|player| player.ap <= 0)
            }
            CombatantId::Npc(_) => true,
        }
    }

    pub(crate) fn next_combatant(&mut self) {
        let Some(next) = self.zone.combat.queue.advance() else {
            return;
        };
        self.new_turn(next);
        self.zone.combat.add_delay(self.env.config.next_turn_delay);
        self.mark(ZoneFields::COMBAT);
        debug!(
            target: "game::combat",
            zone = %self.zone.id,
            combatant = %next,
            turn = self.zone.combat.turn(),
            "turn passed"
        );
    }

    /// Players get a full AP refill and a fresh turn timer.
    fn new_turn(&mut self, combatant: CombatantId) {
        let CombatantId::Player(id) = combatant else {
            return;
        };
        if let Some(player) = self.zone.players.get_mut(&id) {
            player.ap = player.stats.max_ap;
            self.changes.mark_player(id);
        }
        let timeout = self.env.config.turn_timeout;
        if let Some(entry) = self.zone.combat.queue.entry_mut(combatant) {
            entry.timer = timeout;
        }
    }

    /// Enters combat with the given initiatives.
    ///
    /// The highest initiative takes the first turn after the start delay.
    pub fn begin_combat(&mut self, initiatives: impl IntoIterator<Item = (CombatantId, i64)>) {
        let config = self.env.config;
        let combat = &mut self.zone.combat;
        combat.in_combat = true;
        combat.delay = 0;
        combat.queue.start(initiatives, config.tie_break_probes);
        if let Some(first) = combat.current() {
            self.new_turn(first);
        }
        self.zone.combat.add_delay(config.combat_start_delay);
        self.mark(ZoneFields::COMBAT);
    }

    fn start_combat(&mut self) {
        let mut combatants: Vec<(CombatantId, i64)> = self
            .zone
            .players
            .values()
            .map(|player| (CombatantId::Player(player.id), i64::from(player.stats.speed)))
            .collect();
        combatants.extend(
            self.zone
                .npcs
                .keys()
                .map(|id| (CombatantId::Npc(*id), 0)),
        );

        let config = self.env.config;
        let initiatives: Vec<(CombatantId, i64)> = combatants
            .into_iter()
            .map(|(id, speed)| {
                let roll = i64::from(self.roll(config.initiative_roll));
                (id, roll + speed * config.speed_initiative_bonus)
            })
            .collect();
        self.begin_combat(initiatives);
    }

    /// Recomputes whether the zone is fighting and keeps the turn queue in
    /// step with its residents.
    pub fn check_combat(&mut self) {
        let was = self.zone.combat.in_combat;
        let now = !self.zone.players.is_empty() && self.zone.has_hostiles();

        match (was, now) {
            (false, true) => {
                info!(target: "game::combat", zone = %self.zone.id, "zone entering combat");
                self.start_combat();
            }
            (true, false) => {
                info!(target: "game::combat", zone = %self.zone.id, "zone leaving combat");
                self.zone.combat.reset();
                self.mark(ZoneFields::COMBAT);
            }
            (true, true) => self.sync_combatants(),
            (false, false) => {}
        }
    }

    /// Drops departed combatants and appends newcomers at the back.
    fn sync_combatants(&mut self) {
        let present: Vec<CombatantId> = self
            .zone
            .players
            .keys()
            .map(|id| CombatantId::Player(*id))
            .chain(self.zone.npcs.keys().map(|id| CombatantId::Npc(*id)))
            .collect();

        let current = self.zone.combat.current();
        let mut changed = false;
        let mut lost_current = false;
        for id in self.zone.combat.queue.ids() {
            if !present.contains(&id) {
                self.zone.combat.queue.remove(id);
                changed = true;
                lost_current |= current == Some(id);
            }
        }
        for id in present {
            if let Some(initiative) = self.zone.combat.queue.insert_late(id) {
                debug!(target: "game::combat", zone = %self.zone.id, combatant = %id, initiative, "late combatant");
                changed = true;
            }
        }

        if changed {
            self.mark(ZoneFields::COMBAT);
        }
        if lost_current {
            debug!(target: "game::combat", zone = %self.zone.id, "current combatant left");
            self.next_combatant();
        }
    }

    pub(crate) fn combat_tick(&mut self) {
        if self.zone.combat.queue.is_empty() {
            return;
        }
        self.mark(ZoneFields::COMBAT);

        if self.play_sequence() {
            return;
        }
        if !self.zone.combat.in_combat {
            return;
        }
        if self.zone.combat.delay > 0 {
            self.zone.combat.delay -= 1;
            return;
        }
        self.post_combat_action();
    }

    /// Plays one tick of the zone's sequence, resolving the steps that came
    /// due. Returns true while playback holds the tick.
    pub(crate) fn play_sequence(&mut self) -> bool {
        let mut due = Vec::new();
        let busy = self.zone.sequence.tick(&mut due);
        if !due.is_empty() {
            self.apply_steps(due);
            self.check_alive();
            self.check_combat();
        }
        busy
    }

    fn apply_steps(&mut self, steps: Vec<StepAction>) {
        for step in steps {
            match step {
                StepAction::Damage {
                    target,
                    damage,
                    source,
                } => {
                    self.apply_damage(target, damage, source);
                }
                StepAction::Animation { name, target } => {
                    let Some(position) = self.combatant_position(target) else {
                        continue;
                    };
                    self.effect(
                        name,
                        ActionParams::new()
                            .with("x", i64::from(position.x))
                            .with("y", i64::from(position.y)),
                    );
                }
                StepAction::Effect { name, position, .. } => {
                    self.effect(
                        name,
                        ActionParams::new()
                            .with("x", i64::from(position.x))
                            .with("y", i64::from(position.y)),
                    );
                }
            }
        }
    }

    /// Kills every resident at or below 0 HP.
    pub(crate) fn check_alive(&mut self) {
        let dead_npcs: Vec<_> = self
            .zone
            .npcs
            .values()
            .filter(|npc| npc.hp <= 0)
            .map(|npc| npc.id)
            .collect();
        let dead_players: Vec<_> = self
            .zone
            .players
            .values()
            .filter(|player| player.hp <= 0)
            .map(|player| player.id)
            .collect();

        for npc in dead_npcs {
            self.kill_npc(npc);
        }
        for player in dead_players {
            self.kill_player(player);
        }
    }
}
