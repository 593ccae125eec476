//! Combat resolution and per-zone turn bookkeeping.
//!
//! - `damage`: pure damage rolls and defence mitigation
//! - `queue`: the initiative-ordered turn queue
//!
//! [`CombatState`] bundles the queue with the zone-level flags the engine
//! consults on every tick: whether the zone is fighting and how many
//! announcement ticks remain before the current combatant may act.

pub mod damage;
pub mod queue;

pub use damage::{DamageInfo, DamageKind, mitigate, roll_physical};
pub use queue::{CombatEntry, CombatantId, InitiativeQueue};

/// Live turn state of one zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatState {
    pub in_combat: bool,
    /// Ticks to wait before the current combatant may act.
    pub delay: u32,
    pub queue: InitiativeQueue,
}

impl CombatState {
    pub fn add_delay(&mut self, ticks: u32) {
        self.delay = self.delay.saturating_add(ticks);
    }

    pub fn current(&self) -> Option<CombatantId> {
        self.queue.current()
    }

    pub fn turn(&self) -> u32 {
        self.queue.turn()
    }

    /// Drops every combatant and leaves combat.
    pub fn reset(&mut self) {
        self.in_combat = false;
        self.delay = 0;
        self.queue.clear();
    }
}
