//! Initiative-ordered turn queue.
//!
//! Combatants are visited in strictly descending initiative. Every entry holds
//! a unique initiative value, so the order is total and stable. The cursor
//! remembers the initiative of the current holder even after it has left, which
//! lets the queue resume from the right place.

use std::collections::BTreeMap;

use crate::state::{NpcId, PlayerId};

/// A participant in a zone's turn order, indexed by kind and id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "id", rename_all = "lowercase"))]
pub enum CombatantId {
    Player(PlayerId),
    Npc(NpcId),
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatantId::Player(id) => write!(f, "player{id}"),
            CombatantId::Npc(id) => write!(f, "npc{id}"),
        }
    }
}

/// Per-combatant bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatEntry {
    pub initiative: i64,
    /// Remaining ticks before a player's turn times out.
    pub timer: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitiativeQueue {
    entries: BTreeMap<CombatantId, CombatEntry>,
    order: BTreeMap<i64, CombatantId>,
    current: Option<CombatantId>,
    cursor: i64,
    turn: u32,
}

impl InitiativeQueue {
    /// Rebuilds the queue from freshly rolled initiatives.
    ///
    /// The highest initiative holds the first turn and the turn counter
    /// restarts at 1.
    pub fn start(&mut self, rolls: impl IntoIterator<Item = (CombatantId, i64)>, probes: u32) {
        self.entries.clear();
        self.order.clear();
        for (id, initiative) in rolls {
            self.insert(id, initiative, probes);
        }
        self.turn = 1;
        self.current = None;
        if let Some((&initiative, &id)) = self.order.iter().next_back() {
            self.current = Some(id);
            self.cursor = initiative;
        }
    }

    /// Inserts a combatant, resolving collisions by decrementing.
    ///
    /// At most `probes` decrements are tried; past that the combatant goes one
    /// below the current minimum. Returns the initiative actually assigned, or
    /// `None` if the combatant was already queued.
    pub fn insert(&mut self, id: CombatantId, initiative: i64, probes: u32) -> Option<i64> {
        if self.entries.contains_key(&id) {
            return None;
        }
        let mut candidate = initiative;
        let mut tries = 0;
        while self.order.contains_key(&candidate) {
            if tries == probes {
                candidate = self.below_minimum();
                break;
            }
            candidate = candidate.saturating_sub(1);
            tries += 1;
        }
        self.place(id, candidate);
        Some(candidate)
    }

    /// Inserts a late arrival strictly below every queued initiative.
    pub fn insert_late(&mut self, id: CombatantId) -> Option<i64> {
        if self.entries.contains_key(&id) {
            return None;
        }
        let initiative = self.below_minimum();
        self.place(id, initiative);
        Some(initiative)
    }

    /// Removes a combatant. The cursor is kept when the current holder leaves.
    pub fn remove(&mut self, id: CombatantId) -> bool {
        let Some(entry) = self.entries.remove(&id) else {
            return false;
        };
        self.order.remove(&entry.initiative);
        if self.current == Some(id) {
            self.current = None;
        }
        true
    }

    /// Passes the turn to the next lower initiative, wrapping to the highest
    /// and bumping the turn counter when the round is exhausted.
    pub fn advance(&mut self) -> Option<CombatantId> {
        let next = match self.order.range(..self.cursor).next_back() {
            Some((&initiative, &id)) => Some((initiative, id)),
            None => {
                let top = self.order.iter().next_back().map(|(&i, &id)| (i, id));
                if top.is_some() {
                    self.turn += 1;
                }
                top
            }
        };
        match next {
            Some((initiative, id)) => {
                self.cursor = initiative;
                self.current = Some(id);
            }
            None => self.current = None,
        }
        self.current
    }

    pub fn current(&self) -> Option<CombatantId> {
        self.current
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn entry(&self, id: CombatantId) -> Option<&CombatEntry> {
        self.entries.get(&id)
    }

    pub fn entry_mut(&mut self, id: CombatantId) -> Option<&mut CombatEntry> {
        self.entries.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combatants in visiting order (highest initiative first).
    pub fn iter(&self) -> impl Iterator<Item = (CombatantId, i64)> + '_ {
        self.order.iter().rev().map(|(&initiative, &id)| (id, initiative))
    }

    pub fn ids(&self) -> Vec<CombatantId> {
        self.entries.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn below_minimum(&self) -> i64 {
        self.order
            .keys()
            .next()
            .map_or(0, |min| min.saturating_sub(1))
    }

    fn place(&mut self, id: CombatantId, initiative: i64) {
        self.order.insert(initiative, id);
        self.entries.insert(id, CombatEntry { initiative, timer: 0 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32) -> CombatantId {
        CombatantId::Player(PlayerId(id))
    }

    fn npc(id: u32) -> CombatantId {
        CombatantId::Npc(NpcId(id))
    }

    fn visit(queue: &mut InitiativeQueue, steps: usize) -> Vec<CombatantId> {
        (0..steps).filter_map(|_| queue.advance()).collect()
    }

    #[test]
    fn start_gives_unique_initiatives_and_picks_the_highest() {
        let mut queue = InitiativeQueue::default();
        queue.start([(player(1), 50), (npc(1), 50), (npc(2), 50), (player(2), 80)], 64);

        let initiatives: Vec<i64> = queue.iter().map(|(_, i)| i).collect();
        assert_eq!(initiatives, vec![80, 50, 49, 48]);
        assert_eq!(queue.current(), Some(player(2)));
        assert_eq!(queue.turn(), 1);
    }

    #[test]
    fn exhausted_probes_fall_back_below_minimum() {
        let mut queue = InitiativeQueue::default();
        queue.start([(npc(1), 10), (npc(2), 9), (npc(3), 8)], 64);
        assert_eq!(queue.insert(player(1), 10, 1), Some(7));
    }

    #[test]
    fn turn_order_descends_and_wraps() {
        let mut queue = InitiativeQueue::default();
        queue.start([(player(1), 30), (npc(1), 20), (npc(2), 10)], 64);

        assert_eq!(visit(&mut queue, 2), vec![npc(1), npc(2)]);
        assert_eq!(queue.turn(), 1);
        assert_eq!(queue.advance(), Some(player(1)));
        assert_eq!(queue.turn(), 2);
    }

    #[test]
    fn late_arrivals_act_after_everyone_already_queued() {
        let mut queue = InitiativeQueue::default();
        queue.start([(player(1), 30), (npc(1), 20), (npc(2), 10)], 64);

        assert_eq!(queue.insert_late(player(2)), Some(9));
        assert_eq!(visit(&mut queue, 3), vec![npc(1), npc(2), player(2)]);
        assert_eq!(queue.turn(), 1);
        assert_eq!(queue.advance(), Some(player(1)));
        assert_eq!(queue.turn(), 2);
    }

    #[test]
    fn inserting_twice_is_idempotent() {
        let mut queue = InitiativeQueue::default();
        queue.start([(player(1), 30), (npc(1), 20)], 64);

        assert!(queue.insert_late(player(2)).is_some());
        assert_eq!(queue.insert_late(player(2)), None);
        assert_eq!(queue.insert(player(2), 99, 64), None);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn removing_the_current_holder_resumes_below_its_slot() {
        let mut queue = InitiativeQueue::default();
        queue.start([(player(1), 30), (npc(1), 20), (npc(2), 10)], 64);
        queue.advance();
        assert_eq!(queue.current(), Some(npc(1)));

        assert!(queue.remove(npc(1)));
        assert_eq!(queue.current(), None);
        assert_eq!(queue.advance(), Some(npc(2)));
    }

    #[test]
    fn empty_queue_has_no_current() {
        let mut queue = InitiativeQueue::default();
        queue.start(std::iter::empty(), 64);
        assert_eq!(queue.current(), None);
        assert_eq!(queue.advance(), None);
        assert_eq!(queue.turn(), 1);
    }
}
