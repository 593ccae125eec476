//! Every zone and player the coordinator owns.
//!
//! A player is either resident in exactly one zone or parked (known but not
//! placed). Held items travel with their owner; items loaded for a player
//! who is not in memory yet wait in a stash until that player is admitted.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::{ChangeSet, Item, ItemId, ItemState, Player, PlayerId, Position, Zone, ZoneId};
use crate::engine::{ZoneEngine, ZoneEvent, ZoneRef};
use crate::env::GameEnv;
use crate::params::ActionParams;

/// Zone output the coordinator has to forward to clients.
#[derive(Clone, Debug)]
pub enum Notice {
    Message {
        zone: ZoneId,
        to: Option<PlayerId>,
        text: String,
    },
    Effect {
        zone: ZoneId,
        name: String,
        params: ActionParams,
    },
}

#[derive(Debug, Default)]
pub struct WorldState {
    zones: BTreeMap<ZoneId, Zone>,
    locations: HashMap<PlayerId, ZoneId>,
    parked: BTreeMap<PlayerId, Player>,
    stash: BTreeMap<PlayerId, Vec<Item>>,
    default_zone: Option<ZoneId>,
    pub changes: ChangeSet,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_zone(&mut self, zone: Zone) {
        self.zones.insert(zone.id, zone);
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.get_mut(&id)
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    pub fn zone_ids(&self) -> Vec<ZoneId> {
        self.zones.keys().copied().collect()
    }

    pub fn zone_named(&self, name: &str) -> Option<ZoneId> {
        self.zones
            .values()
            .find(|zone| zone.name == name)
            .map(|zone| zone.id)
    }

    pub fn set_default_zone(&mut self, id: ZoneId) {
        self.default_zone = Some(id);
    }

    pub fn default_zone(&self) -> Option<ZoneId> {
        self.default_zone
    }

    /// Borrows one zone together with the change set.
    pub fn engine<'a>(&'a mut self, id: ZoneId, env: GameEnv<'a>) -> Option<ZoneEngine<'a>> {
        let zone = self.zones.get_mut(&id)?;
        Some(ZoneEngine::new(zone, env, &mut self.changes))
    }

    pub fn location(&self, player: PlayerId) -> Option<ZoneId> {
        self.locations.get(&player).copied()
    }

    /// Zone a player acts in, repairing stale placement.
    ///
    /// Players without a location have not joined and resolve to `None`;
    /// only a join brings a parked player back. A location pointing at a
    /// missing zone is dropped and the player, if parked, is placed in the
    /// default zone.
    pub fn resolve(&mut self, env: GameEnv<'_>, player: PlayerId) -> Option<ZoneId> {
        let zone = self.location(player)?;
        if self.zones.contains_key(&zone) {
            return Some(zone);
        }
        warn!(
            target: "runtime::coordinator",
            player = %player,
            zone = %zone,
            "player recorded in a missing zone"
        );
        self.locations.remove(&player);
        let parked = self.parked.remove(&player)?;
        warn!(target: "runtime::coordinator", player = %player, "placing parked player");
        let zone = self.default_zone;
        self.admit(env, parked, zone, None)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        match self.location(id) {
            Some(zone) => self.zones.get(&zone)?.players.get(&id),
            None => self.parked.get(&id),
        }
    }

    pub fn take_parked(&mut self, id: PlayerId) -> Option<Player> {
        self.parked.remove(&id)
    }

    /// Finds an item wherever it currently lives.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        for zone in self.zones.values() {
            if let Some(item) = zone.items.get(&id) {
                return Some(item);
            }
            if let Some(item) = zone
                .players
                .values()
                .find_map(|player| player.inventory.get(&id))
            {
                return Some(item);
            }
        }
        self.parked
            .values()
            .find_map(|player| player.inventory.get(&id))
            .or_else(|| {
                self.stash
                    .values()
                    .flatten()
                    .find(|item| item.id == id)
            })
    }

    /// Puts a loaded item where its state says it belongs.
    ///
    /// Ground items in unknown zones are dropped with a warning.
    pub fn place_item(&mut self, item: Item) {
        match item.state {
            ItemState::Ground { zone, .. } => match self.zones.get_mut(&zone) {
                Some(zone) => {
                    zone.items.insert(item.id, item);
                }
                None => warn!(
                    target: "runtime::coordinator",
                    item = %item.id,
                    zone = %zone,
                    "item lies in a missing zone"
                ),
            },
            ItemState::Held { owner, .. } => {
                let holder = match self.location(owner) {
                    Some(zone) => self
                        .zones
                        .get_mut(&zone)
                        .and_then(|zone| zone.players.get_mut(&owner)),
                    None => self.parked.get_mut(&owner),
                };
                match holder {
                    Some(player) => {
                        player.inventory.insert(item.id, item);
                        player.rebuild_stats();
                    }
                    None => self.stash.entry(owner).or_default().push(item),
                }
            }
        }
    }

    /// Places a player in a zone, falling back to the default zone.
    ///
    /// Stashed items are handed over first. Returns the zone the player ended
    /// up in, or `None` (player parked) if there is nowhere to go.
    pub fn admit(
        &mut self,
        env: GameEnv<'_>,
        mut player: Player,
        zone: Option<ZoneId>,
        position: Option<Position>,
    ) -> Option<ZoneId> {
        for item in self.stash.remove(&player.id).unwrap_or_default() {
            player.inventory.insert(item.id, item);
        }
        player.rebuild_stats();

        let requested = zone.or(player.zone);
        let target = match requested {
            Some(id) if self.zones.contains_key(&id) => Some(id),
            Some(id) => {
                warn!(
                    target: "runtime::coordinator",
                    player = %player.id,
                    zone = %id,
                    "stored zone is gone; using the default zone"
                );
                self.default_zone
            }
            None => self.default_zone,
        }
        .filter(|id| self.zones.contains_key(id));

        let id = player.id;
        let Some(target) = target else {
            warn!(target: "runtime::coordinator", player = %id, "no zone to place player in");
            self.parked.insert(id, player);
            return None;
        };
        if let Some(previous) = self.location(id)
            && previous != target
            && let Some(mut engine) = self.engine(previous, env)
        {
            engine.remove_player(id);
        }
        self.parked.remove(&id);
        let mut engine = self.engine(target, env)?;
        engine.add_player(player, position);
        self.locations.insert(id, target);
        Some(target)
    }

    /// Takes a player out of their zone and parks them.
    ///
    /// Returns the zone they left.
    pub fn dismiss(&mut self, env: GameEnv<'_>, player: PlayerId) -> Option<ZoneId> {
        let zone = self.locations.remove(&player)?;
        let removed = self.engine(zone, env)?.remove_player(player)?;
        self.parked.insert(player, removed);
        Some(zone)
    }

    /// Brings a dead player back at the default zone's spawn point.
    pub fn respawn(&mut self, env: GameEnv<'_>, mut player: Player) -> Option<ZoneId> {
        player.restore();
        let id = player.id;
        self.changes.mark_player(id);
        let zone = self.default_zone;
        self.admit(env, player, zone, None)
    }

    /// Resolves transfers and deaths queued by every zone.
    ///
    /// Text and effects are handed back for delivery.
    pub fn settle(&mut self, env: GameEnv<'_>) -> Vec<Notice> {
        let mut notices = Vec::new();
        loop {
            let pending: Vec<(ZoneId, Vec<ZoneEvent>)> = self
                .zones
                .values_mut()
                .filter(|zone| !zone.outbox.is_empty())
                .map(|zone| (zone.id, zone.drain_events()))
                .collect();
            if pending.is_empty() {
                return notices;
            }

            for (zone, events) in pending {
                for event in events {
                    match event {
                        ZoneEvent::Message { to, text } => {
                            notices.push(Notice::Message { zone, to, text });
                        }
                        ZoneEvent::Effect { name, params } => {
                            notices.push(Notice::Effect { zone, name, params });
                        }
                        ZoneEvent::PlayerDied(player) => {
                            self.locations.remove(&player.id);
                            self.respawn(env, *player);
                        }
                        ZoneEvent::Transfer {
                            player,
                            zone: destination,
                            position,
                        } => {
                            self.locations.remove(&player.id);
                            let target = match destination {
                                ZoneRef::Id(id) => Some(id),
                                ZoneRef::Name(name) => self.zone_named(&name),
                            };
                            debug!(
                                target: "runtime::coordinator",
                                player = %player.id,
                                from = %zone,
                                to = ?target,
                                "player transferring"
                            );
                            self.admit(env, *player, target, position);
                        }
                    }
                }
            }
        }
    }
}
