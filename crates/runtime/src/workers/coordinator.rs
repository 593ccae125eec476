//! Coordinator worker: the sole owner of mutable world state.
//!
//! Commands are drained one at a time from an unbounded queue. Each client
//! message or tick is one processing pass: dispatch, settle cross-zone
//! hand-offs, broadcast what changed, then commit dirty records.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info, warn};

use game_core::{
    ActionKind, ActionParams, BehaviorRegistry, ChangeSet, Definitions, GameConfig, GameEnv,
    Notice, Player, PlayerDetail, PlayerId, WorldState, ZoneId, ZoneSnapshot,
};

use super::Stores;
use crate::messages::{IncomingMessage, OutgoingKind, OutgoingMessage};
use crate::repository::CommitReport;

/// Commands accepted by the coordinator.
pub enum Command {
    /// A client message.
    Message(IncomingMessage),
    /// Advance every zone by one tick.
    Tick,
    ZoneSnapshot {
        zone: ZoneId,
        reply: oneshot::Sender<Option<ZoneSnapshot>>,
    },
    ZoneNamed {
        name: String,
        reply: oneshot::Sender<Option<ZoneId>>,
    },
    PlayerDetail {
        player: PlayerId,
        reply: oneshot::Sender<Option<PlayerDetail>>,
    },
    /// Commit everything still dirty and report the outcome.
    Flush { reply: oneshot::Sender<CommitReport> },
    /// Commit, then stop the worker.
    Shutdown { reply: oneshot::Sender<CommitReport> },
}

pub struct Coordinator {
    world: WorldState,
    defs: Arc<Definitions>,
    behaviors: Arc<BehaviorRegistry>,
    config: GameConfig,
    stores: Stores,
    command_rx: mpsc::UnboundedReceiver<Command>,
    outgoing_tx: broadcast::Sender<OutgoingMessage>,
}

impl Coordinator {
    pub fn new(
        world: WorldState,
        defs: Arc<Definitions>,
        behaviors: Arc<BehaviorRegistry>,
        config: GameConfig,
        stores: Stores,
        command_rx: mpsc::UnboundedReceiver<Command>,
        outgoing_tx: broadcast::Sender<OutgoingMessage>,
    ) -> Self {
        Self {
            world,
            defs,
            behaviors,
            config,
            stores,
            command_rx,
            outgoing_tx,
        }
    }

    /// Main worker loop. Ends on `Shutdown` or once every sender is gone.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            if let Some(reply) = self.handle_command(command) {
                let report = self.commit(ChangeSet::default());
                info!(target: "runtime::coordinator", saved = report.saved, failed = report.failed, "coordinator stopped");
                if reply.send(report).is_err() {
                    debug!(target: "runtime::coordinator", "Shutdown reply channel closed (caller dropped)");
                }
                return;
            }
        }
        let report = self.commit(ChangeSet::default());
        info!(target: "runtime::coordinator", saved = report.saved, failed = report.failed, "command channel closed; coordinator stopped");
    }

    /// Handles one command, handing back the reply slot on shutdown.
    fn handle_command(&mut self, command: Command) -> Option<oneshot::Sender<CommitReport>> {
        match command {
            Command::Message(message) => {
                self.handle_message(message);
                self.finish_pass();
            }
            Command::Tick => {
                self.tick_zones();
                self.finish_pass();
            }
            Command::ZoneSnapshot { zone, reply } => {
                let snapshot = self.world.zone(zone).map(|zone| zone.snapshot(&self.defs));
                if reply.send(snapshot).is_err() {
                    debug!(target: "runtime::coordinator", "ZoneSnapshot reply channel closed (caller dropped)");
                }
            }
            Command::ZoneNamed { name, reply } => {
                if reply.send(self.world.zone_named(&name)).is_err() {
                    debug!(target: "runtime::coordinator", "ZoneNamed reply channel closed (caller dropped)");
                }
            }
            Command::PlayerDetail { player, reply } => {
                let detail = self
                    .world
                    .player(player)
                    .map(|player| PlayerDetail::new(player, &self.defs));
                if reply.send(detail).is_err() {
                    debug!(target: "runtime::coordinator", "PlayerDetail reply channel closed (caller dropped)");
                }
            }
            Command::Flush { reply } => {
                let report = self.commit(ChangeSet::default());
                if reply.send(report).is_err() {
                    debug!(target: "runtime::coordinator", "Flush reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => return Some(reply),
        }
        None
    }

    fn handle_message(&mut self, message: IncomingMessage) {
        let IncomingMessage {
            player,
            action,
            params,
        } = message;
        match action {
            ActionKind::Join => self.join(player, &params),
            ActionKind::Leave => self.leave(player),
            _ => self.act(player, action, &params),
        }
    }

    /// Places a player, loading their record or creating a fresh character.
    fn join(&mut self, player: PlayerId, params: &ActionParams) {
        if let Some(zone) = self.world.location(player) {
            debug!(target: "runtime::coordinator", player = %player, zone = %zone, "already joined");
            self.world.changes.mark_player(player);
            return;
        }

        let stored = match self.world.take_parked(player) {
            Some(parked) => Some(parked),
            None => match self.stores.players.get(player) {
                Ok(stored) => stored,
                Err(error) => {
                    warn!(
                        target: "runtime::store",
                        player = %player,
                        error = %error,
                        "player record unreadable; join refused"
                    );
                    return;
                }
            },
        };
        let (record, position) = match stored {
            Some(record) => {
                let position = record.position;
                (record, Some(position))
            }
            None => {
                let name = params
                    .get_string("name")
                    .filter(|name| !name.is_empty())
                    .map_or_else(|| format!("Player {}", player.0), str::to_owned);
                info!(target: "runtime::coordinator", player = %player, name = %name, "new player");
                self.stores.players.set_dirty(player);
                (Player::new(player, name), None)
            }
        };

        let env = GameEnv::new(&self.defs, &self.behaviors, &self.config);
        let zone = self.world.admit(env, record, None, position);
        info!(target: "runtime::coordinator", player = %player, zone = ?zone, "player joined");
    }

    fn leave(&mut self, player: PlayerId) {
        let env = GameEnv::new(&self.defs, &self.behaviors, &self.config);
        match self.world.dismiss(env, player) {
            Some(zone) => {
                info!(target: "runtime::coordinator", player = %player, zone = %zone, "player left")
            }
            None => debug!(target: "runtime::coordinator", player = %player, "leave from a player not in any zone"),
        }
    }

    fn act(&mut self, player: PlayerId, action: ActionKind, params: &ActionParams) {
        let env = GameEnv::new(&self.defs, &self.behaviors, &self.config);
        let Some(zone) = self.world.resolve(env, player) else {
            debug!(target: "runtime::coordinator", player = %player, action = %action, "action from a player who has not joined");
            return;
        };
        let Some(mut engine) = self.world.engine(zone, env) else {
            return;
        };
        if let Err(reason) = engine.perform(player, action, params) {
            debug!(
                target: "runtime::coordinator",
                player = %player,
                zone = %zone,
                action = %action,
                reason = %reason,
                "action dropped"
            );
        }
        engine.refresh();
    }

    fn tick_zones(&mut self) {
        let env = GameEnv::new(&self.defs, &self.behaviors, &self.config);
        for zone in self.world.zone_ids() {
            if let Some(mut engine) = self.world.engine(zone, env) {
                engine.tick();
            }
        }
    }

    /// Settles hand-offs, then broadcasts and commits the pass's changes.
    fn finish_pass(&mut self) {
        let env = GameEnv::new(&self.defs, &self.behaviors, &self.config);
        let notices = self.world.settle(env);
        for notice in notices {
            self.publish_notice(notice);
        }

        let changes = self.world.changes.take();
        self.broadcast(&changes);
        self.commit(changes);
    }

    fn residents(&self, zone: ZoneId) -> Vec<PlayerId> {
        self.world
            .zone(zone)
            .map(|zone| zone.players.keys().copied().collect())
            .unwrap_or_default()
    }

    fn publish(&self, message: OutgoingMessage) {
        if message.recipients.is_empty() {
            return;
        }
        // No subscribers simply means no connected transport.
        let _ = self.outgoing_tx.send(message);
    }

    fn publish_notice(&self, notice: Notice) {
        let message = match notice {
            Notice::Message { zone, to, text } => OutgoingMessage {
                zone: Some(zone),
                recipients: to.map_or_else(|| self.residents(zone), |player| vec![player]),
                kind: OutgoingKind::ChatMessage,
                params: json!({ "text": text }),
            },
            Notice::Effect { zone, name, params } => OutgoingMessage {
                zone: Some(zone),
                recipients: self.residents(zone),
                kind: OutgoingKind::PlayEffect,
                params: json!({ "name": name, "params": params }),
            },
        };
        self.publish(message);
    }

    /// Sends zone snapshots and private player views for everything changed.
    fn broadcast(&self, changes: &ChangeSet) {
        for (&zone, fields) in &changes.zones {
            if fields.is_empty() {
                continue;
            }
            let Some(current) = self.world.zone(zone) else {
                continue;
            };
            match serde_json::to_value(current.snapshot(&self.defs)) {
                Ok(params) => self.publish(OutgoingMessage {
                    zone: Some(zone),
                    recipients: self.residents(zone),
                    kind: OutgoingKind::StateUpdate,
                    params,
                }),
                Err(error) => {
                    error!(target: "runtime::coordinator", zone = %zone, error = %error, "zone snapshot not serialisable")
                }
            }
        }

        for &player in &changes.players {
            let Some(zone) = self.world.location(player) else {
                continue;
            };
            let Some(current) = self.world.player(player) else {
                continue;
            };
            match serde_json::to_value(PlayerDetail::new(current, &self.defs)) {
                Ok(params) => self.publish(OutgoingMessage {
                    zone: Some(zone),
                    recipients: vec![player],
                    kind: OutgoingKind::PlayerUpdate,
                    params,
                }),
                Err(error) => {
                    error!(target: "runtime::coordinator", player = %player, error = %error, "player view not serialisable")
                }
            }
        }
    }

    /// Marks `changes` dirty in the stores and flushes every store.
    fn commit(&mut self, changes: ChangeSet) -> CommitReport {
        for (&zone, fields) in &changes.zones {
            if fields.needs_save() {
                self.stores.zones.set_dirty(zone);
            }
        }
        for &player in &changes.players {
            self.stores.players.set_dirty(player);
        }
        for &item in &changes.items {
            self.stores.items.set_dirty(item);
        }

        let world = &self.world;
        let zones = self.stores.zones.commit(|id| world.zone(id));
        let players = self.stores.players.commit(|id| world.player(id));
        let items = self.stores.items.commit(|id| world.item(id));

        let report = CommitReport {
            saved: zones.saved + players.saved + items.saved,
            failed: zones.failed + players.failed + items.failed,
        };
        if report.saved > 0 || report.failed > 0 {
            let pending =
                self.stores.zones.pending() + self.stores.players.pending() + self.stores.items.pending();
            debug!(
                target: "runtime::store",
                saved = report.saved,
                failed = report.failed,
                pending,
                "pass committed"
            );
        }
        report
    }
}
