//! Cloneable façade for talking to the coordinator.
//!
//! [`RuntimeHandle`] hides channel plumbing. Inbound messages and ticks are
//! fire-and-forget; queries round-trip through a oneshot reply and are
//! answered in queue order, after everything sent before them.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{PlayerDetail, PlayerId, ZoneId, ZoneSnapshot};

use super::errors::{Result, RuntimeError};
use crate::messages::{IncomingMessage, OutgoingMessage};
use crate::repository::CommitReport;
use crate::workers::Command;

#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::UnboundedSender<Command>,
    outgoing_tx: broadcast::Sender<OutgoingMessage>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::UnboundedSender<Command>,
        outgoing_tx: broadcast::Sender<OutgoingMessage>,
    ) -> Self {
        Self {
            command_tx,
            outgoing_tx,
        }
    }

    /// Queues a client message for the coordinator.
    pub fn send(&self, message: IncomingMessage) -> Result<()> {
        self.command(Command::Message(message))
    }

    /// Queues one simulation tick for every zone.
    pub fn tick(&self) -> Result<()> {
        self.command(Command::Tick)
    }

    /// Stream of messages for clients.
    pub fn subscribe(&self) -> broadcast::Receiver<OutgoingMessage> {
        self.outgoing_tx.subscribe()
    }

    pub async fn zone_snapshot(&self, zone: ZoneId) -> Result<Option<ZoneSnapshot>> {
        self.request(|reply| Command::ZoneSnapshot { zone, reply }).await
    }

    pub async fn zone_named(&self, name: impl Into<String>) -> Result<Option<ZoneId>> {
        let name = name.into();
        self.request(|reply| Command::ZoneNamed { name, reply }).await
    }

    pub async fn player_detail(&self, player: PlayerId) -> Result<Option<PlayerDetail>> {
        self.request(|reply| Command::PlayerDetail { player, reply }).await
    }

    /// Waits until everything queued so far is processed and committed.
    pub async fn flush(&self) -> Result<CommitReport> {
        self.request(|reply| Command::Flush { reply }).await
    }

    fn command(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command(build(reply_tx))?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
