//! Transport-facing message types.
//!
//! The coordinator is agnostic to wire format: transports decode client
//! frames into [`IncomingMessage`]s and deliver [`OutgoingMessage`]s to the
//! listed recipients.

use serde::{Deserialize, Serialize};

use game_core::{ActionKind, ActionParams, PlayerId, ZoneId};

/// One client request, already authenticated to `player`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub player: PlayerId,
    pub action: ActionKind,
    #[serde(default)]
    pub params: ActionParams,
}

impl IncomingMessage {
    pub fn new(player: PlayerId, action: ActionKind, params: ActionParams) -> Self {
        Self {
            player,
            action,
            params,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutgoingKind {
    /// Public zone snapshot.
    StateUpdate,
    /// Private view of one player.
    PlayerUpdate,
    ChatMessage,
    PlayEffect,
}

/// One message to deliver to every player in `recipients`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Zone the message concerns, if any.
    pub zone: Option<ZoneId>,
    pub recipients: Vec<PlayerId>,
    #[serde(rename = "type")]
    pub kind: OutgoingKind,
    pub params: serde_json::Value,
}

impl OutgoingMessage {
    pub fn is_for(&self, player: PlayerId) -> bool {
        self.recipients.contains(&player)
    }
}
