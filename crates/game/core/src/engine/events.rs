//! Events a zone hands back to the coordinator.

use crate::params::ActionParams;
use crate::state::{Player, PlayerId, Position, ZoneId};

/// Destination of a zone transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneRef {
    Id(ZoneId),
    Name(String),
}

/// Something the zone cannot resolve on its own.
///
/// Players carried by these events have already been detached from the zone.
#[derive(Clone, Debug)]
pub enum ZoneEvent {
    /// Text for one player, or the whole zone when `to` is `None`.
    Message { to: Option<PlayerId>, text: String },
    /// Named visual effect.
    Effect { name: String, params: ActionParams },
    /// The player reached 0 HP and must be respawned.
    PlayerDied(Box<Player>),
    /// The player is moving to another zone.
    Transfer {
        player: Box<Player>,
        zone: ZoneRef,
        position: Option<Position>,
    },
}
