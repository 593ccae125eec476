//! Definition lookup and instance construction errors.

use crate::state::Position;

/// Errors raised while building a live instance from a template.
///
/// Construction is aborted when one of these is returned; nothing has been
/// added to the zone at that point.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("unknown tile `{0}`")]
    UnknownTile(String),

    #[error("unknown entity type `{0}`")]
    UnknownEntity(String),

    #[error("unknown npc type `{0}`")]
    UnknownNpc(String),

    #[error("unknown item type `{0}`")]
    UnknownItem(String),

    #[error("unknown spell `{0}`")]
    UnknownSpell(String),

    #[error("unknown zone `{0}`")]
    UnknownZone(String),

    #[error("cell {0} is blocked")]
    Blocked(Position),

    #[error("entity `{entity}` has no field `{field}` of that kind")]
    InvalidField { entity: String, field: String },
}
