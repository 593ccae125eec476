//! Error types surfaced by the runtime API.
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("coordinator command channel closed")]
    CommandChannelClosed,

    #[error("coordinator reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires definitions to be configured before building")]
    MissingDefinitions,

    #[error("failed to build zone {zone}")]
    ZoneDefinition {
        zone: String,
        #[source]
        source: game_core::DefinitionError,
    },

    #[error("no zone available to place players in")]
    NoZones,
}
