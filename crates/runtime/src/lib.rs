//! Coordinator runtime for the zone simulation.
//!
//! This crate owns the single worker allowed to mutate world state, the
//! write-behind persistence that sits behind it, and the tick driver.
//! Transports embed [`Runtime`] and talk to it through [`RuntimeHandle`]:
//! [`IncomingMessage`]s in, [`OutgoingMessage`]s out.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the handle and error types
//! - [`messages`] defines the transport-facing message types
//! - [`repository`] provides keyed record storage and write-behind stores
pub mod api;
pub mod messages;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{RepositoryError, Result, RuntimeError, RuntimeHandle};
pub use messages::{IncomingMessage, OutgoingKind, OutgoingMessage};
pub use repository::{
    CommitReport, InMemoryRepository, JsonFileRepository, RecordId, Repositories, Repository,
    Store,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
