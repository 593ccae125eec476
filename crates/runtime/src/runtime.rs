//! High-level runtime orchestrator.
//!
//! The runtime loads the world, spawns the coordinator and the ticker, and
//! exposes a builder-based API. [`RuntimeHandle`] is the cloneable façade
//! transports use to talk to the coordinator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

use game_core::{BehaviorRegistry, Definitions, GameConfig};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::messages::OutgoingMessage;
use crate::repository::{CommitReport, Repositories};
use crate::workers::{self, Command, Coordinator, Stores};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Period of the zone tick; `None` leaves ticking to the caller.
    pub tick_interval: Option<Duration>,
    /// Zone new and dead players are placed in; defaults to the game's
    /// starting zone.
    pub default_zone: Option<String>,
    pub outgoing_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            tick_interval: Some(Duration::from_millis(500)),
            default_zone: None,
            outgoing_buffer_size: 1024,
        }
    }
}

/// Running coordinator plus its ticker.
pub struct Runtime {
    handle: RuntimeHandle,
    command_tx: mpsc::UnboundedSender<Command>,
    coordinator: JoinHandle<()>,
    ticker: Option<JoinHandle<()>>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OutgoingMessage> {
        self.handle.subscribe()
    }

    /// Stops ticking, commits everything dirty and waits for the coordinator.
    ///
    /// Subscribers still receive what was published before the stop, then
    /// see the channel close once no other [`RuntimeHandle`] is alive.
    pub async fn shutdown(self) -> Result<CommitReport> {
        if let Some(ticker) = self.ticker {
            ticker.abort();
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Shutdown { reply: reply_tx })
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        let report = reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?;

        self.coordinator.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(report)
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    definitions: Option<Arc<Definitions>>,
    behaviors: Option<Arc<BehaviorRegistry>>,
    repositories: Option<Repositories>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            definitions: None,
            behaviors: None,
            repositories: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required content definitions.
    pub fn definitions(mut self, definitions: impl Into<Arc<Definitions>>) -> Self {
        self.definitions = Some(definitions.into());
        self
    }

    /// Set the behaviour tables; defaults to the stock behaviours.
    pub fn behaviors(mut self, behaviors: impl Into<Arc<BehaviorRegistry>>) -> Self {
        self.behaviors = Some(behaviors.into());
        self
    }

    /// Set the persistence backend; defaults to in-memory repositories.
    pub fn repositories(mut self, repositories: Repositories) -> Self {
        self.repositories = Some(repositories);
        self
    }

    /// Loads the world and starts the workers.
    pub async fn build(self) -> Result<Runtime> {
        let defs = self.definitions.ok_or(RuntimeError::MissingDefinitions)?;
        let behaviors = self
            .behaviors
            .unwrap_or_else(|| Arc::new(BehaviorRegistry::with_defaults()));
        let repositories = self.repositories.unwrap_or_else(Repositories::in_memory);
        let config = self.config;

        let mut stores = Stores::open(&repositories)?;
        let world = workers::load_world(
            &defs,
            &mut stores,
            config.game_config.world_seed,
            config.default_zone.as_deref(),
        )?;

        let (command_tx, command_rx) = mpsc::unbounded_channel::<Command>();
        let (outgoing_tx, _outgoing_rx) =
            broadcast::channel::<OutgoingMessage>(config.outgoing_buffer_size.max(1));
        let handle = RuntimeHandle::new(command_tx.clone(), outgoing_tx.clone());

        let coordinator = Coordinator::new(
            world,
            defs,
            behaviors,
            config.game_config.clone(),
            stores,
            command_rx,
            outgoing_tx,
        );
        let coordinator = tokio::spawn(coordinator.run());

        // Persist zones and items created from definitions right away.
        handle.flush().await?;

        let ticker = config.tick_interval.map(|period| {
            info!(target: "runtime::coordinator", period_ms = period.as_millis() as u64, "ticker started");
            tokio::spawn(workers::ticker::run(period, command_tx.clone()))
        });

        Ok(Runtime {
            handle,
            command_tx,
            coordinator,
            ticker,
        })
    }
}
