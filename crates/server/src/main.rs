//! Zone server binary.
//!
//! Composition root: loads content, builds the runtime on file-backed
//! repositories and serves the line-delimited JSON transport until ctrl-c
//! or end of input.

mod config;
mod transport;

use anyhow::{Context, Result};
use game_content::{ContentFactory, validate};
use game_core::BehaviorRegistry;
use runtime::{Repositories, Runtime, RuntimeConfig};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env();
    info!(
        content = %config.content_dir.display(),
        save_data = %config.save_data_dir.display(),
        "starting zone server"
    );

    let factory = ContentFactory::new(&config.content_dir);
    let mut game_config = factory.load_config()?;
    if let Some(seed) = config.world_seed {
        game_config.world_seed = seed;
    }
    let definitions = factory.load_definitions()?;
    let behaviors = BehaviorRegistry::with_defaults();
    validate(&definitions, &behaviors)?;

    let repositories = Repositories::json_files(&config.save_data_dir).with_context(|| {
        format!(
            "failed to open save data directory {}",
            config.save_data_dir.display()
        )
    })?;

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            game_config,
            tick_interval: Some(config.tick_interval),
            default_zone: config.default_zone.clone(),
            ..RuntimeConfig::default()
        })
        .definitions(definitions)
        .behaviors(behaviors)
        .repositories(repositories)
        .build()
        .await?;

    let writer = tokio::spawn(transport::write_stdout(runtime.subscribe()));
    let reader = transport::read_stdin(runtime.handle());

    tokio::select! {
        result = reader => {
            if let Err(error) = result {
                warn!(%error, "transport stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => info!("ctrl-c received"),
    }

    // Shutdown drops the last outgoing sender; the writer drains what is
    // buffered and ends on `Closed`.
    let report = runtime.shutdown().await?;
    match writer.await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => warn!(%error, "stdout writer failed"),
        Err(error) => warn!(%error, "stdout writer panicked"),
    }
    info!(saved = report.saved, failed = report.failed, "zone server stopped");
    Ok(())
}
