//! Periodic tick driver.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use super::Command;

/// Queues a [`Command::Tick`] every `period` until the coordinator is gone.
pub async fn run(period: Duration, command_tx: mpsc::UnboundedSender<Command>) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of an interval fires immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        if command_tx.send(Command::Tick).is_err() {
            debug!(target: "runtime::coordinator", "ticker stopping: coordinator gone");
            return;
        }
    }
}
