//! Timed tick loop.
//!
//! Drives the controller with [`tokio::time::interval`], one `step()` per
//! tick, until the controller reaches a terminal phase or the tick bound is
//! hit. Each step runs to completion before the next tick is awaited.

use std::time::Duration;

use blaze_core::controller::DispatchController;
use blaze_core::error::SimulationError;
use blaze_core::runner::{EndReason, RunResult};
use blaze_core::sink::EventSink;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Run the controller at one step per `interval`.
///
/// # Errors
///
/// Propagates the first [`SimulationError`] returned by a step.
pub async fn run_ticking(
    controller: &mut DispatchController,
    sink: &mut dyn EventSink,
    interval: Duration,
    max_ticks: u64,
) -> Result<RunResult, SimulationError> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(?interval, max_ticks, "Tick loop starting");

    loop {
        if let Some(reason) = EndReason::from_phase(controller.phase()) {
            return Ok(RunResult::capture(controller, reason));
        }
        if controller.tick() >= max_ticks {
            return Ok(RunResult::capture(controller, EndReason::TickLimit));
        }

        ticker.tick().await;
        let phase = controller.step(sink)?;
        debug!(
            tick = controller.tick(),
            %phase,
            fuel = controller.ledger().fuel(),
            water = controller.ledger().water(),
            "Tick"
        );
    }
}
