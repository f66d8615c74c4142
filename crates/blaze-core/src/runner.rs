//! Bounded run loop over the dispatch controller.
//!
//! [`run_to_end`] steps a [`DispatchController`] back to back until it
//! reaches a terminal phase or `max_ticks` steps have been taken. It is the
//! synchronous twin of the engine's timed tick loop and shares its
//! [`RunResult`] and [`log_run_end`].

use blaze_types::{Phase, StuckReason};
use serde::Serialize;
use tracing::{info, warn};

use crate::controller::DispatchController;
use crate::error::SimulationError;
use crate::report::Report;
use crate::sink::EventSink;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Every fire was put out.
    Completed,
    /// Fires remain that the unit can never reach or afford.
    Stuck(StuckReason),
    /// The tick bound was hit before a terminal phase.
    TickLimit,
}

impl EndReason {
    /// The end reason for a terminal `phase`, or `None` if the phase is not
    /// terminal.
    pub const fn from_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Completed => Some(Self::Completed),
            Phase::Stuck { reason } => Some(Self::Stuck(reason)),
            Phase::Idle
            | Phase::Planning
            | Phase::Moving { .. }
            | Phase::Extinguishing { .. }
            | Phase::ReturningForRefuel => None,
        }
    }

    /// Whether the run ended with every fire out.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Why the run stopped.
    pub end_reason: EndReason,
    /// Steps taken.
    pub ticks: u64,
    /// Report built from the final counters.
    pub report: Report,
}

impl RunResult {
    /// Snapshot the controller's tick count and report under `end_reason`.
    pub fn capture(controller: &DispatchController, end_reason: EndReason) -> Self {
        Self {
            end_reason,
            ticks: controller.tick(),
            report: controller.report(),
        }
    }
}

/// Step `controller` until it reaches a terminal phase or has taken
/// `max_ticks` steps.
///
/// # Errors
///
/// Propagates the first [`SimulationError`] returned by a step.
pub fn run_to_end(
    controller: &mut DispatchController,
    sink: &mut dyn EventSink,
    max_ticks: u64,
) -> Result<RunResult, SimulationError> {
    info!(max_ticks, phase = %controller.phase(), "Run starting");

    loop {
        if let Some(reason) = EndReason::from_phase(controller.phase()) {
            return Ok(RunResult::capture(controller, reason));
        }
        if controller.tick() >= max_ticks {
            return Ok(RunResult::capture(controller, EndReason::TickLimit));
        }
        controller.step(sink)?;
    }
}

/// Log how a run ended and the final report.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        ticks = result.ticks,
        distance = result.report.total_distance,
        water = result.report.total_water,
        fuel = result.report.total_fuel,
        refuels = result.report.refuel_count,
        extinguished = %result.report.extinguished_order(),
        "Run ended"
    );

    match result.end_reason {
        EndReason::Completed => {}
        EndReason::Stuck(reason) => warn!(%reason, "Run ended with fires still burning"),
        EndReason::TickLimit => warn!(ticks = result.ticks, "Run hit the tick limit"),
    }
}
