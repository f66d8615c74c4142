//! The tick-driven dispatch state machine.
//!
//! [`DispatchController::step`] performs exactly one action per call and
//! returns the phase the unit is in afterwards:
//!
//! - **Idle / Planning**: choose a fire; load the path toward it, or head
//!   home when nothing is affordable, or finish when nothing burns.
//! - **Moving**: travel one waypoint hop, paying its edge weight in fuel.
//! - **Extinguishing**: knock the local fire down by one level.
//! - **Returning for refuel**: travel one hop toward base, or refill once there.
//! - **Completed / Stuck**: terminal; further steps change nothing.
//!
//! Resource shortfalls never surface as errors. A hop or suppression step
//! the ledger cannot cover turns into a return to base. The only way out of
//! a refill-and-replan loop that makes no progress is [`Phase::Stuck`].
//!
//! The movement queue is non-empty only while `Moving` or `ReturningForRefuel`.

use std::collections::VecDeque;

use blaze_graph::{GraphError, RegionGraph, shortest_path};
use blaze_ledger::ResourceLedger;
use blaze_types::{DispatchEvent, FireLevel, Phase, RegionId, StuckReason};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::DispatchConfig;
use crate::error::SimulationError;
use crate::fires::FireMap;
use crate::planner::select_next_target;
use crate::report::Report;
use crate::sink::EventSink;

/// Everything that changes while the simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationState {
    /// Region the unit stands on.
    position: RegionId,
    /// Current state-machine phase.
    phase: Phase,
    /// Fire intensity per region.
    fires: FireMap,
    /// Fuel, water, and usage counters.
    ledger: ResourceLedger,
    /// Waypoints left on the current path, next hop first.
    queue: VecDeque<RegionId>,
    /// Number of steps taken.
    tick: u64,
    /// Set by a refill, cleared once a target is chosen.
    fresh_refill: bool,
}

/// Owns the graph and the simulation state and advances them one tick at a
/// time.
#[derive(Debug, Clone)]
pub struct DispatchController {
    graph: RegionGraph,
    state: SimulationState,
}

impl DispatchController {
    /// Create a controller with the unit idle at base.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::FireCountMismatch`] if `fires` does not
    /// cover exactly the regions of `graph`.
    pub fn new(
        graph: RegionGraph,
        fires: FireMap,
        ledger: ResourceLedger,
    ) -> Result<Self, SimulationError> {
        if fires.len() != graph.region_count() {
            return Err(SimulationError::FireCountMismatch {
                expected: graph.region_count(),
                actual: fires.len(),
            });
        }

        info!(
            regions = graph.region_count(),
            burning = fires.burning_count(),
            total_intensity = fires.total_intensity(),
            fuel = ledger.fuel(),
            water = ledger.water(),
            "Dispatch controller ready"
        );

        Ok(Self {
            graph,
            state: SimulationState {
                position: RegionId::BASE,
                phase: Phase::Idle,
                fires,
                ledger,
                queue: VecDeque::new(),
                tick: 0,
                fresh_refill: false,
            },
        })
    }

    /// Create a controller from configuration: full tanks, configured fire
    /// table and initial intensities.
    ///
    /// # Errors
    ///
    /// Returns an error if the fire table or the initial intensities in
    /// `config` do not fit `graph`.
    pub fn from_config(graph: RegionGraph, config: &DispatchConfig) -> Result<Self, SimulationError> {
        let fires = config.initial_fires(&graph)?;
        let ledger = ResourceLedger::new(config.capacities(), config.fire_table()?);
        Self::new(graph, fires, ledger)
    }

    /// The region graph.
    pub const fn graph(&self) -> &RegionGraph {
        &self.graph
    }

    /// The full simulation state, for dumps.
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Region the unit stands on.
    pub const fn position(&self) -> RegionId {
        self.state.position
    }

    /// Fuel, water, and usage counters.
    pub const fn ledger(&self) -> &ResourceLedger {
        &self.state.ledger
    }

    /// Fire intensities.
    pub const fn fires(&self) -> &FireMap {
        &self.state.fires
    }

    /// Steps taken so far.
    pub const fn tick(&self) -> u64 {
        self.state.tick
    }

    /// Waypoints left on the current path, next hop first.
    pub const fn queue(&self) -> &VecDeque<RegionId> {
        &self.state.queue
    }

    /// Whether the controller reached a terminal phase.
    pub const fn is_finished(&self) -> bool {
        self.state.phase.is_terminal()
    }

    /// Report built from the current usage counters.
    pub fn report(&self) -> Report {
        Report::build(self.state.ledger.counters())
    }

    /// Advance the simulation by one tick.
    ///
    /// A terminal phase is returned unchanged without counting a tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::BrokenPath`] if a planned hop has no edge,
    /// [`SimulationError::TickOverflow`] if the tick counter overflows, or
    /// propagates graph and ledger failures that are not resource
    /// shortfalls.
    pub fn step(&mut self, sink: &mut dyn EventSink) -> Result<Phase, SimulationError> {
        if self.is_finished() {
            return Ok(self.state.phase);
        }

        self.state.tick = self
            .state
            .tick
            .checked_add(1)
            .ok_or(SimulationError::TickOverflow)?;

        match self.state.phase {
            Phase::Idle | Phase::Planning => self.plan(sink)?,
            Phase::Moving { target } => self.advance(target, sink)?,
            Phase::Extinguishing { region } => self.suppress(region, sink)?,
            Phase::ReturningForRefuel => self.head_home(sink)?,
            Phase::Completed | Phase::Stuck { .. } => {}
        }

        debug!(
            tick = self.state.tick,
            phase = %self.state.phase,
            position = %self.state.position,
            fuel_pct = self.state.ledger.fuel_percent(),
            water_pct = self.state.ledger.water_percent(),
            "Step complete"
        );
        Ok(self.state.phase)
    }

    // -------------------------------------------------------------------
    // Phase handlers
    // -------------------------------------------------------------------

    fn plan(&mut self, sink: &mut dyn EventSink) -> Result<(), SimulationError> {
        if !self.state.fires.any_burning() {
            self.complete(sink);
            return Ok(());
        }

        let choice = select_next_target(
            self.state.position,
            &self.state.fires,
            &self.state.ledger,
            &self.graph,
        )?;

        match choice {
            Some(candidate) => {
                let target = candidate.region;
                let distance = candidate.path.distance();
                self.state.fresh_refill = false;
                info!(
                    tick = self.state.tick,
                    from = %self.state.position,
                    %target,
                    distance,
                    level = %candidate.level,
                    "Target selected"
                );
                sink.emit(DispatchEvent::TargetSelected {
                    target,
                    distance,
                    level: candidate.level,
                });

                self.state.queue = candidate.path.into_waypoints();
                if self.state.queue.is_empty() {
                    self.arrive(sink);
                } else {
                    self.state.phase = Phase::Moving { target };
                }
                Ok(())
            }
            None if self.state.fresh_refill => {
                self.become_stuck(StuckReason::NoFeasibleTarget);
                Ok(())
            }
            None => {
                debug!(
                    tick = self.state.tick,
                    burning = self.state.fires.burning_count(),
                    "No feasible target, heading to base"
                );
                self.report_shortfall(sink);
                self.return_to_base()
            }
        }
    }

    fn advance(&mut self, target: RegionId, sink: &mut dyn EventSink) -> Result<(), SimulationError> {
        let Some(next) = self.state.queue.pop_front() else {
            self.arrive(sink);
            return Ok(());
        };

        if !self.hop(next)? {
            warn!(
                tick = self.state.tick,
                at = %self.state.position,
                %target,
                fuel = self.state.ledger.fuel(),
                "Cannot afford next hop, aborting path"
            );
            self.state.queue.clear();
            self.report_shortfall(sink);
            return self.return_to_base();
        }

        if self.state.queue.is_empty() {
            self.arrive(sink);
        }
        Ok(())
    }

    fn suppress(&mut self, region: RegionId, sink: &mut dyn EventSink) -> Result<(), SimulationError> {
        let level = self
            .state
            .fires
            .level(region)
            .unwrap_or(FireLevel::EXTINGUISHED);
        if level.is_extinguished() {
            self.state.phase = Phase::Planning;
            return Ok(());
        }

        if !self.state.ledger.can_suppress(level) {
            warn!(
                tick = self.state.tick,
                %region,
                %level,
                fuel = self.state.ledger.fuel(),
                water = self.state.ledger.water(),
                "Cannot afford suppression step, heading to base"
            );
            self.report_shortfall(sink);
            return self.return_to_base();
        }

        let cost = self.state.ledger.spend_suppress(level)?;
        let remaining = self
            .state
            .fires
            .reduce(region)
            .unwrap_or(FireLevel::EXTINGUISHED);
        sink.emit(DispatchEvent::FireLevelReduced {
            region,
            level: remaining,
            water_used: cost.water,
            fuel_used: cost.fuel,
        });

        if remaining.is_extinguished() {
            self.state.ledger.record_extinguished(region);
            info!(
                tick = self.state.tick,
                %region,
                remaining = self.state.fires.burning_count(),
                "Fire extinguished"
            );
            sink.emit(DispatchEvent::FireExtinguished { region });
            self.state.phase = Phase::Planning;
        }
        Ok(())
    }

    fn head_home(&mut self, sink: &mut dyn EventSink) -> Result<(), SimulationError> {
        if let Some(next) = self.state.queue.pop_front() {
            if !self.hop(next)? {
                self.state.queue.clear();
                self.report_shortfall(sink);
                self.become_stuck(StuckReason::Stranded {
                    at: self.state.position,
                });
            }
            return Ok(());
        }

        if !self.state.position.is_base() {
            return self.return_to_base();
        }

        self.state.ledger.refill();
        self.state.fresh_refill = true;
        sink.emit(DispatchEvent::Refilled {
            fuel: self.state.ledger.fuel(),
            water: self.state.ledger.water(),
        });
        self.state.phase = Phase::Planning;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------

    /// Travel to the adjacent region `next`. Returns `false`, leaving the
    /// ledger and position untouched, if the fuel does not cover the edge.
    fn hop(&mut self, next: RegionId) -> Result<bool, SimulationError> {
        let from = self.state.position;
        let distance = self
            .graph
            .weight(from, next)
            .ok_or(SimulationError::BrokenPath { from, to: next })?;

        if !self.state.ledger.can_travel(distance) {
            return Ok(false);
        }
        self.state.ledger.spend_travel(distance)?;
        self.state.position = next;

        debug!(
            tick = self.state.tick,
            %from,
            to = %next,
            distance,
            fuel = self.state.ledger.fuel(),
            "Hop"
        );
        Ok(true)
    }

    /// The movement queue just ran out: start on the local fire, or refill
    /// if the path ended at base.
    fn arrive(&mut self, sink: &mut dyn EventSink) {
        let region = self.state.position;
        if region.is_base() {
            self.state.phase = Phase::ReturningForRefuel;
            return;
        }

        let position = self.graph.position(region).unwrap_or_default();
        info!(tick = self.state.tick, %region, "Arrived");
        sink.emit(DispatchEvent::Arrived { region, position });
        self.state.phase = Phase::Extinguishing { region };
    }

    /// Load a path to base and switch to `ReturningForRefuel`, or get stuck
    /// if base cannot be reached.
    fn return_to_base(&mut self) -> Result<(), SimulationError> {
        let from = self.state.position;
        match shortest_path(&self.graph, from, RegionId::BASE) {
            Ok(path) => {
                debug!(
                    tick = self.state.tick,
                    %from,
                    distance = path.distance(),
                    "Returning to base"
                );
                self.state.queue = path.into_waypoints();
                self.state.phase = Phase::ReturningForRefuel;
                Ok(())
            }
            Err(GraphError::NoPath { .. }) => {
                self.become_stuck(StuckReason::Stranded { at: from });
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn report_shortfall(&self, sink: &mut dyn EventSink) {
        sink.emit(DispatchEvent::InsufficientResources {
            region: self.state.position,
            fuel: self.state.ledger.fuel(),
            water: self.state.ledger.water(),
        });
    }

    fn become_stuck(&mut self, reason: StuckReason) {
        self.state.queue.clear();
        self.state.phase = Phase::Stuck { reason };
        warn!(
            tick = self.state.tick,
            %reason,
            burning = self.state.fires.burning_count(),
            "Dispatch stuck"
        );
    }

    fn complete(&mut self, sink: &mut dyn EventSink) {
        self.state.queue.clear();
        self.state.phase = Phase::Completed;
        let order = self.state.ledger.counters().extinguished.clone();
        info!(
            tick = self.state.tick,
            extinguished = order.len(),
            distance = self.state.ledger.counters().distance_travelled,
            "All fires extinguished"
        );
        sink.emit(DispatchEvent::AllFiresExtinguished { order });
    }
}
