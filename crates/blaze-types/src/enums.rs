//! Enumeration types for the dispatch state machine.

use serde::{Deserialize, Serialize};

use crate::ids::RegionId;

/// The phase of the dispatch state machine.
///
/// The movement queue is non-empty only in [`Phase::Moving`] and
/// [`Phase::ReturningForRefuel`]; every other phase holds an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Positioned at base, nothing dispatched yet.
    Idle,
    /// Waiting to choose the next target on the following tick.
    Planning,
    /// Travelling along a planned path toward a fire.
    Moving {
        /// The fire-bearing region at the end of the path.
        target: RegionId,
    },
    /// Suppressing the fire at the current region, one level per tick.
    Extinguishing {
        /// The region being suppressed.
        region: RegionId,
    },
    /// Heading back to base; refills once the base is reached.
    ReturningForRefuel,
    /// Every fire is out. Terminal.
    Completed,
    /// Fires remain but none can ever be reached. Terminal.
    Stuck {
        /// Why the unit cannot make progress.
        reason: StuckReason,
    },
}

impl Phase {
    /// Whether no further step can change the simulation.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Stuck { .. })
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Planning => write!(f, "planning"),
            Self::Moving { target } => write!(f, "moving to {target}"),
            Self::Extinguishing { region } => write!(f, "extinguishing {region}"),
            Self::ReturningForRefuel => write!(f, "returning for refuel"),
            Self::Completed => write!(f, "completed"),
            Self::Stuck { reason } => write!(f, "stuck ({reason})"),
        }
    }
}

/// Why the unit entered the terminal [`Phase::Stuck`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StuckReason {
    /// Freshly refilled at base, fires remain, and none of them is feasible.
    NoFeasibleTarget,
    /// The unit cannot get back to base: either no path exists or the fuel
    /// left does not cover the next hop.
    Stranded {
        /// Where the unit is stranded.
        at: RegionId,
    },
}

impl core::fmt::Display for StuckReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoFeasibleTarget => write!(f, "no feasible target after refill"),
            Self::Stranded { at } => write!(f, "stranded at {at}"),
        }
    }
}
