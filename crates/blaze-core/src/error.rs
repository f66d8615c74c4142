//! Error types for the `blaze-core` crate.
//!
//! Resource shortfalls never appear here: the controller turns them into a
//! return to base. What remains are load-time validation failures and
//! broken internal invariants.

use blaze_graph::GraphError;
use blaze_ledger::LedgerError;
use blaze_types::RegionId;

/// Errors that can occur while building or stepping the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// A graph operation failed.
    #[error("graph error: {source}")]
    Graph {
        /// The underlying graph error.
        #[from]
        source: GraphError,
    },

    /// A ledger operation failed for a reason other than a shortfall.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// The configuration cannot be turned into simulation inputs.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The initial fire intensities do not cover every region exactly once.
    #[error("fire intensities list {actual} regions but the graph has {expected}")]
    FireCountMismatch {
        /// Number of regions in the graph.
        expected: usize,
        /// Number of intensities supplied.
        actual: usize,
    },

    /// An initial intensity is outside `0..=5`.
    #[error("invalid fire intensity {level} at region {region}")]
    InvalidIntensity {
        /// The region with the bad value.
        region: RegionId,
        /// The raw value.
        level: u8,
    },

    /// The base region was given a fire; the base is never on fire.
    #[error("the base region cannot be on fire (intensity {level})")]
    BaseOnFire {
        /// The rejected intensity.
        level: u8,
    },

    /// Two consecutive waypoints are not joined by an edge.
    #[error("planned path is broken between {from} and {to}")]
    BrokenPath {
        /// Region the unit stands on.
        from: RegionId,
        /// Next waypoint.
        to: RegionId,
    },

    /// Tick counter would overflow.
    #[error("tick counter overflow")]
    TickOverflow,
}
