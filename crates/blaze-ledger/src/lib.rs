//! Fuel and water ledger for the Blaze dispatch simulation.
//!
//! Every litre of fuel and water the unit carries is tracked here. Resources
//! are never created except by a refill at base and never go negative: a
//! spend either debits everything it needs or leaves the ledger untouched.
//!
//! # Architecture
//!
//! - [`fire_table`] -- The [`FireTable`]: per-level suppression time and the
//!   fuel and water each suppression step costs.
//! - [`ledger`] -- The [`ResourceLedger`]: on-board fuel and water, capacities,
//!   and the spend/refill operations.
//! - [`counters`] -- [`UsageCounters`]: cumulative usage and the order in
//!   which fires were put out.
//!
//! # Usage
//!
//! ```
//! use blaze_ledger::{Capacities, FireTable, ResourceLedger};
//! use blaze_types::FireLevel;
//!
//! let mut ledger = ResourceLedger::new(Capacities::default(), FireTable::default());
//! ledger.spend_travel(10).ok();
//! assert_eq!(ledger.fuel(), 4990);
//!
//! let level = FireLevel::new(1).unwrap_or_default();
//! ledger.spend_suppress(level).ok();
//! assert_eq!(ledger.water(), 19_000);
//! ```

pub mod counters;
pub mod fire_table;
pub mod ledger;

// Re-export primary types at crate root.
pub use counters::UsageCounters;
pub use fire_table::FireTable;
pub use ledger::{Capacities, ResourceLedger, SuppressionCost};

use blaze_types::FireLevel;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when spending or configuring resources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Not enough fuel on board to travel the requested distance.
    #[error("insufficient fuel: need {needed}, have {available}")]
    InsufficientFuel {
        /// Fuel the travel would consume.
        needed: u64,
        /// Fuel currently on board.
        available: u64,
    },

    /// Not enough water or fuel on board for one suppression step.
    #[error(
        "insufficient resources to suppress level {level}: need {water_needed} water and \
         {fuel_needed} fuel, have {water_available} water and {fuel_available} fuel"
    )]
    InsufficientResources {
        /// The fire level being suppressed.
        level: FireLevel,
        /// Water the step would consume.
        water_needed: u64,
        /// Fuel the step would consume.
        fuel_needed: u64,
        /// Water currently on board.
        water_available: u64,
        /// Fuel currently on board.
        fuel_available: u64,
    },

    /// The level has no entry in the fire table (level 0 needs no suppression).
    #[error("fire level {0} has no suppression cost")]
    InvalidLevel(FireLevel),

    /// A starting amount exceeds its tank capacity.
    #[error("{resource} amount {amount} exceeds capacity {capacity}")]
    ExceedsCapacity {
        /// Which resource ("fuel" or "water").
        resource: &'static str,
        /// The requested amount.
        amount: u64,
        /// The tank capacity.
        capacity: u64,
    },

    /// Arithmetic overflow while computing a cost or updating a counter.
    #[error("arithmetic overflow in ledger calculation")]
    ArithmeticOverflow,
}
