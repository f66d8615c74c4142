//! Shared type definitions for the Blaze dispatch simulation.
//!
//! This crate is the single source of truth for the small vocabulary shared
//! by the graph, ledger, and core crates.
//!
//! # Modules
//!
//! - [`ids`] -- Region identifiers and fire intensity levels
//! - [`enums`] -- Controller phases and terminal reasons
//! - [`events`] -- Discrete notifications emitted by the controller
//! - [`structs`] -- Layout positions

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Phase, StuckReason};
pub use events::DispatchEvent;
pub use ids::{FireLevel, RegionId};
pub use structs::Position;
