//! Region graph and routing for the Blaze dispatch simulation.
//!
//! This crate models the static terrain: regions as nodes of an `N x N`
//! weighted adjacency matrix, a display layout, and single-source shortest
//! paths over the weights.
//!
//! # Modules
//!
//! - [`error`] -- Error types for graph construction and routing.
//! - [`graph`] -- [`RegionGraph`], the immutable weighted adjacency view.
//! - [`layout`] -- Circular display layout for regions.
//! - [`matrix`] -- Parsing the comma-separated matrix text format.
//! - [`path`] -- Dense Dijkstra returning a [`Path`] or a no-path error.

pub mod error;
pub mod graph;
pub mod layout;
pub mod matrix;
pub mod path;

// Re-export primary types at crate root.
pub use error::GraphError;
pub use graph::RegionGraph;
pub use path::{Path, shortest_path};
