//! Layout positions for regions.
//!
//! Positions exist for display only. Travel cost always comes from the
//! graph weights, never from the distance between two positions.

use serde::{Deserialize, Serialize};

/// A 2-D layout coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
