//! Region identifiers and fire intensity levels.
//!
//! Regions are addressed by their row index in the adjacency matrix. Index 0
//! is always the base where the unit refuels. Wrapping the index in
//! [`RegionId`] keeps region indices from being mixed with distances or
//! resource quantities at compile time.

use serde::{Deserialize, Serialize};

/// Index of a region in the graph (`0..N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub usize);

impl RegionId {
    /// The fixed base region where the unit starts and refills.
    pub const BASE: Self = Self(0);

    /// Create a region identifier from a matrix index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the underlying matrix index.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Whether this region is the base.
    pub const fn is_base(self) -> bool {
        self.0 == 0
    }
}

impl core::fmt::Display for RegionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// Severity of a fire at a region, `0..=5`. Zero means extinguished.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct FireLevel(u8);

impl FireLevel {
    /// No fire.
    pub const EXTINGUISHED: Self = Self(0);

    /// The most severe fire level.
    pub const MAX: Self = Self(5);

    /// Create a fire level, returning `None` if `level` exceeds [`FireLevel::MAX`].
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Return the raw level.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether the fire is out.
    pub const fn is_extinguished(self) -> bool {
        self.0 == 0
    }

    /// The level one step below this one. An extinguished fire stays at zero.
    pub const fn reduced(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl core::fmt::Display for FireLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for FireLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("fire level {level} exceeds maximum {}", Self::MAX))
    }
}

impl From<FireLevel> for u8 {
    fn from(level: FireLevel) -> Self {
        level.0
    }
}
