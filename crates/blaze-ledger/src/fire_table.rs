//! Per-level suppression constants.
//!
//! A fire is knocked down one level at a time. Each step is priced by the
//! level the fire is at *before* the step: it burns
//! `time_per_level[level - 1] * fuel_per_time_unit` fuel and a flat
//! `water_per_level` of water.

use blaze_types::FireLevel;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Number of non-zero fire levels.
pub const LEVEL_COUNT: usize = 5;

/// Suppression time, fuel, and water constants for each fire level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireTable {
    /// Time units needed to knock a fire down from level `i + 1`.
    time_per_level: [u64; LEVEL_COUNT],
    /// Fuel burned per unit of suppression time.
    fuel_per_time_unit: u64,
    /// Water used for each one-level reduction.
    water_per_level: u64,
}

impl FireTable {
    /// Create a fire table from its constants.
    pub const fn new(
        time_per_level: [u64; LEVEL_COUNT],
        fuel_per_time_unit: u64,
        water_per_level: u64,
    ) -> Self {
        Self {
            time_per_level,
            fuel_per_time_unit,
            water_per_level,
        }
    }

    /// Time needed to reduce a fire from `level` to `level - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidLevel`] for level 0.
    pub fn time(&self, level: FireLevel) -> Result<u64, LedgerError> {
        usize::from(level.get())
            .checked_sub(1)
            .and_then(|i| self.time_per_level.get(i))
            .copied()
            .ok_or(LedgerError::InvalidLevel(level))
    }

    /// Fuel burned by one suppression step at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidLevel`] for level 0, or
    /// [`LedgerError::ArithmeticOverflow`] if the product overflows.
    pub fn fuel_cost(&self, level: FireLevel) -> Result<u64, LedgerError> {
        self.time(level)?
            .checked_mul(self.fuel_per_time_unit)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    /// Water used by one suppression step at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidLevel`] for level 0.
    pub const fn water_cost(&self, level: FireLevel) -> Result<u64, LedgerError> {
        if level.is_extinguished() {
            Err(LedgerError::InvalidLevel(level))
        } else {
            Ok(self.water_per_level)
        }
    }

    /// Water needed to take a fire all the way from `level` to zero.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the product overflows.
    pub fn full_water_cost(&self, level: FireLevel) -> Result<u64, LedgerError> {
        self.water_per_level
            .checked_mul(u64::from(level.get()))
            .ok_or(LedgerError::ArithmeticOverflow)
    }
}

impl Default for FireTable {
    fn default() -> Self {
        Self::new([10, 20, 30, 40, 50], 10, 1000)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn level(l: u8) -> FireLevel {
        FireLevel::new(l).unwrap()
    }

    #[test]
    fn default_costs() {
        let table = FireTable::default();
        assert_eq!(table.fuel_cost(level(1)).unwrap(), 100);
        assert_eq!(table.fuel_cost(level(5)).unwrap(), 500);
        assert_eq!(table.water_cost(level(3)).unwrap(), 1000);
    }

    #[test]
    fn level_zero_has_no_cost() {
        let table = FireTable::default();
        assert_eq!(
            table.time(FireLevel::EXTINGUISHED),
            Err(LedgerError::InvalidLevel(FireLevel::EXTINGUISHED))
        );
        assert!(table.water_cost(FireLevel::EXTINGUISHED).is_err());
    }

    #[test]
    fn full_water_cost_scales_with_level() {
        let table = FireTable::default();
        assert_eq!(table.full_water_cost(level(3)).unwrap(), 3000);
        assert_eq!(table.full_water_cost(FireLevel::EXTINGUISHED).unwrap(), 0);
    }

    #[test]
    fn overflow_is_reported() {
        let table = FireTable::new([u64::MAX; LEVEL_COUNT], 2, 1);
        assert_eq!(
            table.fuel_cost(level(1)),
            Err(LedgerError::ArithmeticOverflow)
        );
    }
}
