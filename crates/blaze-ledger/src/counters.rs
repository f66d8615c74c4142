//! Cumulative usage counters.
//!
//! Counters only grow. The extinguished list is append-only and records
//! regions in the order their fires reached zero.

use blaze_types::RegionId;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Totals accumulated over a whole simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    /// Sum of all travelled edge weights.
    pub distance_travelled: u64,
    /// Water spent on suppression.
    pub water_used: u64,
    /// Fuel spent on travel and suppression.
    pub fuel_used: u64,
    /// Number of fuel refills at base.
    pub refuel_count: u32,
    /// Number of water refills at base.
    pub water_refill_count: u32,
    /// Regions in the order their fires were put out.
    pub extinguished: Vec<RegionId>,
}

impl UsageCounters {
    /// Counters after travelling `distance`, or an overflow error.
    pub(crate) fn with_travel(&self, distance: u64) -> Result<(u64, u64), LedgerError> {
        let travelled = self
            .distance_travelled
            .checked_add(distance)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let fuel = self
            .fuel_used
            .checked_add(distance)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok((travelled, fuel))
    }

    /// Counters after one suppression step, or an overflow error.
    pub(crate) fn with_suppression(
        &self,
        water: u64,
        fuel: u64,
    ) -> Result<(u64, u64), LedgerError> {
        let water_used = self
            .water_used
            .checked_add(water)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let fuel_used = self
            .fuel_used
            .checked_add(fuel)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok((water_used, fuel_used))
    }

    /// Append a region to the extinguished order.
    pub fn record_extinguished(&mut self, region: RegionId) {
        self.extinguished.push(region);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn travel_adds_to_distance_and_fuel() {
        let counters = UsageCounters {
            distance_travelled: 5,
            fuel_used: 7,
            ..UsageCounters::default()
        };
        assert_eq!(counters.with_travel(10).unwrap(), (15, 17));
    }

    #[test]
    fn overflow_detected() {
        let counters = UsageCounters {
            water_used: u64::MAX,
            ..UsageCounters::default()
        };
        assert_eq!(
            counters.with_suppression(1, 0),
            Err(LedgerError::ArithmeticOverflow)
        );
    }

    #[test]
    fn extinguished_order_is_preserved() {
        let mut counters = UsageCounters::default();
        counters.record_extinguished(RegionId::new(4));
        counters.record_extinguished(RegionId::new(2));
        assert_eq!(counters.extinguished, vec![RegionId::new(4), RegionId::new(2)]);
    }
}
