//! The resource ledger: on-board fuel and water with atomic spends.
//!
//! The [`ResourceLedger`] is owned by the dispatch controller and is the
//! only place fuel and water change.
//!
//! # Design
//!
//! - **Bounded**: `0 <= fuel <= fuel capacity`, `0 <= water <= water capacity`.
//! - **Atomic**: every spend computes all new values first and commits only
//!   if nothing fails. A failed spend leaves the ledger exactly as it was.
//! - **Checked**: all arithmetic is checked; overflow is an error, never a
//!   wrap.

use blaze_types::{FireLevel, RegionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::counters::UsageCounters;
use crate::fire_table::FireTable;
use crate::LedgerError;

/// Tank sizes of the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacities {
    /// Maximum fuel on board.
    pub fuel: u64,
    /// Maximum water on board.
    pub water: u64,
}

impl Default for Capacities {
    fn default() -> Self {
        Self {
            fuel: 5000,
            water: 20_000,
        }
    }
}

/// Resources consumed by one suppression step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressionCost {
    /// Water spent.
    pub water: u64,
    /// Fuel spent.
    pub fuel: u64,
}

/// Mutable fuel and water state with cumulative counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLedger {
    /// Tank sizes.
    capacities: Capacities,
    /// Suppression cost constants.
    fire_table: FireTable,
    /// Fuel on board.
    fuel: u64,
    /// Water on board.
    water: u64,
    /// Cumulative usage.
    counters: UsageCounters,
}

impl ResourceLedger {
    /// Create a ledger with both tanks full.
    pub fn new(capacities: Capacities, fire_table: FireTable) -> Self {
        Self {
            capacities,
            fire_table,
            fuel: capacities.fuel,
            water: capacities.water,
            counters: UsageCounters::default(),
        }
    }

    /// Create a ledger with explicit starting amounts (useful for testing
    /// and state restoration).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ExceedsCapacity`] if either amount is larger
    /// than its tank.
    pub fn from_parts(
        capacities: Capacities,
        fire_table: FireTable,
        fuel: u64,
        water: u64,
    ) -> Result<Self, LedgerError> {
        if fuel > capacities.fuel {
            return Err(LedgerError::ExceedsCapacity {
                resource: "fuel",
                amount: fuel,
                capacity: capacities.fuel,
            });
        }
        if water > capacities.water {
            return Err(LedgerError::ExceedsCapacity {
                resource: "water",
                amount: water,
                capacity: capacities.water,
            });
        }
        Ok(Self {
            capacities,
            fire_table,
            fuel,
            water,
            counters: UsageCounters::default(),
        })
    }

    /// Fuel on board.
    pub const fn fuel(&self) -> u64 {
        self.fuel
    }

    /// Water on board.
    pub const fn water(&self) -> u64 {
        self.water
    }

    /// Tank sizes.
    pub const fn capacities(&self) -> Capacities {
        self.capacities
    }

    /// Suppression cost constants.
    pub const fn fire_table(&self) -> &FireTable {
        &self.fire_table
    }

    /// Cumulative usage counters.
    pub const fn counters(&self) -> &UsageCounters {
        &self.counters
    }

    /// Fuel gauge as a whole percentage of capacity.
    pub fn fuel_percent(&self) -> u64 {
        percent(self.fuel, self.capacities.fuel)
    }

    /// Water gauge as a whole percentage of capacity.
    pub fn water_percent(&self) -> u64 {
        percent(self.water, self.capacities.water)
    }

    // -------------------------------------------------------------------
    // Travel
    // -------------------------------------------------------------------

    /// Whether there is enough fuel to travel `distance`.
    pub const fn can_travel(&self, distance: u64) -> bool {
        self.fuel >= distance
    }

    /// Burn `distance` fuel and add it to the distance and fuel counters.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFuel`] if `fuel < distance`, or
    /// [`LedgerError::ArithmeticOverflow`] if a counter would overflow. The
    /// ledger is unchanged on error.
    pub fn spend_travel(&mut self, distance: u64) -> Result<(), LedgerError> {
        let fuel = self
            .fuel
            .checked_sub(distance)
            .ok_or(LedgerError::InsufficientFuel {
                needed: distance,
                available: self.fuel,
            })?;
        let (travelled, fuel_used) = self.counters.with_travel(distance)?;

        self.fuel = fuel;
        self.counters.distance_travelled = travelled;
        self.counters.fuel_used = fuel_used;

        debug!(distance, fuel = self.fuel, "Travel fuel spent");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Suppression
    // -------------------------------------------------------------------

    /// Whether one suppression step at `level` is affordable.
    ///
    /// Always `false` for level 0, which needs no suppression.
    pub fn can_suppress(&self, level: FireLevel) -> bool {
        self.suppression_cost(level)
            .is_ok_and(|cost| self.water >= cost.water && self.fuel >= cost.fuel)
    }

    /// Spend the water and fuel of one suppression step at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientResources`] if either tank is
    /// short, [`LedgerError::InvalidLevel`] for level 0, or
    /// [`LedgerError::ArithmeticOverflow`] on counter overflow. The ledger is
    /// unchanged on error.
    pub fn spend_suppress(&mut self, level: FireLevel) -> Result<SuppressionCost, LedgerError> {
        let cost = self.suppression_cost(level)?;
        let shortfall = || LedgerError::InsufficientResources {
            level,
            water_needed: cost.water,
            fuel_needed: cost.fuel,
            water_available: self.water,
            fuel_available: self.fuel,
        };

        let water = self.water.checked_sub(cost.water).ok_or_else(shortfall)?;
        let fuel = self.fuel.checked_sub(cost.fuel).ok_or_else(shortfall)?;
        let (water_used, fuel_used) = self.counters.with_suppression(cost.water, cost.fuel)?;

        self.water = water;
        self.fuel = fuel;
        self.counters.water_used = water_used;
        self.counters.fuel_used = fuel_used;

        debug!(
            %level,
            water = self.water,
            fuel = self.fuel,
            "Suppression step spent"
        );
        Ok(cost)
    }

    /// Price of one suppression step at `level`.
    fn suppression_cost(&self, level: FireLevel) -> Result<SuppressionCost, LedgerError> {
        Ok(SuppressionCost {
            water: self.fire_table.water_cost(level)?,
            fuel: self.fire_table.fuel_cost(level)?,
        })
    }

    // -------------------------------------------------------------------
    // Refill
    // -------------------------------------------------------------------

    /// Fill both tanks to capacity and count one refuel and one water refill.
    pub fn refill(&mut self) {
        self.fuel = self.capacities.fuel;
        self.water = self.capacities.water;
        self.counters.refuel_count = self.counters.refuel_count.saturating_add(1);
        self.counters.water_refill_count = self.counters.water_refill_count.saturating_add(1);

        info!(
            fuel = self.fuel,
            water = self.water,
            refuels = self.counters.refuel_count,
            "Tanks refilled at base"
        );
    }

    /// Append a region to the extinguished order.
    pub fn record_extinguished(&mut self, region: RegionId) {
        self.counters.record_extinguished(region);
    }
}

/// `amount / capacity` as a whole percentage; 0 for a zero capacity.
fn percent(amount: u64, capacity: u64) -> u64 {
    amount
        .checked_mul(100)
        .and_then(|scaled| scaled.checked_div(capacity))
        .unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn level(l: u8) -> FireLevel {
        FireLevel::new(l).unwrap()
    }

    fn full() -> ResourceLedger {
        ResourceLedger::new(Capacities::default(), FireTable::default())
    }

    fn with(fuel: u64, water: u64) -> ResourceLedger {
        ResourceLedger::from_parts(Capacities::default(), FireTable::default(), fuel, water)
            .unwrap()
    }

    #[test]
    fn starts_full() {
        let ledger = full();
        assert_eq!(ledger.fuel(), 5000);
        assert_eq!(ledger.water(), 20_000);
        assert_eq!(ledger.fuel_percent(), 100);
    }

    #[test]
    fn from_parts_rejects_overfill() {
        let result =
            ResourceLedger::from_parts(Capacities::default(), FireTable::default(), 6000, 0);
        assert!(matches!(
            result,
            Err(LedgerError::ExceedsCapacity { resource: "fuel", .. })
        ));
    }

    #[test]
    fn travel_debits_fuel_and_counts_distance() {
        let mut ledger = full();
        assert!(ledger.can_travel(10));
        ledger.spend_travel(10).unwrap();
        assert_eq!(ledger.fuel(), 4990);
        assert_eq!(ledger.counters().distance_travelled, 10);
        assert_eq!(ledger.counters().fuel_used, 10);
    }

    #[test]
    fn travel_may_use_the_last_drop() {
        let mut ledger = with(25, 0);
        assert!(ledger.can_travel(25));
        ledger.spend_travel(25).unwrap();
        assert_eq!(ledger.fuel(), 0);
    }

    #[test]
    fn failed_travel_leaves_ledger_untouched() {
        let mut ledger = with(9, 500);
        let before = ledger.clone();
        assert!(!ledger.can_travel(10));
        assert_eq!(
            ledger.spend_travel(10),
            Err(LedgerError::InsufficientFuel {
                needed: 10,
                available: 9
            })
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn suppression_debits_both_resources() {
        let mut ledger = full();
        let cost = ledger.spend_suppress(level(2)).unwrap();
        assert_eq!(cost, SuppressionCost { water: 1000, fuel: 200 });
        assert_eq!(ledger.water(), 19_000);
        assert_eq!(ledger.fuel(), 4800);
        assert_eq!(ledger.counters().water_used, 1000);
        assert_eq!(ledger.counters().fuel_used, 200);
    }

    #[test]
    fn suppression_needs_both_resources() {
        // Enough water, not enough fuel for level 5 (500).
        let mut ledger = with(499, 20_000);
        assert!(!ledger.can_suppress(level(5)));
        let before = ledger.clone();
        assert!(matches!(
            ledger.spend_suppress(level(5)),
            Err(LedgerError::InsufficientResources {
                fuel_needed: 500,
                fuel_available: 499,
                ..
            })
        ));
        assert_eq!(ledger, before);

        // Enough fuel, not enough water.
        let mut ledger = with(5000, 999);
        assert!(!ledger.can_suppress(level(1)));
        let before = ledger.clone();
        assert!(ledger.spend_suppress(level(1)).is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn level_zero_is_never_suppressible() {
        let mut ledger = full();
        assert!(!ledger.can_suppress(FireLevel::EXTINGUISHED));
        assert_eq!(
            ledger.spend_suppress(FireLevel::EXTINGUISHED),
            Err(LedgerError::InvalidLevel(FireLevel::EXTINGUISHED))
        );
    }

    #[test]
    fn full_extinguish_costs_match_table() {
        let mut ledger = full();
        let mut current = level(4);
        while !current.is_extinguished() {
            ledger.spend_suppress(current).unwrap();
            current = current.reduced();
        }
        assert_eq!(ledger.counters().water_used, 4000);
        // 10 * (40 + 30 + 20 + 10)
        assert_eq!(ledger.counters().fuel_used, 1000);
    }

    #[test]
    fn refill_restores_capacity_from_any_state() {
        for (fuel, water) in [(0, 0), (4999, 1), (5000, 20_000), (17, 19_999)] {
            let mut ledger = with(fuel, water);
            ledger.refill();
            assert_eq!(ledger.fuel(), ledger.capacities().fuel);
            assert_eq!(ledger.water(), ledger.capacities().water);
        }
    }

    #[test]
    fn refill_counts_both_tanks() {
        let mut ledger = with(0, 0);
        ledger.refill();
        ledger.refill();
        assert_eq!(ledger.counters().refuel_count, 2);
        assert_eq!(ledger.counters().water_refill_count, 2);
    }

    #[test]
    fn gauges_round_down() {
        let ledger = with(2499, 5000);
        assert_eq!(ledger.fuel_percent(), 49);
        assert_eq!(ledger.water_percent(), 25);
    }

    #[test]
    fn serializes_tanks_and_counters() {
        let mut ledger = full();
        ledger.spend_travel(10).unwrap();
        ledger.record_extinguished(RegionId::new(3));
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["fuel"], 4990);
        assert_eq!(json["water"], 20_000);
        assert_eq!(json["capacities"]["fuel"], 5000);
        assert_eq!(json["counters"]["distance_travelled"], 10);
        assert_eq!(json["counters"]["extinguished"], serde_json::json!([3]));
    }
}
