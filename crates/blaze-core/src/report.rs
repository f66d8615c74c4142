//! The end-of-run summary.

use blaze_ledger::UsageCounters;
use blaze_types::RegionId;
use serde::Serialize;

/// Totals of a finished (or abandoned) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Sum of all travelled edge weights.
    pub total_distance: u64,
    /// Water spent on suppression.
    pub total_water: u64,
    /// Fuel spent on travel and suppression.
    pub total_fuel: u64,
    /// Number of fuel refills.
    pub refuel_count: u32,
    /// Number of water refills.
    pub water_refill_count: u32,
    /// Regions in the order their fires were put out.
    pub extinguished: Vec<RegionId>,
}

impl Report {
    /// Build a report from usage counters. Pure: same counters, same report.
    pub fn build(counters: &UsageCounters) -> Self {
        Self {
            total_distance: counters.distance_travelled,
            total_water: counters.water_used,
            total_fuel: counters.fuel_used,
            refuel_count: counters.refuel_count,
            water_refill_count: counters.water_refill_count,
            extinguished: counters.extinguished.clone(),
        }
    }

    /// Extinguished regions as bare indices joined by `", "`.
    pub fn extinguished_order(&self) -> String {
        self.extinguished
            .iter()
            .map(|region| region.index().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Human-readable report text, as handed to the report sink.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl core::fmt::Display for Report {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Fire Suppression Report")?;
        writeln!(f, "- Total distance travelled: {}", self.total_distance)?;
        writeln!(f, "- Total water used: {}", self.total_water)?;
        writeln!(f, "- Total fuel used: {}", self.total_fuel)?;
        writeln!(f, "- Refuel count: {}", self.refuel_count)?;
        writeln!(f, "- Water refill count: {}", self.water_refill_count)?;
        writeln!(f, "- Extinguished fires: {}", self.extinguished_order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UsageCounters {
        UsageCounters {
            distance_travelled: 40,
            water_used: 3000,
            fuel_used: 640,
            refuel_count: 1,
            water_refill_count: 1,
            extinguished: vec![RegionId::new(3), RegionId::new(1)],
        }
    }

    #[test]
    fn copies_counters() {
        let report = Report::build(&sample());
        assert_eq!(report.total_distance, 40);
        assert_eq!(report.total_fuel, 640);
        assert_eq!(report.extinguished_order(), "3, 1");
    }

    #[test]
    fn text_lists_every_total() {
        let text = Report::build(&sample()).render();
        assert!(text.starts_with("Fire Suppression Report\n"));
        assert!(text.contains("Total distance travelled: 40"));
        assert!(text.contains("Total water used: 3000"));
        assert!(text.contains("Refuel count: 1"));
        assert!(text.contains("Extinguished fires: 3, 1"));
    }

    #[test]
    fn building_twice_is_identical() {
        let counters = sample();
        assert_eq!(
            Report::build(&counters).render(),
            Report::build(&counters).render()
        );
    }

    #[test]
    fn empty_order_renders_blank() {
        let report = Report::build(&UsageCounters::default());
        assert_eq!(report.extinguished_order(), "");
        assert!(report.render().ends_with("Extinguished fires: \n"));
    }
}
