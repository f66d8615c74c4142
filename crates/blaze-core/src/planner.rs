//! Greedy next-target selection.
//!
//! For every burning region the planner routes a shortest path from the
//! unit's position and checks whether the ledger could cover the trip plus
//! putting the fire out:
//!
//! - fuel needed = path distance + fuel cost of one step at the current level
//! - water needed = water per level * current level
//!
//! Among feasible fires the one with the strictly shortest path wins; equal
//! distances go to the lowest region index. Unreachable fires are skipped.
//! The choice is greedy: it never looks ahead at what the remaining fires
//! will cost once this one is done.

use blaze_graph::{GraphError, Path, RegionGraph, shortest_path};
use blaze_ledger::ResourceLedger;
use blaze_types::{FireLevel, RegionId};
use tracing::debug;

use crate::error::SimulationError;
use crate::fires::FireMap;

/// A feasible fire and the path to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The burning region.
    pub region: RegionId,
    /// Its intensity when chosen.
    pub level: FireLevel,
    /// Shortest path from the unit's position.
    pub path: Path,
    /// Fuel the ledger must hold for this target to be feasible.
    pub fuel_needed: u64,
    /// Water the ledger must hold for this target to be feasible.
    pub water_needed: u64,
}

/// Choose the next fire to attack from `current`.
///
/// Returns `Ok(None)` when no burning region is both reachable and
/// affordable; the caller routes to base in that case.
///
/// # Errors
///
/// Propagates graph errors other than [`GraphError::NoPath`] and ledger
/// arithmetic overflow.
pub fn select_next_target(
    current: RegionId,
    fires: &FireMap,
    ledger: &ResourceLedger,
    graph: &RegionGraph,
) -> Result<Option<Candidate>, SimulationError> {
    let table = ledger.fire_table();
    let mut best: Option<Candidate> = None;

    for (region, level) in fires.burning() {
        let path = match shortest_path(graph, current, region) {
            Ok(path) => path,
            Err(GraphError::NoPath { .. }) => {
                debug!(%region, from = %current, "Fire unreachable, skipping");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let fuel_needed = path
            .distance()
            .checked_add(table.fuel_cost(level)?)
            .ok_or(GraphError::ArithmeticOverflow)?;
        let water_needed = table.full_water_cost(level)?;

        if ledger.fuel() < fuel_needed || ledger.water() < water_needed {
            debug!(
                %region,
                %level,
                fuel_needed,
                water_needed,
                fuel = ledger.fuel(),
                water = ledger.water(),
                "Fire not feasible"
            );
            continue;
        }

        if best
            .as_ref()
            .is_none_or(|b| path.distance() < b.path.distance())
        {
            best = Some(Candidate {
                region,
                level,
                path,
                fuel_needed,
                water_needed,
            });
        }
    }

    Ok(best)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blaze_ledger::{Capacities, FireTable};

    use super::*;

    fn r(i: usize) -> RegionId {
        RegionId::new(i)
    }

    /// Star around the base: 0-1 = 5, 0-2 = 5, 0-3 = 2; region 4 isolated.
    fn star() -> RegionGraph {
        RegionGraph::from_matrix(vec![
            vec![0, 5, 5, 2, 0],
            vec![5, 0, 0, 0, 0],
            vec![5, 0, 0, 0, 0],
            vec![2, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    fn ledger(fuel: u64, water: u64) -> ResourceLedger {
        ResourceLedger::from_parts(Capacities::default(), FireTable::default(), fuel, water)
            .unwrap()
    }

    #[test]
    fn picks_closest_feasible_fire() {
        let fires = FireMap::from_raw(&[0, 1, 1, 3, 0], 5).unwrap();
        let choice = select_next_target(r(0), &fires, &ledger(5000, 20_000), &star())
            .unwrap()
            .unwrap();
        assert_eq!(choice.region, r(3));
        assert_eq!(choice.path.distance(), 2);
        // 2 travel + 30 * 10 for one level-3 step.
        assert_eq!(choice.fuel_needed, 302);
        assert_eq!(choice.water_needed, 3000);
    }

    #[test]
    fn equal_distances_resolve_to_lowest_index() {
        let fires = FireMap::from_raw(&[0, 2, 1, 0, 0], 5).unwrap();
        let choice = select_next_target(r(0), &fires, &ledger(5000, 20_000), &star())
            .unwrap()
            .unwrap();
        assert_eq!(choice.region, r(1));
    }

    #[test]
    fn skips_fires_short_on_water() {
        // Region 3 needs 3000 water; region 1 needs 1000.
        let fires = FireMap::from_raw(&[0, 1, 0, 3, 0], 5).unwrap();
        let choice = select_next_target(r(0), &fires, &ledger(5000, 2000), &star())
            .unwrap()
            .unwrap();
        assert_eq!(choice.region, r(1));
    }

    #[test]
    fn skips_fires_short_on_fuel() {
        // Region 1 needs 5 + 100 fuel.
        let fires = FireMap::from_raw(&[0, 1, 0, 0, 0], 5).unwrap();
        assert!(
            select_next_target(r(0), &fires, &ledger(104, 20_000), &star())
                .unwrap()
                .is_none()
        );
        assert!(
            select_next_target(r(0), &fires, &ledger(105, 20_000), &star())
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn unreachable_fires_are_skipped() {
        let fires = FireMap::from_raw(&[0, 0, 0, 0, 4], 5).unwrap();
        assert!(
            select_next_target(r(0), &fires, &ledger(5000, 20_000), &star())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn nothing_burning_means_no_target() {
        let fires = FireMap::from_raw(&[0, 0, 0, 0, 0], 5).unwrap();
        assert!(
            select_next_target(r(0), &fires, &ledger(5000, 20_000), &star())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn plans_from_current_position() {
        let fires = FireMap::from_raw(&[0, 0, 1, 0, 0], 5).unwrap();
        let choice = select_next_target(r(1), &fires, &ledger(5000, 20_000), &star())
            .unwrap()
            .unwrap();
        assert_eq!(choice.path.regions(), &[r(1), r(0), r(2)]);
        assert_eq!(choice.path.distance(), 10);
    }
}
