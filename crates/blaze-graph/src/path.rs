//! Single-source shortest paths over the region graph.
//!
//! Uses Dijkstra's algorithm with a dense `O(N^2)` scan instead of a
//! priority queue: region counts are small and the linear scan gives a
//! stable tie-break (lowest index wins among equal tentative distances).
//! The routine holds no state between calls.

use std::collections::VecDeque;

use blaze_types::RegionId;

use crate::error::GraphError;
use crate::graph::RegionGraph;

/// A shortest path from a source region to a target region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Regions from source to target, both inclusive.
    regions: Vec<RegionId>,
    /// Sum of edge weights along the path.
    distance: u64,
}

impl Path {
    /// Regions from source to target, both inclusive.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// Total weight of the path.
    pub const fn distance(&self) -> u64 {
        self.distance
    }

    /// The waypoints still to visit when standing on the source: every
    /// region after the first, in travel order.
    pub fn into_waypoints(self) -> VecDeque<RegionId> {
        self.regions.into_iter().skip(1).collect()
    }
}

/// Compute the shortest path from `source` to `target`.
///
/// A path from a region to itself is `[source]` with distance 0.
///
/// # Errors
///
/// Returns [`GraphError::RegionOutOfRange`] if either endpoint does not
/// exist, [`GraphError::NoPath`] if `target` is unreachable, or
/// [`GraphError::ArithmeticOverflow`] if a path weight overflows `u64`.
pub fn shortest_path(
    graph: &RegionGraph,
    source: RegionId,
    target: RegionId,
) -> Result<Path, GraphError> {
    graph.check_region(source)?;
    graph.check_region(target)?;

    if source == target {
        return Ok(Path {
            regions: vec![source],
            distance: 0,
        });
    }

    let count = graph.region_count();
    // `None` stands for an infinite tentative distance.
    let mut dist: Vec<Option<u64>> = vec![None; count];
    let mut prev: Vec<Option<RegionId>> = vec![None; count];
    let mut visited = vec![false; count];

    if let Some(d) = dist.get_mut(source.index()) {
        *d = Some(0);
    }

    // Each pass settles one vertex: the unvisited one with the smallest
    // finite distance, lowest index first on ties.
    loop {
        let next = dist
            .iter()
            .zip(&visited)
            .enumerate()
            .filter(|&(_, (_, &done))| !done)
            .filter_map(|(i, (d, _))| d.map(|d| (d, i)))
            .min();
        let Some((current_dist, current)) = next else {
            break;
        };

        if let Some(done) = visited.get_mut(current) {
            *done = true;
        }

        for (neighbor, weight) in graph.neighbors(RegionId::new(current)) {
            if visited.get(neighbor.index()).copied().unwrap_or(true) {
                continue;
            }
            let candidate = current_dist
                .checked_add(weight)
                .ok_or(GraphError::ArithmeticOverflow)?;

            if let (Some(slot), Some(pred)) = (
                dist.get_mut(neighbor.index()),
                prev.get_mut(neighbor.index()),
            ) && slot.is_none_or(|existing| candidate < existing)
            {
                *slot = Some(candidate);
                *pred = Some(RegionId::new(current));
            }
        }
    }

    let no_path = GraphError::NoPath {
        from: source,
        to: target,
    };
    let distance = dist
        .get(target.index())
        .copied()
        .flatten()
        .ok_or_else(|| no_path.clone())?;

    // Walk predecessor links back to the source, then reverse.
    let mut regions = vec![target];
    let mut current = target;
    while current != source {
        current = prev
            .get(current.index())
            .copied()
            .flatten()
            .ok_or_else(|| no_path.clone())?;
        regions.push(current);
    }
    regions.reverse();

    Ok(Path { regions, distance })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn r(i: usize) -> RegionId {
        RegionId::new(i)
    }

    fn graph(rows: Vec<Vec<u64>>) -> RegionGraph {
        RegionGraph::from_matrix(rows).unwrap()
    }

    /// Minimum path weight by exhaustive enumeration of simple paths.
    fn brute_force(g: &RegionGraph, from: RegionId, to: RegionId) -> Option<u64> {
        fn walk(
            g: &RegionGraph,
            at: RegionId,
            to: RegionId,
            seen: &mut Vec<RegionId>,
            cost: u64,
            best: &mut Option<u64>,
        ) {
            if at == to {
                *best = Some(best.map_or(cost, |b| b.min(cost)));
                return;
            }
            for (next, w) in g.neighbors(at) {
                if seen.contains(&next) {
                    continue;
                }
                seen.push(next);
                walk(g, next, to, seen, cost + w, best);
                seen.pop();
            }
        }
        let mut best = None;
        walk(g, from, to, &mut vec![from], 0, &mut best);
        best
    }

    #[test]
    fn path_to_self_is_trivial() {
        let g = graph(vec![vec![0, 3], vec![3, 0]]);
        for region in g.regions() {
            let path = shortest_path(&g, region, region).unwrap();
            assert_eq!(path.regions(), &[region]);
            assert_eq!(path.distance(), 0);
        }
    }

    #[test]
    fn prefers_cheaper_indirect_route() {
        // 0-1: 3, 1-2: 5, 0-2: 10
        let g = graph(vec![vec![0, 3, 10], vec![3, 0, 5], vec![10, 5, 0]]);
        let path = shortest_path(&g, r(0), r(2)).unwrap();
        assert_eq!(path.regions(), &[r(0), r(1), r(2)]);
        assert_eq!(path.distance(), 8);
    }

    #[test]
    fn ties_resolve_through_lowest_index() {
        // Two equal routes 0-1-3 and 0-2-3; region 1 settles first.
        let g = graph(vec![
            vec![0, 1, 1, 0],
            vec![1, 0, 0, 1],
            vec![1, 0, 0, 1],
            vec![0, 1, 1, 0],
        ]);
        let path = shortest_path(&g, r(0), r(3)).unwrap();
        assert_eq!(path.regions(), &[r(0), r(1), r(3)]);
    }

    #[test]
    fn unreachable_target_is_an_error() {
        let g = graph(vec![vec![0, 2, 0], vec![2, 0, 0], vec![0, 0, 0]]);
        assert_eq!(
            shortest_path(&g, r(0), r(2)),
            Err(GraphError::NoPath { from: r(0), to: r(2) })
        );
    }

    #[test]
    fn directed_edges_are_respected() {
        let g = graph(vec![vec![0, 4], vec![0, 0]]);
        assert!(shortest_path(&g, r(0), r(1)).is_ok());
        assert!(shortest_path(&g, r(1), r(0)).is_err());
    }

    #[test]
    fn out_of_range_endpoint() {
        let g = graph(vec![vec![0]]);
        assert!(matches!(
            shortest_path(&g, r(0), r(5)),
            Err(GraphError::RegionOutOfRange { .. })
        ));
    }

    #[test]
    fn waypoints_exclude_the_source() {
        let g = graph(vec![vec![0, 10, 0], vec![10, 0, 10], vec![0, 10, 0]]);
        let path = shortest_path(&g, r(0), r(2)).unwrap();
        assert_eq!(path.regions(), &[r(0), r(1), r(2)]);
        assert_eq!(path.into_waypoints(), VecDeque::from(vec![r(1), r(2)]));
    }

    #[test]
    fn repeated_calls_agree() {
        let g = graph(vec![vec![0, 7, 2], vec![7, 0, 1], vec![2, 1, 0]]);
        let first = shortest_path(&g, r(0), r(1)).unwrap();
        let second = shortest_path(&g, r(0), r(1)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.distance(), 3);
    }

    #[test]
    fn matches_brute_force_on_small_graphs() {
        // Deterministic pseudo-random matrices with N up to 6.
        let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for n in 1..=6_usize {
            for _ in 0..20 {
                let mut rows = vec![vec![0_u64; n]; n];
                for i in 0..n {
                    for j in (i + 1)..n {
                        // Roughly 40% of pairs have no edge.
                        let roll = next() % 10;
                        let w = if roll < 4 { 0 } else { next() % 20 + 1 };
                        rows[i][j] = w;
                        rows[j][i] = w;
                    }
                }
                let g = graph(rows);
                for from in g.regions() {
                    for to in g.regions() {
                        let expected = brute_force(&g, from, to);
                        let actual = shortest_path(&g, from, to).ok().map(|p| p.distance());
                        assert_eq!(actual, expected, "n={n} from={from} to={to}");
                    }
                }
            }
        }
    }

    #[test]
    fn path_weight_equals_sum_of_edges() {
        let g = graph(vec![
            vec![0, 4, 0, 9],
            vec![4, 0, 2, 0],
            vec![0, 2, 0, 1],
            vec![9, 0, 1, 0],
        ]);
        let path = shortest_path(&g, r(0), r(3)).unwrap();
        let summed: u64 = path
            .regions()
            .windows(2)
            .map(|pair| g.weight(pair[0], pair[1]).unwrap())
            .sum();
        assert_eq!(summed, path.distance());
        assert_eq!(path.distance(), 7);
    }
}
