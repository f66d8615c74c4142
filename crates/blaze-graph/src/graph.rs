//! The region graph: regions as nodes, positive matrix cells as weighted edges.
//!
//! A [`RegionGraph`] is built once from a validated `N x N` matrix and never
//! mutated afterwards. A weight of `0` means "no edge". The matrix is
//! expected to be symmetric, but asymmetric input is accepted (with a
//! warning) and edges are then directed from row to column.

use std::collections::{BTreeSet, VecDeque};

use blaze_types::{Position, RegionId};
use tracing::{debug, warn};

use crate::error::GraphError;
use crate::layout;

/// Immutable weighted adjacency structure over regions plus their layout.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RegionGraph {
    /// Row-major weights; `weights[i][j]` is the cost of travelling i -> j.
    weights: Vec<Vec<u64>>,
    /// Display position of each region, indexed like the rows.
    positions: Vec<Position>,
}

impl RegionGraph {
    /// Build a graph from a square weight matrix.
    ///
    /// Positions are assigned with [`layout::circular`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Empty`] for a matrix with no rows, or
    /// [`GraphError::NotSquare`] if any row length differs from the row count.
    pub fn from_matrix(weights: Vec<Vec<u64>>) -> Result<Self, GraphError> {
        let rows = weights.len();
        if rows == 0 {
            return Err(GraphError::Empty);
        }
        for (row, cells) in weights.iter().enumerate() {
            if cells.len() != rows {
                return Err(GraphError::NotSquare {
                    rows,
                    row,
                    columns: cells.len(),
                });
            }
        }

        let graph = Self {
            positions: layout::circular(rows),
            weights,
        };

        if !graph.is_symmetric() {
            warn!(regions = rows, "Adjacency matrix is not symmetric; edges are directed");
        }
        debug!(
            regions = rows,
            edges = graph.edge_count(),
            "Region graph constructed"
        );

        Ok(graph)
    }

    /// Number of regions `N`.
    pub const fn region_count(&self) -> usize {
        self.weights.len()
    }

    /// Whether `region` is a valid index into this graph.
    pub const fn contains(&self, region: RegionId) -> bool {
        region.index() < self.weights.len()
    }

    /// Iterate over all region identifiers in ascending index order.
    pub fn regions(&self) -> impl Iterator<Item = RegionId> + use<> {
        (0..self.weights.len()).map(RegionId::new)
    }

    /// Check that `region` exists.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::RegionOutOfRange`] if it does not.
    pub fn check_region(&self, region: RegionId) -> Result<(), GraphError> {
        if self.contains(region) {
            Ok(())
        } else {
            Err(GraphError::RegionOutOfRange {
                region,
                count: self.weights.len(),
            })
        }
    }

    /// Weight of the direct edge `from -> to`, or `None` if there is no edge
    /// or either region is out of range.
    pub fn weight(&self, from: RegionId, to: RegionId) -> Option<u64> {
        self.weights
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
            .filter(|&w| w > 0)
    }

    /// All `(neighbor, weight)` pairs with a positive weight from `region`,
    /// in ascending neighbor order. Empty if `region` is out of range.
    pub fn neighbors(&self, region: RegionId) -> Vec<(RegionId, u64)> {
        let Some(row) = self.weights.get(region.index()) else {
            return Vec::new();
        };
        row.iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0)
            .map(|(j, &w)| (RegionId::new(j), w))
            .collect()
    }

    /// Number of positive cells in the matrix.
    pub fn edge_count(&self) -> usize {
        self.weights
            .iter()
            .map(|row| row.iter().filter(|&&w| w > 0).count())
            .sum()
    }

    /// Whether `weights[i][j] == weights[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.weights.iter().enumerate().all(|(i, row)| {
            row.iter().enumerate().all(|(j, &w)| {
                self.weights.get(j).and_then(|other| other.get(i)).copied() == Some(w)
            })
        })
    }

    /// Display position of `region`, if it exists.
    pub fn position(&self, region: RegionId) -> Option<Position> {
        self.positions.get(region.index()).copied()
    }

    /// Display position of the base (region 0).
    pub fn base_position(&self) -> Position {
        self.positions.first().copied().unwrap_or_default()
    }

    /// Set of regions reachable from `start` by following positive edges,
    /// including `start` itself. Empty if `start` is out of range.
    pub fn reachable_from(&self, start: RegionId) -> BTreeSet<RegionId> {
        let mut visited = BTreeSet::new();
        if !self.contains(start) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for (neighbor, _) in self.neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line_graph() -> RegionGraph {
        RegionGraph::from_matrix(vec![vec![0, 10, 0], vec![10, 0, 10], vec![0, 10, 0]]).unwrap()
    }

    #[test]
    fn rejects_empty_matrix() {
        assert_eq!(RegionGraph::from_matrix(Vec::new()), Err(GraphError::Empty));
    }

    #[test]
    fn rejects_non_square_matrix() {
        let err = RegionGraph::from_matrix(vec![vec![0, 1, 2], vec![1, 0, 3]]).unwrap_err();
        assert_eq!(
            err,
            GraphError::NotSquare {
                rows: 2,
                row: 0,
                columns: 3
            }
        );
    }

    #[test]
    fn rejects_ragged_row() {
        let err = RegionGraph::from_matrix(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert!(matches!(err, GraphError::NotSquare { row: 1, .. }));
    }

    #[test]
    fn single_region_graph_is_valid() {
        let graph = RegionGraph::from_matrix(vec![vec![0]]).unwrap();
        assert_eq!(graph.region_count(), 1);
        assert!(graph.neighbors(RegionId::BASE).is_empty());
    }

    #[test]
    fn neighbors_skip_zero_weights() {
        let graph = line_graph();
        assert_eq!(
            graph.neighbors(RegionId::new(1)),
            vec![(RegionId::new(0), 10), (RegionId::new(2), 10)]
        );
        assert_eq!(graph.neighbors(RegionId::new(0)), vec![(RegionId::new(1), 10)]);
        assert!(graph.neighbors(RegionId::new(9)).is_empty());
    }

    #[test]
    fn weight_lookup() {
        let graph = line_graph();
        assert_eq!(graph.weight(RegionId::new(0), RegionId::new(1)), Some(10));
        assert_eq!(graph.weight(RegionId::new(0), RegionId::new(2)), None);
        assert_eq!(graph.weight(RegionId::new(0), RegionId::new(7)), None);
    }

    #[test]
    fn symmetry_detection() {
        assert!(line_graph().is_symmetric());
        let directed = RegionGraph::from_matrix(vec![vec![0, 4], vec![0, 0]]).unwrap();
        assert!(!directed.is_symmetric());
        assert_eq!(directed.edge_count(), 1);
    }

    #[test]
    fn base_sits_at_angle_zero() {
        let graph = line_graph();
        assert_eq!(Some(graph.base_position()), graph.position(RegionId::BASE));
        let base = graph.base_position();
        assert!((base.x - 1.0).abs() < 1e-9);
        assert!(base.y.abs() < 1e-9);
        assert!(graph.position(RegionId::new(3)).is_none());
    }

    #[test]
    fn reachability() {
        let graph =
            RegionGraph::from_matrix(vec![vec![0, 2, 0], vec![2, 0, 0], vec![0, 0, 0]]).unwrap();
        let reachable = graph.reachable_from(RegionId::BASE);
        assert!(reachable.contains(&RegionId::new(1)));
        assert!(!reachable.contains(&RegionId::new(2)));
    }

    #[test]
    fn serializes_weights_and_layout() {
        let json = serde_json::to_value(line_graph()).unwrap();
        assert_eq!(json["weights"][1][2], 10);
        assert_eq!(json["positions"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["positions"][0]["x"], 1.0);
    }
}
