//! Parsing the adjacency matrix text format.
//!
//! One row per line, cells separated by commas, each cell a non-negative
//! integer weight. Surrounding whitespace on a cell is ignored, and so are
//! blank lines. Shape is checked by [`RegionGraph::from_matrix`].
//!
//! ```text
//! 0,10,0
//! 10,0,10
//! 0,10,0
//! ```

use crate::error::GraphError;
use crate::graph::RegionGraph;

/// Parse matrix text into rows of weights without checking the shape.
///
/// # Errors
///
/// Returns [`GraphError::InvalidWeight`] if a cell is not a non-negative
/// integer.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<u64>>, GraphError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(row, line)| {
            line.split(',')
                .enumerate()
                .map(|(column, cell)| {
                    let cell = cell.trim();
                    cell.parse::<u64>()
                        .map_err(|_parse| GraphError::InvalidWeight {
                            row,
                            column,
                            value: cell.to_owned(),
                        })
                })
                .collect()
        })
        .collect()
}

/// Parse matrix text and build a [`RegionGraph`] from it.
///
/// # Errors
///
/// Returns [`GraphError::InvalidWeight`] for unreadable cells, and the
/// shape errors of [`RegionGraph::from_matrix`] for a malformed matrix.
pub fn parse_graph(text: &str) -> Result<RegionGraph, GraphError> {
    RegionGraph::from_matrix(parse_rows(text)?)
}
