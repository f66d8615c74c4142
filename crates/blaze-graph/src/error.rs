//! Error types for the `blaze-graph` crate.
//!
//! All fallible operations in this crate return `Result<_, GraphError>`.

use blaze_types::RegionId;

/// Errors that can occur while building or routing over the region graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The matrix has no rows; region 0 must always exist.
    #[error("adjacency matrix is empty")]
    Empty,

    /// A row does not have exactly as many entries as there are rows.
    #[error("adjacency matrix is not square: {rows} rows but row {row} has {columns} columns")]
    NotSquare {
        /// Number of rows in the matrix.
        rows: usize,
        /// The offending row.
        row: usize,
        /// Number of entries in that row.
        columns: usize,
    },

    /// A cell in the matrix text could not be read as a non-negative integer.
    #[error("invalid weight {value:?} at row {row}, column {column}")]
    InvalidWeight {
        /// Zero-based row of the cell.
        row: usize,
        /// Zero-based column of the cell.
        column: usize,
        /// The raw text of the cell.
        value: String,
    },

    /// A region index outside `0..N` was used.
    #[error("region {region} is out of range (graph has {count} regions)")]
    RegionOutOfRange {
        /// The requested region.
        region: RegionId,
        /// Number of regions in the graph.
        count: usize,
    },

    /// The target cannot be reached from the source.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Origin region.
        from: RegionId,
        /// Destination region.
        to: RegionId,
    },

    /// Arithmetic overflow while summing path weights.
    #[error("arithmetic overflow in path calculation")]
    ArithmeticOverflow,
}
