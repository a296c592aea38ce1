//! Error handling for table edits
//!
//! This module provides a unified error type and result type for grid
//! construction, cell lookup and structural mutation.

use thiserror::Error;

use crate::core::edit::Operation;
use crate::model::CellId;

/// Table edit error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Declared spans are inconsistent with the table dimensions
    #[error("Malformed table at row {row}, column {column}: {message}")]
    MalformedTable {
        message: String,
        row: usize,
        column: usize,
    },
    /// The cell is not part of the grid (or of the table)
    #[error("Cell {cell} not found")]
    CellNotFound { cell: CellId },
    /// The legality predicate for the operation does not hold
    #[error("Operation '{operation}' is not legal on cell {cell}")]
    IllegalOperation { operation: Operation, cell: CellId },
    /// An index computation left the grid; span bookkeeping is broken
    #[error("Grid position out of bounds: row {row}, column {column}")]
    GridBounds { row: usize, column: usize },
    /// The table changed after the grid was built
    #[error("Stale grid: built from revision {grid}, table is at revision {table}")]
    StaleGrid { grid: u64, table: u64 },
    /// Operation name that does not parse
    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn malformed(message: impl Into<String>, row: usize, column: usize) -> Self {
        TableError::MalformedTable {
            message: message.into(),
            row,
            column,
        }
    }

    pub fn not_found(cell: CellId) -> Self {
        TableError::CellNotFound { cell }
    }

    pub fn illegal(operation: Operation, cell: CellId) -> Self {
        TableError::IllegalOperation { operation, cell }
    }

    pub fn bounds(row: usize, column: usize) -> Self {
        TableError::GridBounds { row, column }
    }

    /// Whether rebuilding the grid could make the call succeed
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            TableError::StaleGrid { .. } | TableError::CellNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = TableError::malformed("overlapping cells", 2, 1);
        let msg = err.to_string();
        assert!(msg.contains("row 2"));
        assert!(msg.contains("column 1"));
        assert!(msg.contains("overlapping cells"));
    }

    #[test]
    fn test_illegal_operation_display() {
        let cell = CellId::from_u128(7);
        let err = TableError::illegal(Operation::MergeLeft, cell);
        let msg = err.to_string();
        assert!(msg.contains("mergeLeft"));
        assert!(msg.contains(&cell.to_string()));
    }

    #[test]
    fn test_is_stale() {
        assert!(TableError::not_found(CellId::from_u128(1)).is_stale());
        assert!(TableError::StaleGrid { grid: 1, table: 2 }.is_stale());
        assert!(!TableError::bounds(0, 0).is_stale());
    }
}
