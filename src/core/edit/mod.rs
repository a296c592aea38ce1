//! Structural Table Edits
//!
//! The legality oracle and the mutators. Every mutator takes the host,
//! a grid built from it and a cell, and follows the same pipeline:
//!
//! ```text
//! revision check -> locate -> legality check -> plan from grid -> host edits
//! ```
//!
//! Nothing touches the host until the plan is complete, so a rejected
//! edit leaves the table as it was. The grid is consumed: after an edit
//! it describes a table that no longer exists.
//!
//! # Example
//!
//! ```
//! use tablemerge::{build_grid, describe_operations, merge_below, Table};
//!
//! let mut table = Table::from_outline(["A1 A2 A3", "B1 B2 B3"]).unwrap();
//! let a1 = table.find(|c| c.content == "A1").unwrap().id();
//!
//! let grid = build_grid(&table).unwrap();
//! assert!(describe_operations(&grid, a1).unwrap().merge_below);
//! merge_below(&mut table, grid, a1).unwrap();
//!
//! assert_eq!(table.outline(), ["A1[2,1] A2 A3", "B2 B3"]);
//! ```

mod delete;
mod insert;
mod legality;
mod merge;
mod operation;
mod split;


// Re-export public API
pub use delete::{delete_column, delete_row};
pub use insert::{insert_column, insert_row, ColumnDirection, RowDirection};
pub use legality::{describe_operations, CellOperations, MergeDirection};
pub use merge::{merge_above, merge_below, merge_left, merge_right};
pub use operation::{apply, Operation};
pub use split::un_merge;

use crate::core::grid::Grid;
use crate::model::{CellId, TableHost};
use crate::utils::error::{TableError, TableResult};

/// Locate `cell`, refusing grids built from an older revision of `host`
fn locate_fresh<H: TableHost + ?Sized>(
    host: &H,
    grid: &Grid,
    cell: CellId,
) -> TableResult<(usize, usize)> {
    if host.revision() != grid.revision() {
        return Err(TableError::StaleGrid {
            grid: grid.revision(),
            table: host.revision(),
        });
    }
    grid.locate(cell)
}
