//! # tablemerge
//!
//! Structural editing for tables with row and column spans.
//!
//! ## Features
//!
//! - **Grid model**: maps span-annotated rows onto a dense grid of origins and virtual entries
//! - **Legality oracle**: which merges, splits and inserts make sense on a cell
//! - **Mutators**: merge, un-merge, insert and delete rows and columns
//! - **Host trait**: edits run against any table that implements [`TableHost`]
//! - **Diagnostics**: reports every structural defect of a malformed table
//! - **WASM Support**: a `TableEditor` class for browser usage
//!
//! ## Usage Examples
//!
//! ### Asking what a cell allows
//!
//! ```rust
//! use tablemerge::{cell_operations, Operation, Table};
//!
//! let table = Table::from_outline(["A1 A2 A3", "B1 B2 B3"]).unwrap();
//! let a1 = table.find(|c| c.content == "A1").unwrap().id();
//!
//! let ops = cell_operations(&table, a1).unwrap();
//! assert!(ops.merge_right);
//! assert!(!ops.allows(Operation::MergeLeft));
//! ```
//!
//! ### Editing
//!
//! ```rust
//! use tablemerge::{edit, Operation, Table};
//!
//! let mut table = Table::from_outline(["A1 A2 A3", "B1 B2 B3"]).unwrap();
//! let a2 = table.find(|c| c.content == "A2").unwrap().id();
//!
//! edit(&mut table, Operation::MergeBelow, a2).unwrap();
//! assert_eq!(table.outline(), ["A1 A2[2,1] A3", "B1 B3"]);
//!
//! let created = edit(&mut table, Operation::UnMerge, a2).unwrap();
//! assert_eq!(created.len(), 1);
//! assert_eq!(table.outline(), ["A1 A2 A3", "B1 _ B3"]);
//! ```

/// Grid model, legality oracle and mutators
pub mod core;

/// Table model and the host trait
pub mod model;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export grid
pub use core::grid::{
    build_grid, build_grid_with_options, locate, origin, origin_position, owner, Grid, GridEntry,
    Span,
};

// Re-export edits
pub use core::edit::{
    apply, delete_column, delete_row, describe_operations, insert_column, insert_row,
    merge_above, merge_below, merge_left, merge_right, un_merge, CellOperations,
    ColumnDirection, MergeDirection, Operation, RowDirection,
};

pub use core::options::{EditOptions, InsertPolicy};

// Re-export model
pub use model::{
    Cell, CellContent, CellId, CellInfo, IdGenerator, Row, RowGroup, RowGroupKind, Table,
    TableHost,
};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{TableError, TableResult};

/// Legal operations on a cell, building a fresh grid with default options
pub fn cell_operations<H: TableHost + ?Sized>(host: &H, cell: CellId) -> TableResult<CellOperations> {
    describe_operations(&build_grid(host)?, cell)
}

/// Apply `operation` to `cell`, building a fresh grid with default options
///
/// # Returns
/// The cells the operation created, if any
pub fn edit<H: TableHost + ?Sized>(
    host: &mut H,
    operation: Operation,
    cell: CellId,
) -> TableResult<Vec<CellId>> {
    edit_with_options(host, operation, cell, EditOptions::default())
}

/// Apply `operation` to `cell` with custom options
pub fn edit_with_options<H: TableHost + ?Sized>(
    host: &mut H,
    operation: Operation,
    cell: CellId,
    options: EditOptions,
) -> TableResult<Vec<CellId>> {
    let grid = build_grid_with_options(host, options)?;
    apply(host, grid, operation, cell)
}
