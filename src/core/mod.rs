//! Core table modules
//!
//! - `grid`: grid builder and cell locator
//! - `edit`: legality oracle and structural mutators
//! - `options`: configuration shared by both

pub mod edit;
pub mod grid;
pub mod options;

// Re-export main types and functions from grid
pub use grid::{
    build_grid, build_grid_with_options, locate, origin, origin_position, owner, Grid, GridEntry,
    Span,
};

// Re-export main types and functions from edit
pub use edit::{
    apply, delete_column, delete_row, describe_operations, insert_column, insert_row,
    merge_above, merge_below, merge_left, merge_right, un_merge, CellOperations,
    ColumnDirection, MergeDirection, Operation, RowDirection,
};

pub use options::{EditOptions, InsertPolicy};
