//! Named edit operations and their dispatch

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::delete::{delete_column, delete_row};
use super::insert::{insert_column, insert_row, ColumnDirection, RowDirection};
use super::merge::{merge_above, merge_below, merge_left, merge_right};
use super::split::un_merge;
use crate::core::grid::Grid;
use crate::model::{CellId, TableHost};
use crate::utils::error::{TableError, TableResult};

/// A structural edit, named the way edit menus name them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Operation {
    MergeLeft,
    MergeRight,
    MergeAbove,
    MergeBelow,
    UnMerge,
    InsertRowAbove,
    InsertRowBelow,
    InsertColumnLeft,
    InsertColumnRight,
    DeleteRow,
    DeleteColumn,
}

impl Operation {
    /// Every operation, in menu order
    pub const ALL: [Operation; 11] = [
        Operation::MergeLeft,
        Operation::MergeRight,
        Operation::MergeAbove,
        Operation::MergeBelow,
        Operation::UnMerge,
        Operation::InsertRowAbove,
        Operation::InsertRowBelow,
        Operation::InsertColumnLeft,
        Operation::InsertColumnRight,
        Operation::DeleteRow,
        Operation::DeleteColumn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::MergeLeft => "mergeLeft",
            Operation::MergeRight => "mergeRight",
            Operation::MergeAbove => "mergeAbove",
            Operation::MergeBelow => "mergeBelow",
            Operation::UnMerge => "unMerge",
            Operation::InsertRowAbove => "insertRowAbove",
            Operation::InsertRowBelow => "insertRowBelow",
            Operation::InsertColumnLeft => "insertColumnLeft",
            Operation::InsertColumnRight => "insertColumnRight",
            Operation::DeleteRow => "deleteRow",
            Operation::DeleteColumn => "deleteColumn",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| TableError::UnknownOperation {
                name: name.to_string(),
            })
    }
}

/// Run `operation` on `cell`
///
/// Returns the cells the edit created (empty for merges and deletes).
/// The grid is consumed: rebuild it from the host before the next edit.
pub fn apply<H: TableHost + ?Sized>(
    host: &mut H,
    grid: Grid,
    operation: Operation,
    cell: CellId,
) -> TableResult<Vec<CellId>> {
    debug!(%operation, %cell, "applying operation");
    match operation {
        Operation::MergeLeft => merge_left(host, grid, cell).map(|_| Vec::new()),
        Operation::MergeRight => merge_right(host, grid, cell).map(|_| Vec::new()),
        Operation::MergeAbove => merge_above(host, grid, cell).map(|_| Vec::new()),
        Operation::MergeBelow => merge_below(host, grid, cell).map(|_| Vec::new()),
        Operation::UnMerge => un_merge(host, grid, cell),
        Operation::InsertRowAbove => insert_row(host, grid, cell, RowDirection::Above),
        Operation::InsertRowBelow => insert_row(host, grid, cell, RowDirection::Below),
        Operation::InsertColumnLeft => insert_column(host, grid, cell, ColumnDirection::Left),
        Operation::InsertColumnRight => insert_column(host, grid, cell, ColumnDirection::Right),
        Operation::DeleteRow => delete_row(host, grid, cell).map(|_| Vec::new()),
        Operation::DeleteColumn => delete_column(host, grid, cell).map(|_| Vec::new()),
    }
}
