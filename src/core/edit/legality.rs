//! Which edits are legal on a cell
//!
//! A merge is legal when the neighbor on that side is a real cell whose
//! origin lines up with ours along the shared edge and whose extent
//! across the edge matches: same row span for horizontal merges, same
//! column span for vertical ones. Anything else would leave a
//! non-rectangular cell behind. No edit may widen a cell past
//! [`Span::MAX_COLS`].

use super::operation::Operation;
use crate::core::grid::{Grid, Span};
use crate::core::options::InsertPolicy;
use crate::model::CellId;
use crate::utils::error::TableResult;

/// Edits offered for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CellOperations {
    pub merge_left: bool,
    pub merge_right: bool,
    pub merge_above: bool,
    pub merge_below: bool,
    pub un_merge: bool,
    pub insert_left: bool,
    pub insert_right: bool,
    pub insert_above: bool,
    pub insert_below: bool,
}

impl CellOperations {
    /// Whether `operation` is offered; deletes always are
    pub fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::MergeLeft => self.merge_left,
            Operation::MergeRight => self.merge_right,
            Operation::MergeAbove => self.merge_above,
            Operation::MergeBelow => self.merge_below,
            Operation::UnMerge => self.un_merge,
            Operation::InsertColumnLeft => self.insert_left,
            Operation::InsertColumnRight => self.insert_right,
            Operation::InsertRowAbove => self.insert_above,
            Operation::InsertRowBelow => self.insert_below,
            Operation::DeleteRow | Operation::DeleteColumn => true,
        }
    }

    /// The offered operations, in menu order
    pub fn offered(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|&op| self.allows(op))
            .collect()
    }
}

/// Side of a cell a merge reaches towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    Left,
    Right,
    Above,
    Below,
}

impl MergeDirection {
    pub fn operation(self) -> Operation {
        match self {
            MergeDirection::Left => Operation::MergeLeft,
            MergeDirection::Right => Operation::MergeRight,
            MergeDirection::Above => Operation::MergeAbove,
            MergeDirection::Below => Operation::MergeBelow,
        }
    }
}

/// Compute the legal edits for `cell`
pub fn describe_operations(grid: &Grid, cell: CellId) -> TableResult<CellOperations> {
    let (row, col) = grid.locate(cell)?;
    Ok(describe_at(grid, row, col))
}

/// Legal edits for the real cell whose origin is `(row, col)`
pub(crate) fn describe_at(grid: &Grid, row: usize, col: usize) -> CellOperations {
    let un_merge = grid
        .entry(row, col)
        .is_some_and(|entry| entry.is_origin() && !entry.span().is_unit());
    let (insert_left, insert_right, insert_above, insert_below) =
        match grid.options().insert_policy {
            InsertPolicy::Always => (true, true, true, true),
            InsertPolicy::Unsplit => unsplit_inserts(grid, row, col),
        };
    let right_edge = col + grid.entry(row, col).map_or(1, |entry| entry.col_span);
    let insert_left = insert_left && column_spans_can_grow(grid, col);
    let insert_right = insert_right && column_spans_can_grow(grid, right_edge);

    CellOperations {
        merge_left: merge_partner(grid, row, col, MergeDirection::Left).is_some(),
        merge_right: merge_partner(grid, row, col, MergeDirection::Right).is_some(),
        merge_above: merge_partner(grid, row, col, MergeDirection::Above).is_some(),
        merge_below: merge_partner(grid, row, col, MergeDirection::Below).is_some(),
        un_merge,
        insert_left,
        insert_right,
        insert_above,
        insert_below,
    }
}

/// Origin of the cell a merge from `(row, col)` towards `direction`
/// absorbs, or `None` when the merge is not legal
pub(crate) fn merge_partner(
    grid: &Grid,
    row: usize,
    col: usize,
    direction: MergeDirection,
) -> Option<(usize, usize)> {
    let entry = grid.entry(row, col)?;
    match direction {
        MergeDirection::Left => joins_left(grid, row, col),
        MergeDirection::Above => joins_above(grid, row, col),
        MergeDirection::Right => {
            let next = col + entry.col_span;
            if next >= grid.col_count() {
                return None;
            }
            joins_left(grid, row, next).map(|_| (row, next))
        }
        MergeDirection::Below => {
            let next = row + entry.row_span;
            if next >= grid.row_count() {
                return None;
            }
            joins_above(grid, next, col).map(|_| (next, col))
        }
    }
}

/// The cell at `(row, col)` can absorb its left neighbor
fn joins_left(grid: &Grid, row: usize, col: usize) -> Option<(usize, usize)> {
    if col == 0 {
        return None;
    }
    let cell = grid.entry(row, col).filter(|entry| entry.is_origin())?;
    let left = grid.entry(row, col - 1)?;
    if cell.row_span != left.row_span || cell.col_span + left.col_span > Span::MAX_COLS {
        return None;
    }
    let dest = col.checked_sub(left.col_span)?;
    grid.entry(row, dest)
        .filter(|entry| entry.is_origin())
        .map(|_| (row, dest))
}

/// The cell at `(row, col)` can absorb its upper neighbor
fn joins_above(grid: &Grid, row: usize, col: usize) -> Option<(usize, usize)> {
    if row == 0 {
        return None;
    }
    let cell = grid.entry(row, col).filter(|entry| entry.is_origin())?;
    let above = grid.entry(row - 1, col)?;
    if cell.col_span != above.col_span {
        return None;
    }
    let dest = row.checked_sub(above.row_span)?;
    if grid.options().confine_to_row_groups && grid.row_group(dest) != grid.row_group(row) {
        return None;
    }
    grid.entry(dest, col)
        .filter(|entry| entry.is_origin())
        .map(|_| (dest, col))
}

/// A column inserted at `boundary` widens every span running across it
fn column_spans_can_grow(grid: &Grid, boundary: usize) -> bool {
    boundary == 0
        || boundary >= grid.col_count()
        || (0..grid.row_count()).all(|r| {
            grid.entry(r, boundary)
                .map_or(true, |e| e.col_offset == 0 || e.col_span < Span::MAX_COLS)
        })
}

/// Inserts whose new boundary runs between cells rather than through one
fn unsplit_inserts(grid: &Grid, row: usize, col: usize) -> (bool, bool, bool, bool) {
    let Some(entry) = grid.entry(row, col) else {
        return (false, false, false, false);
    };
    let column_boundary_clear = |x: usize| {
        x == 0
            || x >= grid.col_count()
            || (0..grid.row_count())
                .all(|r| grid.entry(r, x).is_some_and(|e| e.col_offset == 0))
    };
    let row_boundary_clear = |y: usize| {
        y == 0
            || y >= grid.row_count()
            || grid.row(y).iter().all(|e| e.row_offset == 0)
    };

    (
        column_boundary_clear(col),
        column_boundary_clear(col + entry.col_span),
        row_boundary_clear(row),
        row_boundary_clear(row + entry.row_span),
    )
}
