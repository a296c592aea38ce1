//! Cell lookup

use super::builder::Grid;
use super::entry::GridEntry;
use crate::model::CellId;
use crate::utils::error::{TableError, TableResult};

/// Grid coordinates `(row, col)` of a real cell's origin
///
/// Fails with `CellNotFound` for cells the grid does not know, typically
/// because the grid was built before the cell was created.
pub fn locate(grid: &Grid, cell: CellId) -> TableResult<(usize, usize)> {
    grid.position_of(cell)
        .ok_or_else(|| TableError::not_found(cell))
}

/// The origin entry owning position `(row, col)`
pub fn origin(grid: &Grid, row: usize, col: usize) -> TableResult<&GridEntry> {
    let (r, c) = origin_position(grid, row, col)?;
    grid.get(r, c)
}

/// Coordinates of the origin entry owning position `(row, col)`
pub fn origin_position(grid: &Grid, row: usize, col: usize) -> TableResult<(usize, usize)> {
    let entry = grid.get(row, col)?;
    if entry.is_origin() {
        return Ok((row, col));
    }
    let r = row
        .checked_sub(entry.row_offset)
        .ok_or_else(|| TableError::bounds(row, col))?;
    let c = col
        .checked_sub(entry.col_offset)
        .ok_or_else(|| TableError::bounds(row, col))?;
    Ok((r, c))
}

/// The real cell owning position `(row, col)`
pub fn owner(grid: &Grid, row: usize, col: usize) -> TableResult<CellId> {
    origin(grid, row, col)?
        .cell
        .ok_or_else(|| TableError::bounds(row, col))
}

impl Grid {
    /// See [`locate`]
    pub fn locate(&self, cell: CellId) -> TableResult<(usize, usize)> {
        locate(self, cell)
    }

    /// See [`origin`]
    pub fn origin(&self, row: usize, col: usize) -> TableResult<&GridEntry> {
        origin(self, row, col)
    }

    /// First real cell whose origin is on `row` at or right of `from_col`
    ///
    /// This is the sibling a new cell is inserted before when it has to
    /// occupy the columns just left of `from_col`; `None` means "append".
    pub fn next_cell_in_row(&self, row: usize, from_col: usize) -> Option<CellId> {
        self.row(row)
            .iter()
            .skip(from_col)
            .find_map(|entry| entry.cell)
    }
}
