//! Inserting rows and columns next to a cell
//!
//! Walking the boundary the new line is inserted at, each cell that is
//! exposed on that side is cloned into the new line (fresh identity,
//! placeholder content, the same extent along the line). A cell whose
//! span runs across the boundary grows by one instead.

use tracing::{debug, warn};

use super::legality::describe_at;
use super::locate_fresh;
use super::operation::Operation;
use crate::core::grid::{origin_position, Grid, Span};
use crate::model::{CellId, TableHost};
use crate::utils::error::{TableError, TableResult};

/// Where a new row goes relative to the cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDirection {
    Above,
    Below,
}

/// Where a new column goes relative to the cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDirection {
    Left,
    Right,
}

impl RowDirection {
    pub fn operation(self) -> Operation {
        match self {
            RowDirection::Above => Operation::InsertRowAbove,
            RowDirection::Below => Operation::InsertRowBelow,
        }
    }
}

impl ColumnDirection {
    pub fn operation(self) -> Operation {
        match self {
            ColumnDirection::Left => Operation::InsertColumnLeft,
            ColumnDirection::Right => Operation::InsertColumnRight,
        }
    }
}

/// Insert a row above the cell's top edge or below its bottom edge
///
/// The new row joins the row-group of the row it is inserted next to.
/// Returns the cells created in it, left to right.
pub fn insert_row<H: TableHost + ?Sized>(
    host: &mut H,
    grid: Grid,
    cell: CellId,
    direction: RowDirection,
) -> TableResult<Vec<CellId>> {
    let (row, col) = locate_fresh(host, &grid, cell)?;
    let ops = describe_at(&grid, row, col);
    let allowed = match direction {
        RowDirection::Above => ops.insert_above,
        RowDirection::Below => ops.insert_below,
    };
    if !allowed {
        warn!(operation = %direction.operation(), %cell, row, col, "insert rejected");
        return Err(TableError::illegal(direction.operation(), cell));
    }

    let target = match direction {
        RowDirection::Above => row,
        RowDirection::Below => row + grid.get(row, col)?.row_span - 1,
    };

    let mut clones = Vec::new();
    let mut grown = Vec::new();
    let mut c = 0;
    while c < grid.col_count() {
        let entry = grid.get(target, c)?;
        let (origin_row, origin_col) = origin_position(&grid, target, c)?;
        let owner = grid
            .get(origin_row, origin_col)?
            .cell
            .ok_or_else(|| TableError::bounds(origin_row, origin_col))?;
        let exposed = match direction {
            RowDirection::Above => entry.row_offset == 0,
            RowDirection::Below => entry.is_bottom_edge(),
        };
        if exposed {
            clones.push((owner, Span::new(1, entry.col_span)));
        } else {
            grown.push((owner, Span::new(entry.row_span + 1, entry.col_span)));
        }
        c += entry.col_span - entry.col_offset;
    }
    debug!(
        operation = %direction.operation(),
        %cell,
        target,
        cloned = clones.len(),
        grown = grown.len(),
        "inserting row"
    );

    let new_row = match direction {
        RowDirection::Above => {
            host.insert_row_before(target)?;
            target
        }
        RowDirection::Below => {
            host.insert_row_after(target)?;
            target + 1
        }
    };
    for (owner, span) in grown {
        host.set_span(owner, span)?;
    }
    clones
        .into_iter()
        .map(|(template, span)| host.insert_cell(new_row, None, template, span))
        .collect()
}

/// Insert a column left of the cell's left edge or right of its right edge
///
/// Returns the cells created in it, top to bottom.
pub fn insert_column<H: TableHost + ?Sized>(
    host: &mut H,
    grid: Grid,
    cell: CellId,
    direction: ColumnDirection,
) -> TableResult<Vec<CellId>> {
    let (row, col) = locate_fresh(host, &grid, cell)?;
    let ops = describe_at(&grid, row, col);
    let allowed = match direction {
        ColumnDirection::Left => ops.insert_left,
        ColumnDirection::Right => ops.insert_right,
    };
    if !allowed {
        warn!(operation = %direction.operation(), %cell, row, col, "insert rejected");
        return Err(TableError::illegal(direction.operation(), cell));
    }

    let target = match direction {
        ColumnDirection::Left => col,
        ColumnDirection::Right => col + grid.get(row, col)?.col_span - 1,
    };

    let mut clones = Vec::new();
    let mut grown = Vec::new();
    let mut r = 0;
    while r < grid.row_count() {
        let entry = grid.get(r, target)?;
        let (origin_row, origin_col) = origin_position(&grid, r, target)?;
        let owner = grid
            .get(origin_row, origin_col)?
            .cell
            .ok_or_else(|| TableError::bounds(origin_row, origin_col))?;
        let exposed = match direction {
            ColumnDirection::Left => entry.col_offset == 0,
            ColumnDirection::Right => entry.is_right_edge(),
        };
        if exposed {
            let before = match direction {
                ColumnDirection::Left => Some(owner),
                ColumnDirection::Right => {
                    grid.next_cell_in_row(origin_row, origin_col + entry.col_span)
                }
            };
            clones.push((origin_row, before, owner, Span::new(entry.row_span, 1)));
        } else {
            grown.push((owner, Span::new(entry.row_span, entry.col_span + 1)));
        }
        r += entry.row_span - entry.row_offset;
    }
    debug!(
        operation = %direction.operation(),
        %cell,
        target,
        cloned = clones.len(),
        grown = grown.len(),
        "inserting column"
    );

    for (owner, span) in grown {
        host.set_span(owner, span)?;
    }
    clones
        .into_iter()
        .map(|(row, before, template, span)| host.insert_cell(row, before, template, span))
        .collect()
}
