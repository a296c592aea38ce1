//! Merging a cell with a neighbor
//!
//! The surviving cell grows by the absorbed neighbor's span and the
//! neighbor is detached. Merging left or up also moves the survivor into
//! the neighbor's place in document order, so it keeps its own content
//! while taking over the earlier position.

use tracing::{debug, warn};

use super::legality::{merge_partner, MergeDirection};
use super::locate_fresh;
use crate::core::grid::{Grid, Span};
use crate::model::{CellId, TableHost};
use crate::utils::error::{TableError, TableResult};

pub fn merge_left<H: TableHost + ?Sized>(host: &mut H, grid: Grid, cell: CellId) -> TableResult<()> {
    merge(host, &grid, cell, MergeDirection::Left)
}

pub fn merge_right<H: TableHost + ?Sized>(host: &mut H, grid: Grid, cell: CellId) -> TableResult<()> {
    merge(host, &grid, cell, MergeDirection::Right)
}

pub fn merge_above<H: TableHost + ?Sized>(host: &mut H, grid: Grid, cell: CellId) -> TableResult<()> {
    merge(host, &grid, cell, MergeDirection::Above)
}

pub fn merge_below<H: TableHost + ?Sized>(host: &mut H, grid: Grid, cell: CellId) -> TableResult<()> {
    merge(host, &grid, cell, MergeDirection::Below)
}

fn merge<H: TableHost + ?Sized>(
    host: &mut H,
    grid: &Grid,
    cell: CellId,
    direction: MergeDirection,
) -> TableResult<()> {
    let (row, col) = locate_fresh(host, grid, cell)?;
    let Some((dest_row, dest_col)) = merge_partner(grid, row, col, direction) else {
        warn!(operation = %direction.operation(), %cell, row, col, "merge rejected");
        return Err(TableError::illegal(direction.operation(), cell));
    };

    let source = grid.get(row, col)?.span();
    let dest_entry = grid.get(dest_row, dest_col)?;
    let dest = dest_entry
        .cell
        .ok_or_else(|| TableError::bounds(dest_row, dest_col))?;
    let absorbed = dest_entry.span();
    debug!(
        operation = %direction.operation(),
        %cell,
        %dest,
        row,
        col,
        dest_row,
        dest_col,
        "merging cells"
    );

    match direction {
        MergeDirection::Left => {
            host.set_span(cell, Span::new(source.rows, source.cols + absorbed.cols))?;
            host.move_cell(cell, dest_row, Some(dest))?;
        }
        MergeDirection::Above => {
            host.set_span(cell, Span::new(source.rows + absorbed.rows, source.cols))?;
            host.move_cell(cell, dest_row, Some(dest))?;
        }
        MergeDirection::Right => {
            host.set_span(cell, Span::new(source.rows, source.cols + absorbed.cols))?;
        }
        MergeDirection::Below => {
            host.set_span(cell, Span::new(source.rows + absorbed.rows, source.cols))?;
        }
    }
    host.remove_cell(dest)
}
