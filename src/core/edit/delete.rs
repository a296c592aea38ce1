//! Deleting a cell's row or column

use tracing::debug;

use super::locate_fresh;
use crate::core::grid::{owner, Grid, Span};
use crate::model::{CellId, TableHost};
use crate::utils::error::TableResult;

/// Remove the row holding the cell's origin
///
/// Cells that start on the row and span further down move to the next
/// row, one row shorter; cells spanning into it from above shrink by one.
pub fn delete_row<H: TableHost + ?Sized>(host: &mut H, grid: Grid, cell: CellId) -> TableResult<()> {
    let (row, _) = locate_fresh(host, &grid, cell)?;

    let mut moved = Vec::new();
    let mut shrunk = Vec::new();
    let mut c = 0;
    while c < grid.col_count() {
        let entry = grid.get(row, c)?;
        let id = owner(&grid, row, c)?;
        if entry.row_offset > 0 {
            shrunk.push((id, Span::new(entry.row_span - 1, entry.col_span)));
        } else if entry.row_span > 1 {
            grid.get(row + 1, c)?;
            let before = grid.next_cell_in_row(row + 1, c + entry.col_span);
            moved.push((id, before, Span::new(entry.row_span - 1, entry.col_span)));
        }
        c += entry.col_span - entry.col_offset;
    }
    debug!(%cell, row, moved = moved.len(), shrunk = shrunk.len(), "deleting row");

    for (id, before, span) in moved {
        host.set_span(id, span)?;
        host.move_cell(id, row + 1, before)?;
    }
    for (id, span) in shrunk {
        host.set_span(id, span)?;
    }
    host.remove_row(row)
}

/// Remove the column holding the cell's origin
///
/// Unit-width cells in the column are removed; wider cells lose one column.
pub fn delete_column<H: TableHost + ?Sized>(
    host: &mut H,
    grid: Grid,
    cell: CellId,
) -> TableResult<()> {
    let (_, col) = locate_fresh(host, &grid, cell)?;

    let mut removed = Vec::new();
    let mut shrunk = Vec::new();
    let mut r = 0;
    while r < grid.row_count() {
        let entry = grid.get(r, col)?;
        let id = owner(&grid, r, col)?;
        if entry.col_span == 1 {
            removed.push(id);
        } else {
            shrunk.push((id, Span::new(entry.row_span, entry.col_span - 1)));
        }
        r += entry.row_span - entry.row_offset;
    }
    debug!(%cell, col, removed = removed.len(), shrunk = shrunk.len(), "deleting column");

    for (id, span) in shrunk {
        host.set_span(id, span)?;
    }
    for id in removed {
        host.remove_cell(id)?;
    }
    Ok(())
}
