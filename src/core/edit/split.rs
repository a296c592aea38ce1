//! Splitting a spanned cell back into unit cells

use tracing::{debug, warn};

use super::locate_fresh;
use super::operation::Operation;
use crate::core::grid::{Grid, Span};
use crate::model::{CellId, TableHost};
use crate::utils::error::{TableError, TableResult};

/// Split a `rowSpan x colSpan` cell into unit cells
///
/// The source keeps its content and becomes the top-left unit cell. New
/// cells are cloned from it with fresh identities and placeholder
/// content: `colSpan - 1` right after it, then `colSpan` on each row the
/// span covered, placed before whichever real cell follows the span on
/// that row. Returns the created cells, row by row.
pub fn un_merge<H: TableHost + ?Sized>(
    host: &mut H,
    grid: Grid,
    cell: CellId,
) -> TableResult<Vec<CellId>> {
    let (row, col) = locate_fresh(host, &grid, cell)?;
    let span = grid.get(row, col)?.span();
    if span.is_unit() {
        warn!(%cell, row, col, "un-merge rejected");
        return Err(TableError::illegal(Operation::UnMerge, cell));
    }
    // The last covered position must exist before anything is touched
    grid.get(row + span.rows - 1, col + span.cols - 1)?;

    let anchors: Vec<Option<CellId>> = (0..span.rows)
        .map(|i| grid.next_cell_in_row(row + i, col + span.cols))
        .collect();
    debug!(%cell, row, col, rows = span.rows, cols = span.cols, "un-merging cell");

    host.set_span(cell, Span::UNIT)?;
    let mut created = Vec::with_capacity(span.area() - 1);
    for (i, anchor) in anchors.into_iter().enumerate() {
        let count = if i == 0 { span.cols - 1 } else { span.cols };
        for _ in 0..count {
            created.push(host.insert_cell(row + i, anchor, cell, Span::UNIT)?);
        }
    }
    Ok(created)
}
