//! Grid construction
//!
//! Rows are walked top to bottom and each row's declared cells left to
//! right. A column cursor skips positions already filled by row spans
//! from earlier rows; each cell's origin lands on the first free column
//! and its whole `rowSpan x colSpan` rectangle is filled before the
//! cursor advances by its column span.

use std::fmt;

use fxhash::FxHashMap;
use tracing::trace;

use super::entry::{GridEntry, Span};
use crate::core::options::EditOptions;
use crate::model::{CellId, TableHost};
use crate::utils::error::{TableError, TableResult};

/// Dense snapshot of a table's logical layout
///
/// Built from a host at one revision. Any structural edit to the host
/// makes the grid stale: rebuild before the next query or mutation.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    entries: Vec<GridEntry>,
    groups: Vec<usize>,
    index: FxHashMap<CellId, (usize, usize)>,
    revision: u64,
    options: EditOptions,
}

impl Grid {
    fn empty(
        rows: usize,
        cols: usize,
        groups: Vec<usize>,
        revision: u64,
        options: EditOptions,
    ) -> TableResult<Self> {
        let size = rows.checked_mul(cols).ok_or_else(|| {
            TableError::malformed(format!("{} x {} grid is too large", rows, cols), 0, 0)
        })?;
        Ok(Grid {
            rows,
            cols,
            entries: vec![GridEntry::default(); size],
            groups,
            index: FxHashMap::default(),
            revision,
            options,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// Host revision this grid was built from
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    /// Row-group index of a grid row
    pub fn row_group(&self, row: usize) -> Option<usize> {
        self.groups.get(row).copied()
    }

    pub fn entry(&self, row: usize, col: usize) -> Option<&GridEntry> {
        if row < self.rows && col < self.cols {
            self.entries.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Like [`Grid::entry`], failing with `GridBounds`
    pub fn get(&self, row: usize, col: usize) -> TableResult<&GridEntry> {
        self.entry(row, col).ok_or_else(|| TableError::bounds(row, col))
    }

    /// Entries of one row, left to right
    pub fn row(&self, row: usize) -> &[GridEntry] {
        if row < self.rows {
            &self.entries[row * self.cols..(row + 1) * self.cols]
        } else {
            &[]
        }
    }

    /// Real cells and their origin positions, in no particular order
    pub fn cells(&self) -> impl Iterator<Item = (CellId, (usize, usize))> + '_ {
        self.index.iter().map(|(id, pos)| (*id, *pos))
    }

    /// Number of real cells
    pub fn cell_count(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn position_of(&self, cell: CellId) -> Option<(usize, usize)> {
        self.index.get(&cell).copied()
    }

    /// One string per row: `TD[rowSpan,colSpan,rowOffset,colOffset]` for
    /// real cells, `--[...]` for virtual entries
    pub fn layout(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .map(|entry| {
                        let tag = if entry.is_origin() { "TD" } else { "--" };
                        format!(
                            "{}[{},{},{},{}]",
                            tag, entry.row_span, entry.col_span, entry.row_offset, entry.col_offset
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn entry_mut(&mut self, row: usize, col: usize) -> &mut GridEntry {
        &mut self.entries[row * self.cols + col]
    }

    /// Last row of the row-group `row` belongs to
    fn group_end(&self, row: usize) -> usize {
        let group = self.groups[row];
        let mut end = row;
        while end + 1 < self.rows && self.groups[end + 1] == group {
            end += 1;
        }
        end
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.layout().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Structural problems found while placing cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Defect {
    ZeroSpan { row: usize, column: usize },
    SpanLimit { row: usize, column: usize, cols: usize },
    NoFreeColumn { row: usize, column: usize },
    RowOverflow { row: usize, column: usize, rows: usize },
    ColumnOverflow { row: usize, column: usize, cols: usize },
    GroupOverflow { row: usize, column: usize, rows: usize },
    Overlap { row: usize, column: usize },
    DuplicateCell { row: usize, column: usize, cell: CellId },
    Uncovered { row: usize, column: usize },
}

impl Defect {
    pub(crate) fn location(&self) -> (usize, usize) {
        match *self {
            Defect::ZeroSpan { row, column }
            | Defect::SpanLimit { row, column, .. }
            | Defect::NoFreeColumn { row, column }
            | Defect::RowOverflow { row, column, .. }
            | Defect::ColumnOverflow { row, column, .. }
            | Defect::GroupOverflow { row, column, .. }
            | Defect::Overlap { row, column }
            | Defect::DuplicateCell { row, column, .. }
            | Defect::Uncovered { row, column } => (row, column),
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            Defect::ZeroSpan { .. } => "cell declares a zero span".to_string(),
            Defect::SpanLimit { cols, .. } => format!(
                "column span of {} exceeds the limit of {}",
                cols,
                Span::MAX_COLS
            ),
            Defect::NoFreeColumn { .. } => "cell has no free column left in its row".to_string(),
            Defect::RowOverflow { rows, .. } => {
                format!("row span extends past the last row (table has {} rows)", rows)
            }
            Defect::ColumnOverflow { cols, .. } => {
                format!("column span extends past the last column (table has {} columns)", cols)
            }
            Defect::GroupOverflow { rows, .. } => format!(
                "row span extends past the end of its row-group ({} rows available)",
                rows
            ),
            Defect::Overlap { .. } => "overlapping cells".to_string(),
            Defect::DuplicateCell { cell, .. } => format!("cell {} is declared twice", cell),
            Defect::Uncovered { .. } => "missing cell".to_string(),
        }
    }

    pub(crate) fn into_error(self) -> TableError {
        let (row, column) = self.location();
        TableError::malformed(self.message(), row, column)
    }
}

/// Build a grid with default options
///
/// Fails with `MalformedTable` when declared spans overlap, leave the
/// table (or their row-group) or leave a position uncovered.
pub fn build_grid<H: TableHost + ?Sized>(host: &H) -> TableResult<Grid> {
    build_grid_with_options(host, EditOptions::default())
}

/// Build a grid with custom options
pub fn build_grid_with_options<H: TableHost + ?Sized>(
    host: &H,
    options: EditOptions,
) -> TableResult<Grid> {
    populate(host, options, &mut |defect: Defect| Err(defect.into_error()))
}

/// Place every declared cell, handing each defect to `report`
///
/// When `report` returns `Ok`, construction carries on past the defect:
/// conflicting positions are left to whichever cell claimed them first.
pub(crate) fn populate<H: TableHost + ?Sized>(
    host: &H,
    options: EditOptions,
    report: &mut dyn FnMut(Defect) -> TableResult<()>,
) -> TableResult<Grid> {
    let rows = host.row_count();
    // Spans over the limit are reported during placement and only count
    // up to it here
    let cols = (0..rows)
        .map(|row| {
            declared_cells(host, row).fold(0usize, |width, (_, span)| {
                width.saturating_add(span.cols.min(Span::MAX_COLS))
            })
        })
        .max()
        .unwrap_or(0);
    let groups = (0..rows)
        .map(|row| host.row_group(row).unwrap_or(0))
        .collect();

    let mut grid = Grid::empty(rows, cols, groups, host.revision(), options)?;
    trace!(rows, cols, "building grid");

    for row in 0..rows {
        let mut col = 0;
        for (id, span) in declared_cells(host, row) {
            // Skip positions filled by row spans from above
            while col < cols && grid.entry_mut(row, col).is_filled() {
                col += 1;
            }
            if col >= cols {
                report(Defect::NoFreeColumn { row, column: col })?;
                break;
            }
            if span.rows == 0 || span.cols == 0 {
                report(Defect::ZeroSpan { row, column: col })?;
                col = col.saturating_add(span.cols.clamp(1, Span::MAX_COLS));
                continue;
            }
            if span.cols > Span::MAX_COLS {
                report(Defect::SpanLimit {
                    row,
                    column: col,
                    cols: span.cols,
                })?;
                col = col.saturating_add(Span::MAX_COLS);
                continue;
            }
            if grid.index.contains_key(&id) {
                report(Defect::DuplicateCell {
                    row,
                    column: col,
                    cell: id,
                })?;
                col = col.saturating_add(span.cols);
                continue;
            }

            let mut last_row = row.saturating_add(span.rows - 1);
            if last_row >= rows {
                report(Defect::RowOverflow {
                    row,
                    column: col,
                    rows,
                })?;
                last_row = rows - 1;
            }
            if options.confine_to_row_groups {
                let group_end = grid.group_end(row);
                if last_row > group_end {
                    report(Defect::GroupOverflow {
                        row,
                        column: col,
                        rows: group_end - row + 1,
                    })?;
                    last_row = group_end;
                }
            }
            let mut last_col = col.saturating_add(span.cols - 1);
            if last_col >= cols {
                report(Defect::ColumnOverflow {
                    row,
                    column: col,
                    cols,
                })?;
                last_col = cols - 1;
            }

            for r in row..=last_row {
                for c in col..=last_col {
                    if grid.entry_mut(r, c).is_filled() {
                        report(Defect::Overlap { row: r, column: c })?;
                        continue;
                    }
                    *grid.entry_mut(r, c) = GridEntry {
                        row_span: span.rows,
                        col_span: span.cols,
                        row_offset: r - row,
                        col_offset: c - col,
                        cell: None,
                    };
                }
            }
            grid.entry_mut(row, col).cell = Some(id);
            grid.index.insert(id, (row, col));
            trace!(%id, row, col, rows = span.rows, cols = span.cols, "placed cell");

            col = col.saturating_add(span.cols);
        }
    }

    for row in 0..rows {
        for col in 0..cols {
            if !grid.entry_mut(row, col).is_filled() {
                report(Defect::Uncovered { row, column: col })?;
            }
        }
    }

    Ok(grid)
}

fn declared_cells<H: TableHost + ?Sized>(
    host: &H,
    row: usize,
) -> impl Iterator<Item = (CellId, Span)> + '_ {
    (0..host.cell_count(row))
        .filter_map(move |index| host.cell_at(row, index))
        .map(|info| (info.id, info.span))
}
