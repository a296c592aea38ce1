//! Spans and grid entries

use crate::model::CellId;

/// Row and column extent of a real cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Number of rows this cell spans
    pub rows: usize,
    /// Number of columns this cell spans
    pub cols: usize,
}

impl Span {
    pub const UNIT: Span = Span { rows: 1, cols: 1 };

    /// Widest column span a cell may declare (the HTML `colspan` limit)
    pub const MAX_COLS: usize = 1000;

    pub const fn new(rows: usize, cols: usize) -> Self {
        Span { rows, cols }
    }

    pub fn is_unit(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Number of grid positions covered
    pub fn area(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Raise zero extents to 1
    pub fn clamped(self) -> Self {
        Span {
            rows: self.rows.max(1),
            cols: self.cols.max(1),
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::UNIT
    }
}

/// One position of the grid
///
/// Spans and offsets describe the owning real cell: an entry at offset
/// `(i, j)` sits `i` rows below and `j` columns right of the owner's
/// origin. Only the origin entry carries `cell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridEntry {
    pub row_span: usize,
    pub col_span: usize,
    pub row_offset: usize,
    pub col_offset: usize,
    /// The real cell, present on its origin entry only
    pub cell: Option<CellId>,
}

impl GridEntry {
    /// Whether a cell covers this position (0 spans mark unfilled entries
    /// while the grid is being built)
    pub fn is_filled(&self) -> bool {
        self.row_span != 0
    }

    /// Whether this entry is a real cell's origin
    pub fn is_origin(&self) -> bool {
        self.cell.is_some()
    }

    /// Whether this position is covered by a span but is not itself a cell
    pub fn is_virtual(&self) -> bool {
        self.is_filled() && self.cell.is_none()
    }

    pub fn span(&self) -> Span {
        Span::new(self.row_span, self.col_span)
    }

    /// Whether the owner's span ends on this entry's row
    pub fn is_bottom_edge(&self) -> bool {
        self.row_offset + 1 == self.row_span
    }

    /// Whether the owner's span ends on this entry's column
    pub fn is_right_edge(&self) -> bool {
        self.col_offset + 1 == self.col_span
    }
}
