//! Host capability trait
//!
//! The grid builder and the mutators never touch a concrete document.
//! They read and edit the table through `TableHost`, which a DOM binding,
//! an editor model or the in-memory [`Table`](super::Table) implements.
//!
//! Rows are addressed by their index across the whole table: header,
//! body and footer rows are concatenated in document order.

use super::CellId;
use crate::core::grid::Span;
use crate::utils::error::TableResult;

/// What the grid builder needs to know about a declared cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInfo {
    pub id: CellId,
    pub span: Span,
}

/// Structural access to a table
pub trait TableHost {
    /// Structural revision; changes whenever rows or cells are edited
    fn revision(&self) -> u64;

    /// Number of rows over all row-groups
    fn row_count(&self) -> usize;

    /// Row-group index of a row
    fn row_group(&self, row: usize) -> Option<usize>;

    /// Number of declared cells in a row
    fn cell_count(&self, row: usize) -> usize;

    /// The `index`-th declared cell of a row, in document order
    fn cell_at(&self, row: usize, index: usize) -> Option<CellInfo>;

    fn span(&self, cell: CellId) -> TableResult<Span>;

    fn set_span(&mut self, cell: CellId, span: Span) -> TableResult<()>;

    /// Create a cell shaped like `template` (fresh identity, default
    /// content, the given span) and insert it into `row` before `before`,
    /// or at the end of the row when `before` is `None`.
    fn insert_cell(
        &mut self,
        row: usize,
        before: Option<CellId>,
        template: CellId,
        span: Span,
    ) -> TableResult<CellId>;

    /// Detach `cell` and re-insert it into `row` before `before`
    fn move_cell(&mut self, cell: CellId, row: usize, before: Option<CellId>) -> TableResult<()>;

    fn remove_cell(&mut self, cell: CellId) -> TableResult<()>;

    /// Insert an empty row before `row`, in the same row-group
    fn insert_row_before(&mut self, row: usize) -> TableResult<()>;

    /// Insert an empty row after `row`, in the same row-group
    fn insert_row_after(&mut self, row: usize) -> TableResult<()>;

    /// Remove a row together with any cells it still holds
    fn remove_row(&mut self, row: usize) -> TableResult<()>;
}
