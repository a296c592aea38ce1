//! In-memory table model
//!
//! A table is an ordered list of row-groups (header, body and footer
//! sections), each holding rows of cells with row and column spans.
//! `Table` implements [`TableHost`], so every grid query and structural
//! edit in this crate can run against it directly.

use std::fmt;

use tracing::trace;

use super::host::{CellInfo, TableHost};
use super::ids::{CellId, IdGenerator};
use crate::core::grid::Span;
use crate::utils::error::{TableError, TableResult};

/// Provides the content of newly created cells
pub trait CellContent {
    /// Content for a cell created by a split or an insert
    fn placeholder() -> Self;
}

impl CellContent for String {
    fn placeholder() -> Self {
        String::new()
    }
}

/// Kind of a row-group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RowGroupKind {
    Head,
    #[default]
    Body,
    Foot,
}

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell<C = String> {
    #[cfg_attr(feature = "serde", serde(default = "CellId::random"))]
    id: CellId,
    /// Cell content
    pub content: C,
    #[cfg_attr(feature = "serde", serde(default))]
    span: Span,
    /// Whether this is a header cell; copied onto cells cloned from it
    #[cfg_attr(feature = "serde", serde(default))]
    pub header: bool,
}

impl<C> Cell<C> {
    pub fn new(content: C) -> Self {
        Self::with_span(content, 1, 1)
    }

    /// Create a cell spanning `rows` x `cols`; zero spans are clamped to 1
    pub fn with_span(content: C, rows: usize, cols: usize) -> Self {
        Self {
            id: CellId::random(),
            content,
            span: Span::new(rows, cols).clamped(),
            header: false,
        }
    }

    /// Create a header cell
    pub fn header(content: C) -> Self {
        Self {
            header: true,
            ..Self::new(content)
        }
    }

    pub fn with_id(mut self, id: CellId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn row_span(&self) -> usize {
        self.span.rows
    }

    pub fn col_span(&self) -> usize {
        self.span.cols
    }

    /// Set the span; zero spans are clamped to 1
    pub fn set_span(&mut self, span: Span) {
        self.span = span.clamped();
    }
}

/// A table row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Row<C = String> {
    pub cells: Vec<Cell<C>>,
}

impl<C> Default for Row<C> {
    fn default() -> Self {
        Self { cells: Vec::new() }
    }
}

impl<C> Row<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: Cell<C>) {
        self.cells.push(cell);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index_of(&self, id: CellId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id == id)
    }
}

impl<C> FromIterator<Cell<C>> for Row<C> {
    fn from_iter<I: IntoIterator<Item = Cell<C>>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// A contiguous section of rows
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowGroup<C = String> {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: RowGroupKind,
    pub rows: Vec<Row<C>>,
}

impl<C> RowGroup<C> {
    pub fn new(kind: RowGroupKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }
}

/// Complete table structure
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table<C = String> {
    groups: Vec<RowGroup<C>>,
    #[cfg_attr(feature = "serde", serde(skip, default))]
    ids: IdGenerator,
    #[cfg_attr(feature = "serde", serde(skip, default))]
    revision: u64,
}

impl<C> Default for Table<C> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            ids: IdGenerator::default(),
            revision: 0,
        }
    }
}

impl<C> Table<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `ids` for the cells this table creates
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// A table whose rows form a single body section
    pub fn from_rows(rows: impl IntoIterator<Item = Row<C>>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push_body(row);
        }
        table
    }

    /// Append a row to the trailing row-group of `kind`, opening a new
    /// group when the last one is of a different kind
    pub fn push_row(&mut self, kind: RowGroupKind, row: Row<C>) {
        match self.groups.last_mut() {
            Some(group) if group.kind == kind => group.rows.push(row),
            _ => {
                let mut group = RowGroup::new(kind);
                group.rows.push(row);
                self.groups.push(group);
            }
        }
        self.revision += 1;
    }

    pub fn push_header(&mut self, row: Row<C>) {
        self.push_row(RowGroupKind::Head, row);
    }

    pub fn push_body(&mut self, row: Row<C>) {
        self.push_row(RowGroupKind::Body, row);
    }

    pub fn push_footer(&mut self, row: Row<C>) {
        self.push_row(RowGroupKind::Foot, row);
    }

    /// Append a whole row-group
    pub fn push_group(&mut self, group: RowGroup<C>) {
        self.groups.push(group);
        self.revision += 1;
    }

    pub fn groups(&self) -> &[RowGroup<C>] {
        &self.groups
    }

    /// All rows in document order
    pub fn rows(&self) -> impl Iterator<Item = &Row<C>> {
        self.groups.iter().flat_map(|group| group.rows.iter())
    }

    pub fn row(&self, row: usize) -> Option<&Row<C>> {
        let (g, r) = self.locate_row(row)?;
        self.groups[g].rows.get(r)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell<C>> {
        self.rows().flat_map(|row| row.cells.iter()).find(|cell| cell.id == id)
    }

    /// Mutable access to a cell's content; spans stay under host control
    pub fn content_mut(&mut self, id: CellId) -> Option<&mut C> {
        self.groups
            .iter_mut()
            .flat_map(|group| group.rows.iter_mut())
            .flat_map(|row| row.cells.iter_mut())
            .find(|cell| cell.id == id)
            .map(|cell| &mut cell.content)
    }

    /// First cell matching `predicate`, in document order
    pub fn find(&self, predicate: impl Fn(&Cell<C>) -> bool) -> Option<&Cell<C>> {
        self.rows()
            .flat_map(|row| row.cells.iter())
            .find(|cell| predicate(cell))
    }

    /// Row index and in-row index of a cell
    pub fn position(&self, id: CellId) -> Option<(usize, usize)> {
        self.rows()
            .enumerate()
            .find_map(|(r, row)| row.index_of(id).map(|i| (r, i)))
    }

    fn locate_row(&self, row: usize) -> Option<(usize, usize)> {
        let mut remaining = row;
        for (g, group) in self.groups.iter().enumerate() {
            if remaining < group.rows.len() {
                return Some((g, remaining));
            }
            remaining -= group.rows.len();
        }
        None
    }

    fn row_mut(&mut self, row: usize) -> TableResult<&mut Row<C>> {
        let (g, r) = self
            .locate_row(row)
            .ok_or_else(|| TableError::bounds(row, 0))?;
        Ok(&mut self.groups[g].rows[r])
    }

    fn cell_mut(&mut self, id: CellId) -> TableResult<&mut Cell<C>> {
        self.groups
            .iter_mut()
            .flat_map(|group| group.rows.iter_mut())
            .flat_map(|row| row.cells.iter_mut())
            .find(|cell| cell.id == id)
            .ok_or_else(|| TableError::not_found(id))
    }

    fn insert_row_at(&mut self, row: usize, after: bool) -> TableResult<()> {
        let (g, r) = self
            .locate_row(row)
            .ok_or_else(|| TableError::bounds(row, 0))?;
        let at = if after { r + 1 } else { r };
        self.groups[g].rows.insert(at, Row::new());
        self.revision += 1;
        trace!(row, after, "inserted row shell");
        Ok(())
    }
}

impl<C: fmt::Display> Table<C> {
    /// One line per row: each cell's content, suffixed with
    /// `[rowSpan,colSpan]` when it spans; empty content prints as `_`
    pub fn outline(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| {
                        let mut text = cell.content.to_string();
                        if text.is_empty() {
                            text.push('_');
                        }
                        if !cell.span.is_unit() {
                            text.push_str(&format!("[{},{}]", cell.span.rows, cell.span.cols));
                        }
                        text
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl Table<String> {
    /// Parse the [`Table::outline`] notation into a single-body table
    ///
    /// ```
    /// use tablemerge::Table;
    ///
    /// let table = Table::from_outline(["A1[2,1] A2 A3", "B2 _"]).unwrap();
    /// assert_eq!(table.outline(), ["A1[2,1] A2 A3", "B2 _"]);
    /// ```
    pub fn from_outline<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> TableResult<Self> {
        let mut table = Table::new();
        for (r, line) in lines.into_iter().enumerate() {
            let row = line
                .as_ref()
                .split_whitespace()
                .enumerate()
                .map(|(i, token)| parse_outline_cell(token).ok_or_else(|| {
                    TableError::malformed(format!("invalid cell '{}'", token), r, i)
                }))
                .collect::<TableResult<Row>>()?;
            table.push_body(row);
        }
        Ok(table)
    }
}

fn parse_outline_cell(token: &str) -> Option<Cell> {
    let (content, span) = match token.strip_suffix(']').and_then(|t| t.rsplit_once('[')) {
        Some((content, spans)) => {
            let (rows, cols) = spans.split_once(',')?;
            let rows = rows.trim().parse::<usize>().ok().filter(|&n| n > 0)?;
            let cols = cols.trim().parse::<usize>().ok().filter(|&n| n > 0)?;
            (content, Span::new(rows, cols))
        }
        None => (token, Span::UNIT),
    };
    let content = if content == "_" { "" } else { content };
    Some(Cell::with_span(content.to_string(), span.rows, span.cols))
}

impl<C: CellContent> TableHost for Table<C> {
    fn revision(&self) -> u64 {
        self.revision
    }

    fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }

    fn row_group(&self, row: usize) -> Option<usize> {
        self.locate_row(row).map(|(g, _)| g)
    }

    fn cell_count(&self, row: usize) -> usize {
        self.row(row).map_or(0, |row| row.cells.len())
    }

    fn cell_at(&self, row: usize, index: usize) -> Option<CellInfo> {
        self.row(row)?.cells.get(index).map(|cell| CellInfo {
            id: cell.id,
            span: cell.span,
        })
    }

    fn span(&self, cell: CellId) -> TableResult<Span> {
        self.cell(cell)
            .map(|c| c.span)
            .ok_or_else(|| TableError::not_found(cell))
    }

    fn set_span(&mut self, cell: CellId, span: Span) -> TableResult<()> {
        self.cell_mut(cell)?.set_span(span);
        self.revision += 1;
        Ok(())
    }

    fn insert_cell(
        &mut self,
        row: usize,
        before: Option<CellId>,
        template: CellId,
        span: Span,
    ) -> TableResult<CellId> {
        let header = self
            .cell(template)
            .map(|cell| cell.header)
            .ok_or_else(|| TableError::not_found(template))?;
        let id = self.ids.next_id();
        let cell = Cell {
            id,
            content: C::placeholder(),
            span: span.clamped(),
            header,
        };

        let target = self.row_mut(row)?;
        let index = match before {
            Some(sibling) => target
                .index_of(sibling)
                .ok_or_else(|| TableError::not_found(sibling))?,
            None => target.cells.len(),
        };
        target.cells.insert(index, cell);
        self.revision += 1;
        trace!(%id, row, index, "inserted cell");
        Ok(id)
    }

    fn move_cell(&mut self, cell: CellId, row: usize, before: Option<CellId>) -> TableResult<()> {
        let (from_row, from_index) = self
            .position(cell)
            .ok_or_else(|| TableError::not_found(cell))?;
        if let Some(sibling) = before {
            if sibling == cell || self.row_mut(row)?.index_of(sibling).is_none() {
                return Err(TableError::not_found(sibling));
            }
        } else {
            self.row_mut(row)?;
        }

        let moved = self.row_mut(from_row)?.cells.remove(from_index);
        let target = self.row_mut(row)?;
        let index = match before {
            Some(sibling) => target
                .index_of(sibling)
                .ok_or_else(|| TableError::not_found(sibling))?,
            None => target.cells.len(),
        };
        target.cells.insert(index, moved);
        self.revision += 1;
        trace!(%cell, from_row, row, index, "moved cell");
        Ok(())
    }

    fn remove_cell(&mut self, cell: CellId) -> TableResult<()> {
        let (row, index) = self
            .position(cell)
            .ok_or_else(|| TableError::not_found(cell))?;
        self.row_mut(row)?.cells.remove(index);
        self.revision += 1;
        trace!(%cell, row, "removed cell");
        Ok(())
    }

    fn insert_row_before(&mut self, row: usize) -> TableResult<()> {
        self.insert_row_at(row, false)
    }

    fn insert_row_after(&mut self, row: usize) -> TableResult<()> {
        self.insert_row_at(row, true)
    }

    fn remove_row(&mut self, row: usize) -> TableResult<()> {
        let (g, r) = self
            .locate_row(row)
            .ok_or_else(|| TableError::bounds(row, 0))?;
        self.groups[g].rows.remove(r);
        self.revision += 1;
        trace!(row, "removed row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| Cell::new(c.to_string())).collect()
    }

    #[test]
    fn test_groups_and_global_rows() {
        let mut table = Table::new();
        table.push_header(row(&["H1", "H2"]));
        table.push_body(row(&["A1", "A2"]));
        table.push_body(row(&["B1", "B2"]));
        table.push_footer(row(&["F1", "F2"]));

        assert_eq!(table.groups().len(), 3);
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.row_group(0), Some(0));
        assert_eq!(table.row_group(2), Some(1));
        assert_eq!(table.row_group(3), Some(2));
        assert_eq!(table.row_group(4), None);
        assert_eq!(table.row(3).map(|r| r.cells[0].content.as_str()), Some("F1"));
    }

    #[test]
    fn test_outline_round_trip_and_errors() {
        let table = Table::from_outline(["A1,A2[1,2] _", "B1[2,1]"]).unwrap();
        assert_eq!(table.outline(), vec!["A1,A2[1,2] _", "B1[2,1]"]);
        assert_eq!(table.row(0).unwrap().cells[1].content, "");

        let err = Table::from_outline(["A1 A2[0,1]"]).unwrap_err();
        assert_eq!(err, TableError::malformed("invalid cell 'A2[0,1]'", 0, 1));
        assert!(Table::from_outline(["A1[2]"]).is_err());
    }

    #[test]
    fn test_zero_span_is_clamped() {
        let cell = Cell::with_span("x".to_string(), 0, 0);
        assert_eq!(cell.span(), Span::UNIT);
    }

    #[test]
    fn test_insert_cell_copies_header_flag() {
        let mut table = Table::new().with_ids(IdGenerator::sequential());
        let mut head = Row::new();
        head.push(Cell::header("H".to_string()));
        table.push_header(head);

        let template = table.row(0).unwrap().cells[0].id();
        let id = table.insert_cell(0, None, template, Span::UNIT).unwrap();
        let created = table.cell(id).unwrap();
        assert!(created.header);
        assert_eq!(created.content, "");
        assert_eq!(id, CellId::from_u128(1));
        assert_eq!(table.outline(), vec!["H _"]);
    }

    #[test]
    fn test_move_cell_within_row() {
        let mut table = Table::from_rows([row(&["A", "B", "C"])]);
        let a = table.find(|c| c.content == "A").unwrap().id();
        let c = table.find(|c| c.content == "C").unwrap().id();
        table.move_cell(a, 0, Some(c)).unwrap();
        assert_eq!(table.outline(), vec!["B A C"]);
        table.move_cell(c, 0, None).unwrap();
        assert_eq!(table.outline(), vec!["B A C"]);
    }

    #[test]
    fn test_move_cell_rejects_missing_sibling_without_detaching() {
        let mut table = Table::from_rows([row(&["A"]), row(&["B"])]);
        let a = table.find(|c| c.content == "A").unwrap().id();
        let missing = CellId::from_u128(99);
        assert_eq!(
            table.move_cell(a, 1, Some(missing)),
            Err(TableError::not_found(missing))
        );
        assert_eq!(table.outline(), vec!["A", "B"]);
    }

    #[test]
    fn test_rows_inserted_in_anchor_group() {
        let mut table = Table::new();
        table.push_header(row(&["H"]));
        table.push_body(row(&["B"]));
        table.insert_row_after(0).unwrap();
        table.insert_row_before(2).unwrap();

        assert_eq!(table.groups()[0].rows.len(), 2);
        assert_eq!(table.groups()[1].rows.len(), 2);
        assert_eq!(table.outline(), vec!["H", "", "", "B"]);
    }

    #[test]
    fn test_revision_tracks_structural_edits() {
        let mut table = Table::from_rows([row(&["A", "B"])]);
        let before = table.revision();
        let b = table.find(|c| c.content == "B").unwrap().id();
        table.remove_cell(b).unwrap();
        assert!(table.revision() > before);

        let after_remove = table.revision();
        let a = table.find(|c| c.content == "A").unwrap().id();
        *table.content_mut(a).unwrap() = "changed".to_string();
        assert_eq!(table.revision(), after_remove);
    }
}
