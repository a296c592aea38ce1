//! Tests for grid construction and cell lookup

use pretty_assertions::assert_eq;

use super::*;
use crate::core::options::EditOptions;
use crate::model::{Cell, CellId, Row, Table, TableHost};
use crate::utils::error::TableError;

fn outline(lines: &[&str]) -> Table {
    Table::from_outline(lines.iter().copied()).unwrap()
}

fn id_of(table: &Table, content: &str) -> CellId {
    table.find(|c| c.content == content).unwrap().id()
}

#[test]
fn test_no_spans() {
    let table = outline(&["A1 A2 A3", "B1 B2 B3"]);
    let grid = build_grid(&table).unwrap();

    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.col_count(), 3);
    assert_eq!(grid.cell_count(), 6);
    assert_eq!(
        grid.layout(),
        vec![
            "TD[1,1,0,0] TD[1,1,0,0] TD[1,1,0,0]",
            "TD[1,1,0,0] TD[1,1,0,0] TD[1,1,0,0]",
        ]
    );
}

#[test]
fn test_colspan_fills_row() {
    let table = outline(&["A1[1,2] A3", "B1 B2 B3"]);
    let grid = build_grid(&table).unwrap();

    assert_eq!(
        grid.layout(),
        vec![
            "TD[1,2,0,0] --[1,2,0,1] TD[1,1,0,0]",
            "TD[1,1,0,0] TD[1,1,0,0] TD[1,1,0,0]",
        ]
    );
}

#[test]
fn test_rowspan_skips_filled_columns() {
    let table = outline(&["A1[2,1] A2 A3", "B2 B3"]);
    let grid = build_grid(&table).unwrap();

    assert_eq!(grid.locate(id_of(&table, "B2")).unwrap(), (1, 1));
    assert_eq!(grid.locate(id_of(&table, "B3")).unwrap(), (1, 2));
    let virtual_entry = grid.entry(1, 0).unwrap();
    assert!(virtual_entry.is_virtual());
    assert_eq!(virtual_entry.span(), Span::new(2, 1));
    assert_eq!((virtual_entry.row_offset, virtual_entry.col_offset), (1, 0));
}

#[test]
fn test_colspan_and_rowspan() {
    let table = outline(&["A1[2,2] A3", "B3", "C1 C2 C3"]);
    let grid = build_grid(&table).unwrap();

    assert_eq!(
        grid.layout(),
        vec![
            "TD[2,2,0,0] --[2,2,0,1] TD[1,1,0,0]",
            "--[2,2,1,0] --[2,2,1,1] TD[1,1,0,0]",
            "TD[1,1,0,0] TD[1,1,0,0] TD[1,1,0,0]",
        ]
    );
    assert_eq!(grid.to_string(), grid.layout().join("\n"));
}

#[test]
fn test_row_fully_covered_from_above() {
    let table = outline(&["A[2,1] B[2,1]", ""]);
    let grid = build_grid(&table).unwrap();

    assert_eq!(grid.row_count(), 2);
    assert!(grid.row(1).iter().all(|e| e.is_virtual()));
}

#[test]
fn test_empty_table() {
    let table = Table::<String>::new();
    let grid = build_grid(&table).unwrap();
    assert_eq!(grid.row_count(), 0);
    assert_eq!(grid.col_count(), 0);
    assert!(grid.layout().is_empty());
}

#[test]
fn test_rowspan_out_of_bounds() {
    let table = outline(&["A[3,1] B", "C"]);
    let err = build_grid(&table).unwrap_err();
    assert!(matches!(
        err,
        TableError::MalformedTable { row: 0, column: 0, .. }
    ));
}

#[test]
fn test_huge_spans_are_malformed() {
    let table = Table::from_rows([
        Row::from_iter([Cell::new("A".to_string())]),
        Row::from_iter([Cell::with_span("B".to_string(), usize::MAX, 1)]),
    ]);
    let err = build_grid(&table).unwrap_err();
    assert!(matches!(
        err,
        TableError::MalformedTable { row: 1, column: 0, .. }
    ));

    let table = Table::from_rows([Row::from_iter([
        Cell::with_span("A".to_string(), 1, usize::MAX),
        Cell::new("B".to_string()),
    ])]);
    let err = build_grid(&table).unwrap_err();
    assert!(matches!(
        err,
        TableError::MalformedTable { row: 0, column: 0, .. }
    ));
    assert!(err.to_string().contains("exceeds the limit of 1000"));
}

#[test]
fn test_colspan_at_limit() {
    let table = Table::from_rows([
        Row::from_iter([Cell::with_span("A".to_string(), 1, Span::MAX_COLS)]),
        Row::from_iter([Cell::with_span("B".to_string(), 1, Span::MAX_COLS)]),
    ]);
    let grid = build_grid(&table).unwrap();
    assert_eq!(grid.col_count(), Span::MAX_COLS);

    let table = Table::from_rows([Row::from_iter([Cell::with_span(
        "A".to_string(),
        1,
        Span::MAX_COLS + 1,
    )])]);
    assert!(build_grid(&table).is_err());
}

#[test]
fn test_colspan_pushed_out_of_bounds() {
    // B2 is pushed right by A1's row span and runs past the last column
    let table = outline(&["A1[2,1] A2", "B2[1,2]"]);
    let err = build_grid(&table).unwrap_err();
    assert!(matches!(
        err,
        TableError::MalformedTable { row: 1, column: 1, .. }
    ));
}

#[test]
fn test_overlapping_spans() {
    let table = outline(&["A B[2,1]", "C[1,2]"]);
    let err = build_grid(&table).unwrap_err();
    match err {
        TableError::MalformedTable {
            message,
            row,
            column,
        } => {
            assert_eq!((row, column), (1, 1));
            assert!(message.contains("overlapping"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ragged_row_is_malformed() {
    let table = outline(&["A B C", "D"]);
    let err = build_grid(&table).unwrap_err();
    match err {
        TableError::MalformedTable { message, row, column } => {
            assert_eq!((row, column), (1, 1));
            assert!(message.contains("missing cell"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_row_groups_confine_spans() {
    let mut table = Table::new();
    table.push_header(Row::from_iter([
        Cell::with_span("H".to_string(), 2, 1),
        Cell::new("H2".to_string()),
    ]));
    table.push_body(Row::from_iter([Cell::new("B2".to_string())]));

    assert!(matches!(
        build_grid(&table),
        Err(TableError::MalformedTable { row: 0, column: 0, .. })
    ));

    let grid = build_grid_with_options(&table, EditOptions::permissive()).unwrap();
    assert_eq!(grid.row_group(0), Some(0));
    assert_eq!(grid.row_group(1), Some(1));
    assert_eq!(grid.locate(id_of(&table, "B2")).unwrap(), (1, 1));
}

#[test]
fn test_grid_records_revision() {
    let table = outline(&["A"]);
    let grid = build_grid(&table).unwrap();
    assert_eq!(grid.revision(), table.revision());
}

#[test]
fn test_locate_unknown_cell() {
    let table = outline(&["A"]);
    let grid = build_grid(&table).unwrap();
    let missing = CellId::from_u128(42);
    assert_eq!(grid.locate(missing), Err(TableError::not_found(missing)));
}

#[test]
fn test_origin_of_virtual_entry() {
    let table = outline(&["A1[2,2] A3", "B3", "C1 C2 C3"]);
    let grid = build_grid(&table).unwrap();
    let a1 = id_of(&table, "A1");

    assert_eq!(origin_position(&grid, 1, 1).unwrap(), (0, 0));
    assert_eq!(grid.origin(1, 1).unwrap().cell, Some(a1));
    assert_eq!(owner(&grid, 0, 1).unwrap(), a1);
    assert_eq!(owner(&grid, 2, 1).unwrap(), id_of(&table, "C2"));
    assert_eq!(
        grid.origin(3, 0).unwrap_err(),
        TableError::bounds(3, 0)
    );
}

#[test]
fn test_next_cell_in_row() {
    let table = outline(&["A1[2,2] A3", "B3", "C1 C2 C3"]);
    let grid = build_grid(&table).unwrap();

    assert_eq!(grid.next_cell_in_row(1, 0), Some(id_of(&table, "B3")));
    assert_eq!(grid.next_cell_in_row(1, 3), None);
    assert_eq!(grid.next_cell_in_row(2, 1), Some(id_of(&table, "C2")));
}

#[test]
fn test_origin_uniqueness_and_area() {
    let table = outline(&["A[2,2] B C[3,1]", "D", "E F G"]);
    let grid = build_grid(&table).unwrap();

    for (id, (row, col)) in grid.cells() {
        let span = table.span(id).unwrap();
        let covered = (0..grid.row_count())
            .flat_map(|r| (0..grid.col_count()).map(move |c| (r, c)))
            .filter(|&(r, c)| origin_position(&grid, r, c).unwrap() == (row, col))
            .count();
        assert_eq!(covered, span.area());
    }
}
