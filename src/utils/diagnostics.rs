//! Table structure diagnostics
//!
//! The grid builder stops at the first structural defect. `check_table`
//! runs the same placement but keeps going, collecting every defect it
//! finds so a caller can show them all at once:
//!
//! - Overlapping cells
//! - Positions no cell covers
//! - Spans running past the table or out of their row-group
//! - Zero spans, oversized column spans and duplicate cell ids
//! - Rows that declare no cells
//!
//! ## Example
//!
//! ```rust
//! use tablemerge::diagnostics::check_table;
//! use tablemerge::Table;
//!
//! let table = Table::from_outline(["A1[2,1] A2", "B1 B2"]).unwrap();
//! let result = check_table(&table);
//! assert!(result.has_errors());
//! ```

use std::fmt;

use crate::core::grid::{populate, Defect};
use crate::core::options::EditOptions;
use crate::model::TableHost;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the table builds but may not look as intended
    Warning,
    /// Error - the table cannot be mapped to a grid
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Grid row (0-indexed)
    pub row: Option<usize>,
    /// Grid column (0-indexed)
    pub column: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            row: None,
            column: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> row R, column C
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        match (self.row, self.column) {
            (Some(row), Some(col)) => write!(f, "\n  --> row {}, column {}", row, col)?,
            (Some(row), None) => write!(f, "\n  --> row {}", row)?,
            _ => {}
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let counts = [
            (self.errors, "error"),
            (self.warnings, "warning"),
            (self.infos, "note"),
        ];
        let parts: Vec<String> = counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, noun)| format!("{} {}{}", count, noun, if *count == 1 { "" } else { "s" }))
            .collect();
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a table for structural defects with the default options
pub fn check_table<H: TableHost + ?Sized>(host: &H) -> CheckResult {
    check_table_with_options(host, EditOptions::default())
}

/// Check a table for structural defects
pub fn check_table_with_options<H: TableHost + ?Sized>(
    host: &H,
    options: EditOptions,
) -> CheckResult {
    let mut result = CheckResult::new();

    let outcome = populate(host, options, &mut |defect: Defect| {
        result.add(defect_diagnostic(&defect));
        Ok(())
    });
    match outcome {
        Ok(grid) => {
            for row in 0..host.row_count() {
                if host.cell_count(row) > 0 {
                    continue;
                }
                if grid.row(row).iter().all(|entry| entry.is_filled()) {
                    result.add(
                        Diagnostic::new(
                            DiagnosticLevel::Warning,
                            "row declares no cells and is covered entirely by row spans",
                        )
                        .with_location(row, 0)
                        .with_suggestion(
                            "renderers may drop rows without cells; shrink the spans reaching into it",
                        ),
                    );
                } else {
                    result.add(
                        Diagnostic::new(DiagnosticLevel::Info, "row declares no cells")
                            .with_location(row, 0),
                    );
                }
            }
        }
        Err(err) => result.add(Diagnostic::new(DiagnosticLevel::Error, err.to_string())),
    }

    result
        .diagnostics
        .sort_by_key(|d| (d.row, d.column, d.level));
    result
}

fn defect_diagnostic(defect: &Defect) -> Diagnostic {
    let (row, column) = defect.location();
    let suggestion = match defect {
        Defect::ZeroSpan { .. } => "use a span of at least 1",
        Defect::SpanLimit { .. } => "split the cell into narrower cells",
        Defect::NoFreeColumn { .. } | Defect::ColumnOverflow { .. } => {
            "reduce the column span or remove cells from this row"
        }
        Defect::RowOverflow { .. } => "reduce the row span or add rows below",
        Defect::GroupOverflow { .. } => "keep row spans inside their header, body or footer section",
        Defect::Overlap { .. } => "reduce the span of the cell reaching into this position",
        Defect::DuplicateCell { .. } => "give every cell its own id",
        Defect::Uncovered { .. } => "add a cell or widen a neighboring span",
    };
    Diagnostic::new(DiagnosticLevel::Error, defect.message())
        .with_location(row, column)
        .with_suggestion(suggestion)
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&diag.to_string());
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        output.push_str(if result.has_errors() {
            "\x1b[31m"
        } else if result.warnings > 0 {
            "\x1b[33m"
        } else {
            "\x1b[32m"
        });
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
