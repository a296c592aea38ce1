//! WASM bindings for tablemerge
//!
//! A `TableEditor` JavaScript class holding one table. The page asks it for
//! the operations legal on a cell, applies the one the user picks and reads
//! the table back.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::core::edit::{apply, describe_operations, Operation};
use crate::core::grid::{build_grid_with_options, Grid};
use crate::core::options::{EditOptions, InsertPolicy};
use crate::diagnostics::{check_table_with_options, DiagnosticLevel};
use crate::model::{CellId, Table};
use crate::utils::error::TableError;

/// Editor options (exposed to WASM)
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    /// Only offer inserts that do not cut through a spanned cell
    #[serde(default)]
    pub unsplit_inserts: bool,
    /// Keep spans and vertical merges inside their row-group
    #[serde(default = "default_true")]
    pub confine_to_row_groups: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            unsplit_inserts: false,
            confine_to_row_groups: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl From<EditorOptions> for EditOptions {
    fn from(opts: EditorOptions) -> Self {
        EditOptions {
            insert_policy: if opts.unsplit_inserts {
                InsertPolicy::Unsplit
            } else {
                InsertPolicy::Always
            },
            confine_to_row_groups: opts.confine_to_row_groups,
        }
    }
}

/// Summary of table check results
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(err: TableError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_cell(id: &str) -> Result<CellId, JsValue> {
    CellId::parse(id).ok_or_else(|| JsValue::from_str(&format!("Invalid cell id: {}", id)))
}

/// An editable table
#[wasm_bindgen]
pub struct TableEditor {
    table: Table,
    options: EditOptions,
}

#[wasm_bindgen]
impl TableEditor {
    /// Build an editor from a plain table description:
    /// `{ groups: [{ kind: "body", rows: [[{ content, span: { rows, cols } }]] }] }`
    #[wasm_bindgen(constructor)]
    pub fn new(value: JsValue, options: JsValue) -> Result<TableEditor, JsValue> {
        let table: Table = serde_wasm_bindgen::from_value(value)?;
        let opts: EditorOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
        let editor = TableEditor {
            table,
            options: opts.into(),
        };
        // Reject malformed input up front
        editor.grid()?;
        Ok(editor)
    }

    fn grid(&self) -> Result<Grid, JsValue> {
        build_grid_with_options(&self.table, self.options).map_err(js_error)
    }

    /// Ids of all cells, in document order
    #[wasm_bindgen(js_name = "cellIds")]
    pub fn cell_ids(&self) -> Vec<String> {
        self.table
            .rows()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.id().to_string())
            .collect()
    }

    /// Legal operations on a cell, as an object of booleans
    pub fn operations(&self, id: &str) -> Result<JsValue, JsValue> {
        let cell = parse_cell(id)?;
        let ops = describe_operations(&self.grid()?, cell).map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&ops)?)
    }

    /// Names of the legal operations on a cell, in menu order
    #[wasm_bindgen(js_name = "offeredOperations")]
    pub fn offered_operations(&self, id: &str) -> Result<Vec<String>, JsValue> {
        let cell = parse_cell(id)?;
        let ops = describe_operations(&self.grid()?, cell).map_err(js_error)?;
        Ok(ops.offered().iter().map(|op| op.name().to_string()).collect())
    }

    /// Apply an operation by name; returns the ids of any cells it created
    pub fn apply(&mut self, operation: &str, id: &str) -> Result<Vec<String>, JsValue> {
        let operation: Operation = operation.parse().map_err(js_error)?;
        let cell = parse_cell(id)?;
        let grid = self.grid()?;
        let created = apply(&mut self.table, grid, operation, cell).map_err(js_error)?;
        Ok(created.iter().map(CellId::to_string).collect())
    }

    /// The grid as text, one line per row
    pub fn layout(&self) -> Result<Vec<String>, JsValue> {
        Ok(self.grid()?.layout())
    }

    /// The table in the same shape the constructor accepts
    #[wasm_bindgen(js_name = "toValue")]
    pub fn to_value(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.table)?)
    }

    /// Replace a cell's content
    #[wasm_bindgen(js_name = "setContent")]
    pub fn set_content(&mut self, id: &str, content: String) -> Result<(), JsValue> {
        let cell = parse_cell(id)?;
        let slot = self
            .table
            .content_mut(cell)
            .ok_or_else(|| js_error(TableError::not_found(cell)))?;
        *slot = content;
        Ok(())
    }

    /// Check the table for structural issues
    pub fn check(&self) -> Result<JsValue, JsValue> {
        let result = check_table_with_options(&self.table, self.options);

        // Group diagnostics by level
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut infos = Vec::new();

        for d in &result.diagnostics {
            match d.level {
                DiagnosticLevel::Error => errors.push(d.to_string()),
                DiagnosticLevel::Warning => warnings.push(d.to_string()),
                DiagnosticLevel::Info => infos.push(d.to_string()),
            }
        }

        let summary = CheckSummary {
            errors,
            warnings,
            infos,
            has_errors: result.has_errors(),
        };
        Ok(serde_wasm_bindgen::to_value(&summary)?)
    }
}
