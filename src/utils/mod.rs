//! Utility modules
//!
//! - Error types and result types
//! - Structural diagnostics for tables that fail to build

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{
    check_table, check_table_with_options, format_diagnostics, CheckResult, Diagnostic,
    DiagnosticLevel,
};
pub use error::{TableError, TableResult};
