//! Table Grid
//!
//! Maps a sparse, span-annotated table onto a dense grid in which every
//! logical position has an entry: the origin of a real cell, or a virtual
//! entry covered by some cell's row or column span.
//!
//! # Layout
//!
//! ```text
//! <tr><td rowspan=2 colspan=2>A</td><td>B</td></tr>     TD[2,2,0,0] --[2,2,0,1] TD[1,1,0,0]
//! <tr><td>C</td></tr>                               ->  --[2,2,1,0] --[2,2,1,1] TD[1,1,0,0]
//! ```
//!
//! Every entry carries the owning cell's span and its own offset from the
//! owner's origin, so any position resolves to its owner in one step.
//!
//! # Example
//!
//! ```
//! use tablemerge::{build_grid, Cell, Row, Table};
//!
//! let table = Table::from_rows([
//!     Row::from_iter([Cell::with_span("A".to_string(), 2, 1), Cell::new("B".to_string())]),
//!     Row::from_iter([Cell::new("C".to_string())]),
//! ]);
//! let grid = build_grid(&table).unwrap();
//! assert_eq!(grid.layout(), ["TD[2,1,0,0] TD[1,1,0,0]", "--[2,1,1,0] TD[1,1,0,0]"]);
//! ```

mod builder;
mod entry;
mod locate;

#[cfg(test)]
mod tests;

// Re-export public API
pub(crate) use builder::{populate, Defect};
pub use builder::{build_grid, build_grid_with_options, Grid};
pub use entry::{GridEntry, Span};
pub use locate::{locate, origin, origin_position, owner};
