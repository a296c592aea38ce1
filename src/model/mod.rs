//! Table model
//!
//! - `host`: the `TableHost` capability the grid and the mutators work against
//! - `table`: an in-memory implementation with header/body/footer row-groups
//! - `ids`: cell identities and the generator for fresh ones

pub mod host;
pub mod ids;
pub mod table;

pub use host::{CellInfo, TableHost};
pub use ids::{CellId, IdGenerator};
pub use table::{Cell, CellContent, Row, RowGroup, RowGroupKind, Table};
