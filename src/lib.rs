//! Collect the rows of a forward-only query cursor into typed values,
//! options, sequences, or maps.
//!
//! The [`collector`] functions drive any [`Cursor`]: an in-memory
//! [`ResultSetCursor`] or, with the `sqlite` feature, a live
//! [`sqlite::SqliteCursor`]. Column reads go through [`row_converter`]
//! accessors or a caller-owned [`ColumnBindings`] registry.

pub mod bindings;
pub mod collector;
pub mod cursor;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod results;
pub mod row_converter;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use bindings::{ColumnBindings, ColumnConversion};
pub use collector::{
    CollectRows, collect_all, collect_all_as_map, collect_all_as_map_into,
    collect_all_as_map_via, collect_all_into, collect_all_via, collect_optional, collect_single,
};
pub use cursor::{Cursor, ResultSetCursor};
pub use error::{CursorReadError, RowCollectorError};
pub use executor::{BatchConfig, StatementExecutor};
pub use results::{CustomDbRow, ResultSet};
pub use types::RowValues;
