//! Convenient imports for common functionality.

pub use crate::bindings::ColumnBindings;
pub use crate::collector::{
    CollectRows, collect_all, collect_all_as_map, collect_all_as_map_into,
    collect_all_as_map_via, collect_all_into, collect_all_via, collect_optional, collect_single,
};
pub use crate::cursor::{Cursor, ResultSetCursor};
pub use crate::error::{CursorReadError, RowCollectorError};
pub use crate::executor::{BatchConfig, StatementExecutor};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::row_converter::{get_i16, get_i32, get_i64, get_string, get_timestamp};
pub use crate::types::RowValues;

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{BatchStatementExecutor, SqliteCursor, query_with};
