// SQLite module - a live cursor and a batch statement executor over rusqlite
//
// - params: Parameter conversion between RowValues and SQLite values
// - query: Value extraction, result-set building and streaming queries
// - cursor: Forward-only cursor over rusqlite rows
// - executor: Batched statement execution

pub mod cursor;
pub mod executor;
pub mod params;
pub mod query;

pub use cursor::SqliteCursor;
pub use executor::BatchStatementExecutor;
pub use params::Params;
pub use query::{build_result_set, query_with};
