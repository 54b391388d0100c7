use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{Connection, Statement, ToSql};

use super::cursor::SqliteCursor;
use super::params::Params;
use crate::error::{CursorReadError, RowCollectorError};
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `CursorReadError::Sqlite` if the column cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, CursorReadError> {
    let value: Value = row.get(idx)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Blob(b)),
    }
}

/// Run `stmt` and materialize every row into a [`ResultSet`].
///
/// # Errors
///
/// Returns `RowCollectorError` if query execution or value extraction fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &[Value],
) -> Result<ResultSet, RowCollectorError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut rows_iter = stmt.query(&param_refs[..])?;
    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Prepare `sql`, bind `params` and hand a live cursor over its rows to `f`.
///
/// Rows are read from `SQLite` as `f` advances the cursor, so `f` can use the
/// row collector without materializing the whole result first.
///
/// ```rust
/// use row_collector::prelude::*;
///
/// let conn = rusqlite::Connection::open_in_memory()?;
/// conn.execute_batch("CREATE TABLE t (id INTEGER); INSERT INTO t VALUES (1), (2);")?;
/// let ids = query_with(&conn, "SELECT id FROM t ORDER BY id", &[], |cursor| {
///     collect_all(cursor, |row| -> Result<Option<i64>, RowCollectorError> {
///         Ok(get_i64(row, "id")?)
///     })
/// })?;
/// assert_eq!(ids, vec![Some(1), Some(2)]);
/// # Ok::<(), RowCollectorError>(())
/// ```
///
/// # Errors
///
/// Returns `RowCollectorError` if preparing the statement fails, or whatever `f` returns.
pub fn query_with<T, F>(
    conn: &Connection,
    sql: &str,
    params: &[RowValues],
    f: F,
) -> Result<T, RowCollectorError>
where
    F: FnOnce(&mut SqliteCursor<'_>) -> Result<T, RowCollectorError>,
{
    let params = Params::convert(params);
    let mut stmt = conn.prepare(sql)?;
    let mut cursor = SqliteCursor::open(&mut stmt, params.as_values())?;
    f(&mut cursor)
}
