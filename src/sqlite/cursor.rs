use std::collections::HashMap;

use rusqlite::types::Value;
use rusqlite::{Rows, Statement, ToSql};

use super::query::sqlite_extract_value_sync;
use crate::cursor::Cursor;
use crate::error::CursorReadError;
use crate::types::RowValues;

/// Forward-only cursor over the rows of a running `SQLite` statement.
///
/// Each `advance` pulls one row from `SQLite` and copies its values; nothing
/// else is buffered.
pub struct SqliteCursor<'stmt> {
    rows: Rows<'stmt>,
    column_names: Vec<String>,
    column_index: HashMap<String, usize>,
    current: Option<Vec<RowValues>>,
}

impl<'stmt> SqliteCursor<'stmt> {
    /// Start executing `stmt` with `params`.
    ///
    /// # Errors
    ///
    /// Returns `rusqlite::Error` if binding or starting the query fails.
    pub fn open(stmt: &'stmt mut Statement<'_>, params: &[Value]) -> rusqlite::Result<Self> {
        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(std::string::ToString::to_string)
            .collect();
        let column_index = crate::results::index_columns(&column_names);
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt.query(&param_refs[..])?;
        Ok(Self {
            rows,
            column_names,
            column_index,
            current: None,
        })
    }
}

impl Cursor for SqliteCursor<'_> {
    fn advance(&mut self) -> Result<bool, CursorReadError> {
        match self.rows.next()? {
            Some(row) => {
                let mut values = Vec::with_capacity(self.column_names.len());
                for i in 0..self.column_names.len() {
                    values.push(sqlite_extract_value_sync(row, i)?);
                }
                self.current = Some(values);
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn read_column(&self, label: &str) -> Result<RowValues, CursorReadError> {
        let values = self.current.as_ref().ok_or(CursorReadError::NoCurrentRow)?;
        self.column_index
            .get(label)
            .and_then(|&idx| values.get(idx))
            .cloned()
            .ok_or_else(|| CursorReadError::UnknownColumn(label.to_string()))
    }

    fn column_names(&self) -> &[String] {
        &self.column_names
    }
}
