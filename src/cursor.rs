//! The forward-only cursor consumed by the row collector.

use std::sync::Arc;

use crate::error::CursorReadError;
use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;

/// Forward-only handle over query result rows.
///
/// A cursor starts positioned before the first row. Each successful
/// `advance` that returns `true` positions it on the next row; `false`
/// means the data is exhausted.
pub trait Cursor {
    /// Move to the next row, returning whether one is available.
    ///
    /// # Errors
    ///
    /// Returns `CursorReadError` if the underlying source fails.
    fn advance(&mut self) -> Result<bool, CursorReadError>;

    /// Read a column of the current row by label.
    ///
    /// # Errors
    ///
    /// Returns `CursorReadError::NoCurrentRow` when not positioned on a row and
    /// `CursorReadError::UnknownColumn` for labels the result does not carry.
    fn read_column(&self, label: &str) -> Result<RowValues, CursorReadError>;

    /// Labels of the columns every row carries, in select order.
    fn column_names(&self) -> &[String];
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn advance(&mut self) -> Result<bool, CursorReadError> {
        (**self).advance()
    }

    fn read_column(&self, label: &str) -> Result<RowValues, CursorReadError> {
        (**self).read_column(label)
    }

    fn column_names(&self) -> &[String] {
        (**self).column_names()
    }
}

/// Cursor over an already materialized `ResultSet`.
#[derive(Debug)]
pub struct ResultSetCursor {
    column_names: Arc<Vec<String>>,
    rows: std::vec::IntoIter<CustomDbRow>,
    current: Option<CustomDbRow>,
    position: usize,
}

impl ResultSetCursor {
    #[must_use]
    pub fn new(result_set: ResultSet) -> Self {
        let column_names = result_set
            .get_column_names()
            .cloned()
            .unwrap_or_default();
        Self {
            column_names,
            rows: result_set.results.into_iter(),
            current: None,
            position: 0,
        }
    }

    /// Number of rows the cursor has been advanced onto so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Rows not yet visited.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    /// The row the cursor is positioned on, if any.
    #[must_use]
    pub fn current_row(&self) -> Option<&CustomDbRow> {
        self.current.as_ref()
    }
}

impl Cursor for ResultSetCursor {
    fn advance(&mut self) -> Result<bool, CursorReadError> {
        self.current = self.rows.next();
        if self.current.is_some() {
            self.position += 1;
        }
        Ok(self.current.is_some())
    }

    fn read_column(&self, label: &str) -> Result<RowValues, CursorReadError> {
        let row = self.current.as_ref().ok_or(CursorReadError::NoCurrentRow)?;
        row.get(label)
            .cloned()
            .ok_or_else(|| CursorReadError::UnknownColumn(label.to_string()))
    }

    fn column_names(&self) -> &[String] {
        &self.column_names
    }
}
