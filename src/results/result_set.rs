use std::collections::HashMap;
use std::sync::Arc;

use super::row::{CustomDbRow, index_columns};
use crate::cursor::ResultSetCursor;
use crate::types::RowValues;

/// A materialized query result.
///
/// All rows share one column-name list and one name-to-index cache.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// The number of rows affected (for DML statements)
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Create an empty result set with the given columns.
    #[must_use]
    pub fn with_columns<I, S>(column_names: I) -> ResultSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut result_set = ResultSet::default();
        result_set.set_column_names(Arc::new(
            column_names.into_iter().map(Into::into).collect(),
        ));
        result_set
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index_cache = Arc::new(index_columns(&column_names));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row to the result set.
    ///
    /// Rows added before column names are set are ignored.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let Some(column_names) = &self.column_names {
            let row = CustomDbRow::with_cache(
                column_names.clone(),
                self.column_index_cache.clone(),
                row_values,
            );
            self.results.push(row);
            self.rows_affected += 1;
        }
    }

    /// Add a pre-built row; adopts its column names if none are set yet.
    pub fn add_row(&mut self, row: CustomDbRow) {
        if self.column_names.is_none() {
            self.column_names = Some(row.column_names.clone());
            self.column_index_cache = row.column_index_cache.clone();
        }

        self.results.push(row);
        self.rows_affected += 1;
    }

    /// Number of rows held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consume the result set into a forward-only cursor.
    #[must_use]
    pub fn into_cursor(self) -> ResultSetCursor {
        ResultSetCursor::new(self)
    }
}
