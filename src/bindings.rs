//! Per-column value conversions, owned by the caller.
//!
//! A `ColumnBindings` maps a column label to the function used to read that
//! column. Registries are plain values: build one, pass it to whatever
//! converts rows, and combine several with [`ColumnBindings::merge`].
//!
//! ```rust
//! use row_collector::prelude::*;
//! use row_collector::bindings::int_column;
//!
//! let mut rs = ResultSet::with_columns(["id", "active"]);
//! rs.add_row_values(vec![RowValues::Int(1), RowValues::Text("1".into())]);
//! let mut cursor = rs.into_cursor();
//!
//! let bindings = ColumnBindings::new().with_binding("active", int_column);
//! let rows = collect_all(&mut cursor, |row| bindings.convert_row(row))?;
//! assert_eq!(rows[0].get("active"), Some(&RowValues::Int(1)));
//! # Ok::<(), CursorReadError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::CursorReadError;
use crate::results::CustomDbRow;
use crate::row_converter::{get_i64, get_string, get_timestamp};
use crate::types::RowValues;

/// Reads one column (given by label) from the cursor's current row.
pub type ColumnConversion =
    Arc<dyn Fn(&dyn Cursor, &str) -> Result<RowValues, CursorReadError> + Send + Sync>;

#[derive(Clone, Default)]
pub struct ColumnBindings {
    conversions: HashMap<String, ColumnConversion>,
}

impl fmt::Debug for ColumnBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnBindings")
            .field("columns", &self.columns())
            .finish()
    }
}

impl ColumnBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the conversion for `column`.
    pub fn bind<F>(&mut self, column: impl Into<String>, conversion: F) -> &mut Self
    where
        F: Fn(&dyn Cursor, &str) -> Result<RowValues, CursorReadError> + Send + Sync + 'static,
    {
        self.conversions.insert(column.into(), Arc::new(conversion));
        self
    }

    #[must_use]
    pub fn with_binding<F>(mut self, column: impl Into<String>, conversion: F) -> Self
    where
        F: Fn(&dyn Cursor, &str) -> Result<RowValues, CursorReadError> + Send + Sync + 'static,
    {
        self.bind(column, conversion);
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnConversion> {
        self.conversions.get(column)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.conversions.contains_key(column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    /// Bound column labels, sorted.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = self.conversions.keys().map(String::as_str).collect();
        columns.sort_unstable();
        columns
    }

    /// Overlay `other` onto this registry; its entries replace ours.
    pub fn merge(&mut self, other: &ColumnBindings) -> &mut Self {
        for (column, conversion) in &other.conversions {
            self.conversions.insert(column.clone(), conversion.clone());
        }
        self
    }

    /// Read `column` through its binding, or as the raw cursor value when unbound.
    ///
    /// # Errors
    ///
    /// Returns whatever `CursorReadError` the binding or the cursor raises.
    pub fn read<C: Cursor>(&self, cursor: &C, column: &str) -> Result<RowValues, CursorReadError> {
        match self.get(column) {
            Some(conversion) => conversion(cursor, column),
            None => cursor.read_column(column),
        }
    }

    /// Read every column of the current row through [`ColumnBindings::read`].
    ///
    /// # Errors
    ///
    /// Returns the first `CursorReadError` raised by any column.
    pub fn convert_row<C: Cursor>(&self, cursor: &C) -> Result<CustomDbRow, CursorReadError> {
        let column_names = cursor.column_names();
        let mut values = Vec::with_capacity(column_names.len());
        for column in column_names {
            values.push(self.read(cursor, column)?);
        }
        Ok(CustomDbRow::new(Arc::new(column_names.to_vec()), values))
    }
}

/// Binding that reads a column as text, keeping NULL.
///
/// # Errors
///
/// See [`get_string`].
pub fn text_column(cursor: &dyn Cursor, column: &str) -> Result<RowValues, CursorReadError> {
    Ok(get_string(cursor, column)?.map_or(RowValues::Null, RowValues::Text))
}

/// Binding that reads a column as an integer; numeric text is parsed.
///
/// # Errors
///
/// See [`get_i64`]; unparsable text is a `TypeMismatch`.
pub fn int_column(cursor: &dyn Cursor, column: &str) -> Result<RowValues, CursorReadError> {
    if let RowValues::Text(s) = cursor.read_column(column)? {
        return s
            .trim()
            .parse::<i64>()
            .map(RowValues::Int)
            .map_err(|_| CursorReadError::TypeMismatch {
                column: column.to_string(),
                expected: "integer",
                found: "text",
            });
    }
    Ok(get_i64(cursor, column)?.map_or(RowValues::Null, RowValues::Int))
}

/// Binding that reads a column as a timestamp.
///
/// # Errors
///
/// See [`get_timestamp`].
pub fn timestamp_column(cursor: &dyn Cursor, column: &str) -> Result<RowValues, CursorReadError> {
    Ok(get_timestamp(cursor, column)?.map_or(RowValues::Null, RowValues::Timestamp))
}
