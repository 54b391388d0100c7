//! Typed accessors for a single column of the current row.
//!
//! NULL reads as `None`. A value of the wrong kind is a
//! `CursorReadError::TypeMismatch`; an integer too wide for the requested
//! type is `CursorReadError::OutOfRange`.

use chrono::NaiveDateTime;

use crate::cursor::Cursor;
use crate::error::CursorReadError;
use crate::types::RowValues;

fn mismatch(column: &str, expected: &'static str, found: &RowValues) -> CursorReadError {
    CursorReadError::TypeMismatch {
        column: column.to_string(),
        expected,
        found: found.type_name(),
    }
}

/// Read a text column.
///
/// # Errors
///
/// Returns `CursorReadError` if the read fails or the value is not text.
pub fn get_string<C: Cursor + ?Sized>(
    cursor: &C,
    column_label: &str,
) -> Result<Option<String>, CursorReadError> {
    match cursor.read_column(column_label)? {
        RowValues::Null => Ok(None),
        RowValues::Text(s) => Ok(Some(s)),
        other => Err(mismatch(column_label, "text", &other)),
    }
}

/// Read a timestamp column as UTC wall-clock time.
///
/// Text values are parsed the same way as [`RowValues::as_timestamp`].
///
/// # Errors
///
/// Returns `CursorReadError` if the read fails or the value is not a timestamp.
pub fn get_timestamp<C: Cursor + ?Sized>(
    cursor: &C,
    column_label: &str,
) -> Result<Option<NaiveDateTime>, CursorReadError> {
    let value = cursor.read_column(column_label)?;
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_timestamp()
        .map(Some)
        .ok_or_else(|| mismatch(column_label, "timestamp", &value))
}

/// Read an integer column at full width. Booleans read as 0 or 1.
///
/// # Errors
///
/// Returns `CursorReadError` if the read fails or the value is not an integer.
pub fn get_i64<C: Cursor + ?Sized>(
    cursor: &C,
    column_label: &str,
) -> Result<Option<i64>, CursorReadError> {
    match cursor.read_column(column_label)? {
        RowValues::Null => Ok(None),
        RowValues::Int(i) => Ok(Some(i)),
        RowValues::Bool(b) => Ok(Some(i64::from(b))),
        other => Err(mismatch(column_label, "integer", &other)),
    }
}

fn narrow<T: TryFrom<i64>>(
    column_label: &str,
    value: Option<i64>,
    target: &'static str,
) -> Result<Option<T>, CursorReadError> {
    value
        .map(|v| {
            T::try_from(v).map_err(|_| CursorReadError::OutOfRange {
                column: column_label.to_string(),
                value: v,
                target,
            })
        })
        .transpose()
}

/// Read an integer column that must fit in `i32`.
///
/// # Errors
///
/// Returns `CursorReadError` if the read fails, the value is not an integer,
/// or it is out of range.
pub fn get_i32<C: Cursor + ?Sized>(
    cursor: &C,
    column_label: &str,
) -> Result<Option<i32>, CursorReadError> {
    narrow(column_label, get_i64(cursor, column_label)?, "i32")
}

/// Read an integer column that must fit in `i16`.
///
/// # Errors
///
/// Returns `CursorReadError` if the read fails, the value is not an integer,
/// or it is out of range.
pub fn get_i16<C: Cursor + ?Sized>(
    cursor: &C,
    column_label: &str,
) -> Result<Option<i16>, CursorReadError> {
    narrow(column_label, get_i64(cursor, column_label)?, "i16")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ResultSetCursor;
    use crate::results::ResultSet;
    use chrono::NaiveDate;

    fn one_row() -> Result<ResultSetCursor, CursorReadError> {
        let mut rs = ResultSet::with_columns(["name", "born", "small", "big", "missing", "flag"]);
        rs.add_row_values(vec![
            RowValues::Text("ada".into()),
            RowValues::Text("1815-12-10 08:00:00".into()),
            RowValues::Int(300),
            RowValues::Int(i64::from(i32::MAX) + 1),
            RowValues::Null,
            RowValues::Bool(true),
        ]);
        let mut cursor = rs.into_cursor();
        cursor.advance()?;
        Ok(cursor)
    }

    #[test]
    fn reads_typed_values() -> Result<(), CursorReadError> {
        let cursor = one_row()?;
        assert_eq!(get_string(&cursor, "name")?.as_deref(), Some("ada"));
        assert_eq!(
            get_timestamp(&cursor, "born")?,
            NaiveDate::from_ymd_opt(1815, 12, 10).and_then(|d| d.and_hms_opt(8, 0, 0))
        );
        assert_eq!(get_i16(&cursor, "small")?, Some(300));
        assert_eq!(get_i64(&cursor, "flag")?, Some(1));
        assert_eq!(get_i32(&cursor, "missing")?, None);
        assert_eq!(get_string(&cursor, "missing")?, None);
        Ok(())
    }

    #[test]
    fn rejects_wrong_kind_and_overflow() -> Result<(), CursorReadError> {
        let cursor = one_row()?;
        assert!(matches!(
            get_i32(&cursor, "big"),
            Err(CursorReadError::OutOfRange { target: "i32", .. })
        ));
        assert!(matches!(
            get_i64(&cursor, "name"),
            Err(CursorReadError::TypeMismatch { expected: "integer", found: "text", .. })
        ));
        assert!(matches!(
            get_string(&cursor, "nope"),
            Err(CursorReadError::UnknownColumn(_))
        ));
        Ok(())
    }
}
