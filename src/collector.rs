//! Collect the rows of a cursor into a value, an option, a sequence, or a map.
//!
//! Every operation makes a single forward pass over the cursor, calling the
//! conversion function exactly once per row in cursor order. The cursor is only
//! borrowed for the duration of the call and is never rewound.
//!
//! A failure to advance or read the cursor aborts the pass and is returned as
//! `E::from(CursorReadError)`. Errors raised by the conversion function are
//! returned untouched. Containers owned by the collector are dropped on
//! failure; a container supplied by the caller keeps whatever was appended
//! before the failure.
//!
//! ```rust
//! use row_collector::prelude::*;
//!
//! let mut rs = ResultSet::with_columns(["id"]);
//! rs.add_row_values(vec![RowValues::Int(7)]);
//! let mut cursor = rs.into_cursor();
//!
//! let ids: Vec<i64> = collect_all(&mut cursor, |row| -> Result<i64, RowCollectorError> {
//!     Ok(get_i64(row, "id")?.unwrap_or_default())
//! })?;
//! assert_eq!(ids, vec![7]);
//! # Ok::<(), RowCollectorError>(())
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use crate::cursor::Cursor;
use crate::error::CursorReadError;

/// Drive `on_row` once per remaining row, returning how many rows were visited.
fn for_each_row<C, E, F>(cursor: &mut C, mut on_row: F) -> Result<usize, E>
where
    C: Cursor + ?Sized,
    E: From<CursorReadError>,
    F: FnMut(&C) -> Result<(), E>,
{
    let mut visited = 0usize;
    while cursor.advance()? {
        on_row(&*cursor)?;
        visited += 1;
    }
    tracing::trace!(rows = visited, "cursor exhausted");
    Ok(visited)
}

/// Convert the next row, if there is one.
///
/// Advances the cursor exactly once.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error.
pub fn collect_single<C, T, E, F>(cursor: &mut C, convert: F) -> Result<Option<T>, E>
where
    C: Cursor + ?Sized,
    E: From<CursorReadError>,
    F: FnOnce(&C) -> Result<T, E>,
{
    if cursor.advance()? {
        convert(&*cursor).map(Some)
    } else {
        Ok(None)
    }
}

/// Like [`collect_single`], for conversions that may themselves yield nothing
/// (e.g. a NULL column). Absent row and absent value both give `None`.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error.
pub fn collect_optional<C, T, E, F>(cursor: &mut C, convert: F) -> Result<Option<T>, E>
where
    C: Cursor + ?Sized,
    E: From<CursorReadError>,
    F: FnOnce(&C) -> Result<Option<T>, E>,
{
    Ok(collect_single(cursor, convert)?.flatten())
}

/// Convert every remaining row into a new `Vec`, in cursor order.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error; no partial
/// result is returned.
pub fn collect_all<C, T, E, F>(cursor: &mut C, convert: F) -> Result<Vec<T>, E>
where
    C: Cursor + ?Sized,
    E: From<CursorReadError>,
    F: FnMut(&C) -> Result<T, E>,
{
    collect_all_via(cursor, convert, Vec::new)
}

/// Convert every remaining row, appending to `target`. Returns `target` for chaining.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error. Rows converted
/// before the failure stay in `target`.
pub fn collect_all_into<'t, C, T, X, E, F>(
    cursor: &mut C,
    mut convert: F,
    target: &'t mut X,
) -> Result<&'t mut X, E>
where
    C: Cursor + ?Sized,
    X: Extend<T> + ?Sized,
    E: From<CursorReadError>,
    F: FnMut(&C) -> Result<T, E>,
{
    for_each_row::<_, E, _>(cursor, |row| {
        target.extend(std::iter::once(convert(row)?));
        Ok(())
    })?;
    Ok(target)
}

/// Convert every remaining row into a container built by `factory`.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error; the
/// partially filled container is dropped.
pub fn collect_all_via<C, T, X, E, F, M>(cursor: &mut C, convert: F, factory: M) -> Result<X, E>
where
    C: Cursor + ?Sized,
    X: Extend<T>,
    E: From<CursorReadError>,
    F: FnMut(&C) -> Result<T, E>,
    M: FnOnce() -> X,
{
    let mut container = factory();
    collect_all_into(cursor, convert, &mut container)?;
    Ok(container)
}

/// Convert every remaining row into a key/value pair and collect a `HashMap`.
/// A later row overwrites an earlier one with the same key.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error.
pub fn collect_all_as_map<C, K, V, E, F>(cursor: &mut C, convert: F) -> Result<HashMap<K, V>, E>
where
    C: Cursor + ?Sized,
    K: Eq + Hash,
    E: From<CursorReadError>,
    F: FnMut(&C) -> Result<(K, V), E>,
{
    collect_all_as_map_via(cursor, convert, HashMap::new)
}

/// Map form of [`collect_all_into`]. `target` decides the duplicate-key rule;
/// every std map overwrites.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error. Pairs inserted
/// before the failure stay in `target`.
pub fn collect_all_as_map_into<'t, C, K, V, M, E, F>(
    cursor: &mut C,
    convert: F,
    target: &'t mut M,
) -> Result<&'t mut M, E>
where
    C: Cursor + ?Sized,
    M: Extend<(K, V)> + ?Sized,
    E: From<CursorReadError>,
    F: FnMut(&C) -> Result<(K, V), E>,
{
    collect_all_into(cursor, convert, target)
}

/// Map form of [`collect_all_via`], e.g. with `BTreeMap::new` as the factory.
///
/// # Errors
///
/// Returns the cursor failure (as `E`) or the conversion error.
pub fn collect_all_as_map_via<C, K, V, M, E, F, B>(
    cursor: &mut C,
    convert: F,
    factory: B,
) -> Result<M, E>
where
    C: Cursor + ?Sized,
    M: Extend<(K, V)>,
    E: From<CursorReadError>,
    F: FnMut(&C) -> Result<(K, V), E>,
    B: FnOnce() -> M,
{
    collect_all_via(cursor, convert, factory)
}

/// Method-call form of the collector functions, available on every cursor.
pub trait CollectRows: Cursor {
    /// See [`collect_single`].
    ///
    /// # Errors
    ///
    /// Returns the cursor failure (as `E`) or the conversion error.
    fn collect_single<T, E, F>(&mut self, convert: F) -> Result<Option<T>, E>
    where
        E: From<CursorReadError>,
        F: FnOnce(&Self) -> Result<T, E>,
    {
        collect_single(self, convert)
    }

    /// See [`collect_optional`].
    ///
    /// # Errors
    ///
    /// Returns the cursor failure (as `E`) or the conversion error.
    fn collect_optional<T, E, F>(&mut self, convert: F) -> Result<Option<T>, E>
    where
        E: From<CursorReadError>,
        F: FnOnce(&Self) -> Result<Option<T>, E>,
    {
        collect_optional(self, convert)
    }

    /// See [`collect_all`].
    ///
    /// # Errors
    ///
    /// Returns the cursor failure (as `E`) or the conversion error.
    fn collect_all<T, E, F>(&mut self, convert: F) -> Result<Vec<T>, E>
    where
        E: From<CursorReadError>,
        F: FnMut(&Self) -> Result<T, E>,
    {
        collect_all(self, convert)
    }

    /// See [`collect_all_into`].
    ///
    /// # Errors
    ///
    /// Returns the cursor failure (as `E`) or the conversion error.
    fn collect_all_into<'t, T, X, E, F>(
        &mut self,
        convert: F,
        target: &'t mut X,
    ) -> Result<&'t mut X, E>
    where
        X: Extend<T> + ?Sized,
        E: From<CursorReadError>,
        F: FnMut(&Self) -> Result<T, E>,
    {
        collect_all_into(self, convert, target)
    }

    /// See [`collect_all_via`].
    ///
    /// # Errors
    ///
    /// Returns the cursor failure (as `E`) or the conversion error.
    fn collect_all_via<T, X, E, F, M>(&mut self, convert: F, factory: M) -> Result<X, E>
    where
        X: Extend<T>,
        E: From<CursorReadError>,
        F: FnMut(&Self) -> Result<T, E>,
        M: FnOnce() -> X,
    {
        collect_all_via(self, convert, factory)
    }

    /// See [`collect_all_as_map`].
    ///
    /// # Errors
    ///
    /// Returns the cursor failure (as `E`) or the conversion error.
    fn collect_all_as_map<K, V, E, F>(&mut self, convert: F) -> Result<HashMap<K, V>, E>
    where
        K: Eq + Hash,
        E: From<CursorReadError>,
        F: FnMut(&Self) -> Result<(K, V), E>,
    {
        collect_all_as_map(self, convert)
    }
}

impl<C: Cursor + ?Sized> CollectRows for C {}
