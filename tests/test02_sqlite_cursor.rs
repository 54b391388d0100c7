#![cfg(feature = "sqlite")]
use std::collections::HashMap;

use chrono::NaiveDate;
use row_collector::bindings::{int_column, timestamp_column};
use row_collector::prelude::*;
use rusqlite::Connection;

fn seeded() -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(
        r#"
        CREATE TABLE test (
            recid INTEGER PRIMARY KEY,
            name TEXT,
            qty TEXT,
            seen TEXT,
            price REAL,
            payload BLOB
        );
        INSERT INTO test VALUES (1, 'apple', '10', '2024-01-01 10:00:00', 1.25, x'01');
        INSERT INTO test VALUES (2, 'pear', '7', '2024-01-02 11:30:00', 0.5, NULL);
        INSERT INTO test VALUES (3, NULL, '0', NULL, NULL, NULL);
        "#,
    )?;
    Ok(conn)
}

#[test]
fn live_cursor_streams_rows_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let conn = seeded()?;
    let names = query_with(
        &conn,
        "SELECT recid, name FROM test WHERE recid >= ?1 ORDER BY recid",
        &[RowValues::Int(1)],
        |cursor| {
            assert_eq!(cursor.column_names(), ["recid", "name"]);
            collect_all(cursor, |row| -> Result<_, RowCollectorError> {
                Ok((get_i32(row, "recid")?, get_string(row, "name")?))
            })
        },
    )?;
    assert_eq!(
        names,
        vec![
            (Some(1), Some("apple".to_string())),
            (Some(2), Some("pear".to_string())),
            (Some(3), None),
        ]
    );
    Ok(())
}

#[test]
fn single_reads_only_first_row() -> Result<(), Box<dyn std::error::Error>> {
    let conn = seeded()?;
    let (first, rest) = query_with(&conn, "SELECT recid FROM test ORDER BY recid", &[], |cursor| {
        let first = cursor.collect_single(|row| get_i64(row, "recid"))?;
        let rest = cursor.collect_all(|row| get_i64(row, "recid"))?;
        Ok((first, rest))
    })?;
    assert_eq!(first, Some(Some(1)));
    assert_eq!(rest, vec![Some(2), Some(3)]);

    let none = query_with(&conn, "SELECT recid FROM test WHERE recid > 10", &[], |cursor| {
        Ok(collect_single(cursor, |row| get_i64(row, "recid"))?)
    })?;
    assert_eq!(none, None);
    Ok(())
}

#[test]
fn bindings_convert_text_columns() -> Result<(), Box<dyn std::error::Error>> {
    let conn = seeded()?;
    let bindings = ColumnBindings::new()
        .with_binding("qty", int_column)
        .with_binding("seen", timestamp_column);

    let by_name: HashMap<String, CustomDbRow> = query_with(
        &conn,
        "SELECT name, qty, seen, price, payload FROM test WHERE name IS NOT NULL",
        &[],
        |cursor| {
            collect_all_as_map(cursor, |row| -> Result<_, RowCollectorError> {
                let converted = bindings.convert_row(row)?;
                Ok((get_string(row, "name")?.unwrap_or_default(), converted))
            })
        },
    )?;

    let apple = &by_name["apple"];
    assert_eq!(apple.get("qty"), Some(&RowValues::Int(10)));
    assert_eq!(
        apple.get("seen").and_then(RowValues::as_timestamp),
        NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(10, 0, 0))
    );
    assert_eq!(apple.get("price"), Some(&RowValues::Float(1.25)));
    assert_eq!(apple.get("payload"), Some(&RowValues::Blob(vec![1])));
    assert_eq!(by_name["pear"].get("payload"), Some(&RowValues::Null));
    Ok(())
}

#[test]
fn read_errors_surface_as_cursor_read_errors() -> Result<(), Box<dyn std::error::Error>> {
    let conn = seeded()?;
    let result = query_with(&conn, "SELECT name FROM test", &[], |cursor| {
        collect_all(cursor, |row| -> Result<_, RowCollectorError> {
            Ok(get_i64(row, "name")?)
        })
    });
    assert!(matches!(
        result,
        Err(RowCollectorError::CursorRead(CursorReadError::TypeMismatch { .. }))
    ));

    let result = query_with(&conn, "SELECT name FROM test", &[], |cursor| {
        collect_all(cursor, |row| -> Result<_, RowCollectorError> {
            Ok(get_string(row, "no_such_column")?)
        })
    });
    assert!(matches!(
        result,
        Err(RowCollectorError::CursorRead(CursorReadError::UnknownColumn(_)))
    ));

    let result = query_with(&conn, "SELECT * FROM missing_table", &[], |_| Ok(()));
    assert!(matches!(result, Err(RowCollectorError::SqliteError(_))));
    Ok(())
}
