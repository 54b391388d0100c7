#![cfg(feature = "sqlite")]
use row_collector::prelude::*;
use rusqlite::Connection;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn item_rows(range: std::ops::RangeInclusive<i64>) -> Vec<Vec<RowValues>> {
    range
        .map(|i| vec![RowValues::Int(i), RowValues::Text(format!("item-{i}"))])
        .collect()
}

fn count_items(exec: &mut BatchStatementExecutor<'_>) -> Result<i64, RowCollectorError> {
    let rs = exec.execute_query("SELECT COUNT(*) AS n FROM items", &[])?;
    let mut cursor = rs.into_cursor();
    let n = collect_single(&mut cursor, |row| -> Result<_, RowCollectorError> {
        Ok(get_i64(row, "n")?.unwrap_or_default())
    })?;
    Ok(n.unwrap_or_default())
}

#[test]
fn batches_commit_every_chunk() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut conn = Connection::open_in_memory()?;
    let mut exec = BatchStatementExecutor::new(&mut conn, BatchConfig::new(2))?;
    exec.execute_statement("CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT NOT NULL)", &[])?;

    let affected = exec.execute_batch("INSERT INTO items (id, label) VALUES (?1, ?2)", &item_rows(1..=5))?;
    assert_eq!(affected, 5);
    assert_eq!(count_items(&mut exec)?, 5);

    let labels = exec.query_with(
        "SELECT id, label FROM items WHERE id > ?1 ORDER BY id",
        &[RowValues::Int(3)],
        |cursor| {
            collect_all(cursor, |row| -> Result<_, RowCollectorError> {
                Ok(get_string(row, "label")?.unwrap_or_default())
            })
        },
    )?;
    assert_eq!(labels, vec!["item-4", "item-5"]);
    Ok(())
}

#[test]
fn failing_set_rolls_back_only_its_chunk() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut conn = Connection::open_in_memory()?;
    let mut exec = BatchStatementExecutor::new(&mut conn, BatchConfig::new(2))?;
    exec.execute_statement("CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT NOT NULL)", &[])?;

    let mut sets = item_rows(1..=5);
    // index 3 sits in the second chunk (indices 2 and 3)
    sets[3][1] = RowValues::Null;

    let err = exec
        .execute_batch("INSERT INTO items (id, label) VALUES (?1, ?2)", &sets)
        .unwrap_err();
    assert!(matches!(err, RowCollectorError::BatchItem { index: 3, .. }));

    // First chunk committed, second rolled back, third never ran.
    let rs = exec.execute_query("SELECT id FROM items ORDER BY id", &[])?;
    let ids = rs.into_cursor().collect_all(|row| get_i64(row, "id"))?;
    assert_eq!(ids, vec![Some(1), Some(2)]);
    Ok(())
}

#[test]
fn zero_batch_size_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = Connection::open_in_memory()?;
    let result = BatchStatementExecutor::new(&mut conn, BatchConfig::new(0));
    assert!(matches!(result, Err(RowCollectorError::ConfigError(_))));
    Ok(())
}

#[test]
fn file_backed_batches_persist() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("items.db");

    {
        let mut conn = Connection::open(&path)?;
        let config = BatchConfig::from_json(r#"{"batch_size": 3}"#)?;
        let mut exec = BatchStatementExecutor::new(&mut conn, config)?;
        assert_eq!(exec.batch_size(), 3);
        exec.execute_statement("CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT NOT NULL)", &[])?;
        exec.execute_batch("INSERT INTO items (id, label) VALUES (?1, ?2)", &item_rows(1..=7))?;
    }

    let mut conn = Connection::open(&path)?;
    let mut exec = BatchStatementExecutor::new(&mut conn, BatchConfig::default())?;
    assert_eq!(count_items(&mut exec)?, 7);
    Ok(())
}
