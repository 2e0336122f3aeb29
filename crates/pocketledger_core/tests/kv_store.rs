use pocketledger_core::db::migrations::latest_version;
use pocketledger_core::db::open_db_in_memory;
use pocketledger_core::{KeyValueStore, SqliteKeyValueStore, StoreError};
use rusqlite::Connection;

#[test]
fn get_returns_none_for_an_unwritten_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(store.get("expenses").unwrap(), None);
}

#[test]
fn set_then_get_round_trips_and_overwrites() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.set("expenses", "[]").unwrap();
    assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[]"));

    store.set("expenses", r#"[{"id":"1"}]"#).unwrap();
    assert_eq!(
        store.get("expenses").unwrap().as_deref(),
        Some(r#"[{"id":"1"}]"#)
    );
}

#[test]
fn keys_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.set("expenses", "[]").unwrap();

    assert_eq!(store.get("settings").unwrap(), None);
}

#[test]
fn rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKeyValueStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn rejects_connection_without_required_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteKeyValueStore::try_new(&conn);
    assert!(matches!(result, Err(StoreError::MissingRequiredTable("kv"))));
}

#[test]
fn rejects_connection_missing_required_kv_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE kv (key TEXT PRIMARY KEY NOT NULL);")
        .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteKeyValueStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredColumn {
            table: "kv",
            column: "value"
        })
    ));
}

#[test]
fn memory_store_injects_read_and_write_failures() {
    let store = pocketledger_core::MemoryKeyValueStore::new();

    store.set("expenses", "[]").unwrap();
    assert_eq!(store.write_count(), 1);

    store.fail_writes(true);
    assert!(store.set("expenses", "[1]").is_err());
    assert_eq!(store.write_count(), 2);
    store.fail_writes(false);

    // The failed write did not replace the stored value.
    assert_eq!(store.get("expenses").unwrap().as_deref(), Some("[]"));

    store.fail_reads(true);
    assert!(store.get("expenses").is_err());
}
