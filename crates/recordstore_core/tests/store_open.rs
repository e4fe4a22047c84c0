use recordstore_core::db::DbError;
use recordstore_core::{Record, RecordRepository, RecordStore, StoreError, StoreOptions};

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bot.db");

    let store = RecordStore::open(&path).unwrap();
    store
        .connection()
        .execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);")
        .unwrap();
    store
        .create("users", &Record::new().with("name", "ada"))
        .unwrap();
    store.close().unwrap();

    let reopened = RecordStore::open(&path).unwrap();
    let rows = reopened.read("users", None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name").and_then(|v| v.as_str()), Some("ada"));
}

#[test]
fn dropping_store_releases_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scoped.db");

    {
        let store = RecordStore::open(&path).unwrap();
        store
            .connection()
            .execute_batch("CREATE TABLE t (v INTEGER);")
            .unwrap();
        store.create("t", &Record::new().with("v", 1)).unwrap();
    }

    let again = RecordStore::open(&path).unwrap();
    again.create("t", &Record::new().with("v", 2)).unwrap();
    assert_eq!(again.read("t", None).unwrap().len(), 2);
}

#[test]
fn missing_parent_directory_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.db");

    let err = RecordStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Connection(DbError::Open(_))));
}

#[test]
fn non_database_file_is_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.db");
    std::fs::write(&path, "this is definitely not a sqlite database\n".repeat(200)).unwrap();

    let err = RecordStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Connection(DbError::Bootstrap(_))));
}

#[test]
fn options_are_applied_to_the_connection() {
    let options = StoreOptions {
        foreign_keys: false,
        busy_timeout_ms: 250,
        ..StoreOptions::default()
    };
    let store = RecordStore::open_in_memory_with_options(options.clone()).unwrap();

    let foreign_keys: i64 = store
        .connection()
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 0);
    assert_eq!(store.options(), &options);

    let default_store = RecordStore::open_in_memory().unwrap();
    let foreign_keys: i64 = default_store
        .connection()
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn store_debug_output_includes_options() {
    let store = RecordStore::open_in_memory().unwrap();
    let rendered = format!("{store:?}");

    assert!(rendered.contains("RecordStore"));
    assert!(rendered.contains("whole_table_mutation"));
}
