use querykit_core::db::migrations::latest_version;
use querykit_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "person");
    assert_table_exists(&conn, "address");
}

#[test]
fn search_indexes_exist_after_open() {
    let conn = open_db_in_memory().unwrap();

    for index in [
        "idx_person_name",
        "idx_address_person_id",
        "idx_person_surname_name",
        "idx_address_street",
    ] {
        assert_index_exists(&conn, index);
    }
}

#[test]
fn version_two_database_upgrades_to_latest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v2.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE person (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, surname TEXT NOT NULL);
         CREATE TABLE address (id INTEGER PRIMARY KEY AUTOINCREMENT, street TEXT NOT NULL, person_id INTEGER REFERENCES person (id));
         INSERT INTO person (name, surname) VALUES ('NAME', 'SURNAME');
         PRAGMA user_version = 2;",
    )
    .unwrap();
    drop(conn);

    let upgraded = open_db(&path).unwrap();
    assert_eq!(schema_version(&upgraded), latest_version());
    assert_index_exists(&upgraded, "idx_person_surname_name");
    let rows: i64 = upgraded
        .query_row("SELECT COUNT(*) FROM person;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let result = conn.execute(
        "INSERT INTO address (street, person_id) VALUES ('STREET', 999);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn reopening_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("querykit.db");

    let first = open_db(&path).unwrap();
    first
        .execute("INSERT INTO person (name, surname) VALUES ('NAME', 'SURNAME');", [])
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM person;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1);",
            [index_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "index {index_name} does not exist");
}
