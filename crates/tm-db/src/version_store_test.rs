use super::*;
use crate::{DuckDbBackend, SqliteBackend};

#[test]
fn table_store_reads_zero_before_first_write() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = TableVersionStore::default();
    assert_eq!(store.read(&db).unwrap(), 0);
    assert!(!db.relation_exists(DEFAULT_VERSION_TABLE).unwrap());
}

#[test]
fn table_store_creates_table_on_first_write() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = TableVersionStore::default();
    store.write(&db, 3).unwrap();
    assert!(db.relation_exists(DEFAULT_VERSION_TABLE).unwrap());
    assert_eq!(store.read(&db).unwrap(), 3);
}

#[test]
fn table_store_keeps_a_single_row() {
    let db = SqliteBackend::in_memory().unwrap();
    let store = TableVersionStore::new("schema_marker", "current").unwrap();
    store.write(&db, 1).unwrap();
    store.write(&db, 2).unwrap();
    store.write(&db, 0).unwrap();

    let rows = db
        .query_optional_i64("SELECT COUNT(*) FROM schema_marker")
        .unwrap();
    assert_eq!(rows, Some(1));
    assert_eq!(store.read(&db).unwrap(), 0);
}

#[test]
fn table_store_empty_table_reads_zero() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE tm_version (tm_version BIGINT NOT NULL)")
        .unwrap();
    assert_eq!(TableVersionStore::default().read(&db).unwrap(), 0);
}

#[test]
fn table_store_rejects_negative_marker() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE tm_version (tm_version BIGINT NOT NULL); INSERT INTO tm_version VALUES (-4);")
        .unwrap();
    let err = TableVersionStore::default().read(&db).unwrap_err();
    assert!(matches!(err, DbError::InvalidMarker(-4)));
}

#[test]
fn table_store_write_rolls_back_with_transaction() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = TableVersionStore::default();
    store.write(&db, 1).unwrap();

    db.begin().unwrap();
    store.write(&db, 2).unwrap();
    assert_eq!(store.read(&db).unwrap(), 2);
    db.rollback().unwrap();

    assert_eq!(store.read(&db).unwrap(), 1);
}

#[test]
fn table_store_rejects_bad_identifiers() {
    let err = TableVersionStore::new("tm version", "v").unwrap_err();
    assert!(matches!(err, DbError::InvalidIdentifier { .. }));
    assert!(TableVersionStore::new("tm_version", "v; DROP TABLE x").is_err());
}

#[test]
fn register_store_round_trip() {
    let db = SqliteBackend::in_memory().unwrap();
    let store = RegisterVersionStore;
    assert_eq!(store.read(&db).unwrap(), 0);
    store.write(&db, 9).unwrap();
    assert_eq!(store.read(&db).unwrap(), 9);
    assert!(!db.relation_exists(DEFAULT_VERSION_TABLE).unwrap());
}

#[test]
fn auto_storage_prefers_native_register() {
    let db = SqliteBackend::in_memory().unwrap();
    let store = version_store_for(
        &db,
        MarkerStorage::Auto,
        DEFAULT_VERSION_TABLE,
        DEFAULT_VERSION_COLUMN,
    )
    .unwrap();
    assert_eq!(store.describe(), "native version register");
}

#[test]
fn auto_storage_falls_back_to_table() {
    let db = DuckDbBackend::in_memory().unwrap();
    let store = version_store_for(&db, MarkerStorage::Auto, "mg_version", "mg_version").unwrap();
    assert_eq!(store.describe(), "table mg_version.mg_version");
}

#[test]
fn table_storage_can_be_forced() {
    let db = SqliteBackend::in_memory().unwrap();
    let store = version_store_for(&db, MarkerStorage::Table, "versions", "v").unwrap();
    store.write(&db, 4).unwrap();
    assert!(db.relation_exists("versions").unwrap());
    assert_eq!(db.read_version_register().unwrap(), 0);
}

#[test]
fn storage_choice_still_validates_names() {
    let db = SqliteBackend::in_memory().unwrap();
    let result = version_store_for(&db, MarkerStorage::Auto, "bad name", "v");
    assert!(result.is_err());
}
