use zenith_core::db::open_db_in_memory;
use zenith_core::{KvRepository, RepoError, SqliteKvRepository};

#[test]
fn get_returns_none_for_missing_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    assert_eq!(repo.get("state").unwrap(), None);
}

#[test]
fn put_replaces_whole_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    repo.put("columnNames", r#"{"col1":"a"}"#).unwrap();
    repo.put("columnNames", r#"{"col1":"b"}"#).unwrap();

    assert_eq!(
        repo.get("columnNames").unwrap().as_deref(),
        Some(r#"{"col1":"b"}"#)
    );
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn remove_deletes_value_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    repo.put("syncClientId", "client-123").unwrap();
    repo.remove("syncClientId").unwrap();
    repo.remove("syncClientId").unwrap();

    assert_eq!(repo.get("syncClientId").unwrap(), None);
}

#[test]
fn blank_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    let err = repo.put("   ", "value").unwrap_err();
    assert!(matches!(err, RepoError::InvalidKey(_)));
}
