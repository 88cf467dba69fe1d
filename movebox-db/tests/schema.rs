use movebox_db::open_memory;
use movebox_db::schema::{create_schema, get_schema_version, open_database, CURRENT_VERSION};
use movebox_db::{fields, table_schema, SchemaError};
use movebox_model::RecordKind;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for kind in RecordKind::ALL {
        let table = kind.table_name();
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table {table} should exist");
    }
}

#[test]
fn catalog_columns_match_field_tables() {
    for kind in RecordKind::ALL {
        let schema = table_schema(kind);
        let columns: Vec<&str> = schema.columns.iter().map(|c| c.name).collect();
        assert_eq!(columns, fields(kind), "columns of {}", schema.table);
        for spec in movebox_db::field_specs(kind) {
            assert_eq!(
                schema.column(spec.name).and_then(|c| c.references),
                spec.references(),
                "reference of {}.{}",
                schema.table,
                spec.name
            );
        }
    }
}

#[test]
fn project_is_keyed_by_rowid() {
    let schema = table_schema(RecordKind::Project);
    assert_eq!(schema.table, "move_project");
    assert_eq!(schema.key_column, "rowid");
    assert!(schema.column("id").is_none());
    let fks: Vec<_> = schema.foreign_keys().collect();
    assert_eq!(fks, vec![("primary_user", RecordKind::User)]);
}

#[test]
fn open_database_initializes_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("move.db");
    {
        let conn = open_database(&path).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    }
    // Reopening an initialized file keeps the same version
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn open_database_rejects_newer_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }
    match open_database(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, CURRENT_VERSION + 1);
        }
        other => panic!("expected version mismatch, got {other:?}"),
    }
}
