//! SQLite schema creation and the static table catalog.

use movebox_model::RecordKind;
use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema version mismatch: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

// ── Table Catalog ───────────────────────────────────────────────────────────

/// One column of a record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub not_null: bool,
    pub unique: bool,
    /// Referenced record kind, for foreign-key columns.
    pub references: Option<RecordKind>,
}

/// Table name, key column and columns for a record kind.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub kind: RecordKind,
    pub table: &'static str,
    /// `id` for ordinary tables, `rowid` for the project singleton.
    pub key_column: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&'static str, RecordKind)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.references.map(|r| (c.name, r)))
    }
}

const fn col(name: &'static str, not_null: bool) -> ColumnDef {
    ColumnDef {
        name,
        not_null,
        unique: false,
        references: None,
    }
}

const fn unique(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        not_null: true,
        unique: true,
        references: None,
    }
}

const fn fk(name: &'static str, not_null: bool, target: RecordKind) -> ColumnDef {
    ColumnDef {
        name,
        not_null,
        unique: false,
        references: Some(target),
    }
}

static LOCATION: TableSchema = TableSchema {
    kind: RecordKind::Location,
    table: "location",
    key_column: "id",
    columns: &[col("id", true), unique("name")],
};

static ROOM: TableSchema = TableSchema {
    kind: RecordKind::Room,
    table: "room",
    key_column: "id",
    columns: &[col("id", true), unique("name"), col("color", true)],
};

static USER: TableSchema = TableSchema {
    kind: RecordKind::User,
    table: "uri_user",
    key_column: "id",
    columns: &[col("id", true), unique("name")],
};

static PROJECT: TableSchema = TableSchema {
    kind: RecordKind::Project,
    table: "move_project",
    key_column: "rowid",
    columns: &[
        fk("primary_user", true, RecordKind::User),
        col("title", true),
        col("found_contact", true),
    ],
};

static BATCH_MOVE: TableSchema = TableSchema {
    kind: RecordKind::BatchMove,
    table: "batch_move",
    key_column: "id",
    columns: &[
        col("id", true),
        col("timestamp", true),
        fk("location", true, RecordKind::Location),
    ],
};

static MOVING_BOX: TableSchema = TableSchema {
    kind: RecordKind::MovingBox,
    table: "moving_box",
    key_column: "id",
    columns: &[
        col("id", true),
        fk("location", true, RecordKind::Location),
        col("info", true),
        fk("room", true, RecordKind::Room),
        fk("user", true, RecordKind::User),
        fk("image", false, RecordKind::Image),
    ],
};

static ITEM: TableSchema = TableSchema {
    kind: RecordKind::Item,
    table: "item",
    key_column: "id",
    columns: &[
        col("id", true),
        fk("box", true, RecordKind::MovingBox),
        col("description", true),
        fk("image", false, RecordKind::Image),
    ],
};

static BOX_SCAN: TableSchema = TableSchema {
    kind: RecordKind::BoxScan,
    table: "box_scan",
    key_column: "id",
    columns: &[
        col("id", true),
        fk("box", true, RecordKind::MovingBox),
        fk("batch", true, RecordKind::BatchMove),
        fk("user", true, RecordKind::User),
        col("timestamp", true),
    ],
};

static IMAGE: TableSchema = TableSchema {
    kind: RecordKind::Image,
    table: "image",
    key_column: "id",
    columns: &[
        col("id", true),
        unique("image_file"),
        unique("hash"),
        col("mimetype", false),
        col("encoding", false),
        col("description", false),
        col("timestamp", true),
    ],
};

/// Table schema for a record kind.
pub fn table_schema(kind: RecordKind) -> &'static TableSchema {
    match kind {
        RecordKind::Location => &LOCATION,
        RecordKind::Room => &ROOM,
        RecordKind::User => &USER,
        RecordKind::Project => &PROJECT,
        RecordKind::BatchMove => &BATCH_MOVE,
        RecordKind::MovingBox => &MOVING_BOX,
        RecordKind::Item => &ITEM,
        RecordKind::BoxScan => &BOX_SCAN,
        RecordKind::Image => &IMAGE,
    }
}

// ── DDL ─────────────────────────────────────────────────────────────────────

/// Create all tables and indexes inside one transaction.
///
/// Idempotent: safe to call on an existing database. On failure nothing is
/// applied.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch("BEGIN IMMEDIATE;")?;
    let result = conn
        .execute_batch(SCHEMA_SQL)
        .and_then(|()| {
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [CURRENT_VERSION],
            )
        })
        .and_then(|_| conn.execute_batch("COMMIT;"));
    if let Err(e) = result {
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(e.into());
    }
    log::debug!("Applied schema version {}", CURRENT_VERSION);
    Ok(())
}

/// Open or create a move database at the given path.
///
/// A file without a schema (new, empty, or left behind by a failed
/// initialization) is initialized; a file from a newer release is rejected.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        log::info!("Initializing database schema in {}", path.display());
        create_schema(&conn)?;
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%SZ', 'now'))
);

CREATE TABLE IF NOT EXISTS location (
    id INTEGER PRIMARY KEY,
    name TEXT UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS room (
    id INTEGER PRIMARY KEY,
    name TEXT UNIQUE NOT NULL,
    color TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS uri_user (
    id INTEGER PRIMARY KEY,
    name TEXT UNIQUE NOT NULL
);

-- Content-addressed images: one row per distinct file content
CREATE TABLE IF NOT EXISTS image (
    id INTEGER PRIMARY KEY NOT NULL,
    image_file TEXT UNIQUE NOT NULL,
    hash TEXT UNIQUE NOT NULL,
    mimetype TEXT,
    encoding TEXT,
    description TEXT,
    timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%SZ', 'now'))
);

-- Singleton project row, addressed by rowid 1
CREATE TABLE IF NOT EXISTS move_project (
    primary_user INTEGER NOT NULL REFERENCES uri_user (id),
    title TEXT NOT NULL,
    found_contact TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS batch_move (
    id INTEGER PRIMARY KEY,
    timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%SZ', 'now')),
    location INTEGER NOT NULL REFERENCES location (id)
);

CREATE TABLE IF NOT EXISTS moving_box (
    id INTEGER PRIMARY KEY,
    location INTEGER NOT NULL REFERENCES location (id),
    info TEXT NOT NULL,
    room INTEGER NOT NULL REFERENCES room (id),
    user INTEGER NOT NULL REFERENCES uri_user (id),
    image INTEGER REFERENCES image (id)
);
CREATE INDEX IF NOT EXISTS idx_moving_box_location ON moving_box(location);
CREATE INDEX IF NOT EXISTS idx_moving_box_room ON moving_box(room);

CREATE TABLE IF NOT EXISTS item (
    id INTEGER PRIMARY KEY,
    box INTEGER NOT NULL REFERENCES moving_box (id),
    description TEXT NOT NULL,
    image INTEGER REFERENCES image (id)
);
CREATE INDEX IF NOT EXISTS idx_item_box ON item(box);

CREATE TABLE IF NOT EXISTS box_scan (
    id INTEGER PRIMARY KEY,
    box INTEGER NOT NULL REFERENCES moving_box (id),
    batch INTEGER NOT NULL REFERENCES batch_move (id),
    user INTEGER NOT NULL REFERENCES uri_user (id),
    timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%SZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_box_scan_batch ON box_scan(batch);
"#;
