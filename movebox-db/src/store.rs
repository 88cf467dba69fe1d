//! The `Store` handle: one database file, its image directory, and an
//! optional UI used for prompting.

use std::path::{Path, PathBuf};

use movebox_model::{BoxLabelData, Record, RecordKind, RoomSignData, Value};
use rusqlite::Connection;

use crate::batch::{self, CommitOutcome};
use crate::config::{image_dir_for, StoreConfig};
use crate::error::StoreError;
use crate::images::ImageStore;
use crate::operations;
use crate::queries;
use crate::resolver::Resolver;
use crate::schema::{open_database, table_schema};
use crate::ui::UiCallback;

pub struct Store {
    conn: Connection,
    path: PathBuf,
    images: ImageStore,
    ui: Option<Box<dyn UiCallback>>,
}

impl Store {
    /// Open (creating if needed) the database named `name`.
    ///
    /// The file, its parent directory, the `<stem>-images` directory and the
    /// schema are all created on first access.
    pub fn open(name: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        let path = config.resolve_db_path(name);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let images = ImageStore::new(image_dir_for(&path));
        images.ensure_dir()?;

        let conn = open_database(&path)?;
        log::debug!("Opened database {}", path.display());
        Ok(Self {
            conn,
            path,
            images,
            ui: None,
        })
    }

    /// Attach a UI so missing fields are prompted for.
    pub fn with_ui(mut self, ui: Box<dyn UiCallback>) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image_dir(&self) -> &Path {
        self.images.dir()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn ui(&self) -> Option<&dyn UiCallback> {
        self.ui.as_deref()
    }

    /// Run `f` inside one transaction; commit on success, roll back on error.
    fn in_transaction<T>(
        &mut self,
        f: impl FnOnce(&Resolver<'_>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let tx = self.conn.transaction()?;
        let result = {
            let resolver = Resolver::new(&tx, &self.images, self.ui.as_deref());
            f(&resolver)
        };
        match result {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                log::debug!("Rolling back: {e}");
                Err(e)
            }
        }
    }

    // ── Records ─────────────────────────────────────────────────────────────

    /// Create a record, resolving references and generated fields.
    pub fn create(&mut self, kind: RecordKind, data: Record) -> Result<i64, StoreError> {
        self.in_transaction(|r| r.create(kind, data))
    }

    /// Update the record named by `data["id"]`.
    pub fn update(&mut self, kind: RecordKind, data: Record) -> Result<i64, StoreError> {
        self.in_transaction(|r| r.update(kind, data))
    }

    pub fn read(&self, kind: RecordKind, id: i64) -> Result<Record, StoreError> {
        let schema = table_schema(kind);
        operations::select_record(&self.conn, schema, id)?
            .ok_or_else(|| StoreError::not_found(schema.table, id))
    }

    /// Delete one record. Never cascades; referenced rows are refused.
    pub fn delete(&mut self, kind: RecordKind, id: i64) -> Result<(), StoreError> {
        let schema = table_schema(kind);
        self.in_transaction(|r| {
            match operations::delete_record(r.connection(), schema, id)? {
                0 => Err(StoreError::not_found(schema.table, id)),
                _ => {
                    log::info!("Deleted {} record {}", schema.table, id);
                    Ok(())
                }
            }
        })
    }

    pub fn list(&self, kind: RecordKind) -> Result<Vec<Record>, StoreError> {
        operations::list_records(&self.conn, table_schema(kind))
    }

    /// Find a row by natural key (or image content), creating it if absent.
    ///
    /// A new row takes its companion fields from `context`, e.g. a Room's
    /// `color` or an Image's `description`.
    pub fn get_or_create(
        &mut self,
        kind: RecordKind,
        value: impl Into<Value>,
        context: &Record,
    ) -> Result<i64, StoreError> {
        let value = value.into();
        self.in_transaction(|r| r.get_or_create(kind, &value, context))
    }

    // ── Project ─────────────────────────────────────────────────────────────

    /// Create the singleton project record.
    ///
    /// `primary_user` may be a user name, which is created if needed.
    pub fn init_project(&mut self, data: Record) -> Result<i64, StoreError> {
        let id = self.create(RecordKind::Project, data)?;
        log::info!("Initialized move project in {}", self.path.display());
        Ok(id)
    }

    /// The project record, if the database has been initialized.
    pub fn project(&self) -> Result<Option<Record>, StoreError> {
        operations::select_record(&self.conn, table_schema(RecordKind::Project), 1)
    }

    // ── Batch / Labels / Dump ───────────────────────────────────────────────

    pub fn commit_batch(&mut self, batch_id: i64) -> Result<CommitOutcome, StoreError> {
        self.in_transaction(|r| batch::commit_batch(r.connection(), batch_id))
    }

    pub fn box_label_data(&self, box_id: i64) -> Result<BoxLabelData, StoreError> {
        queries::box_label_data(&self.conn, box_id)
    }

    pub fn room_sign_data(&self, room_id: i64) -> Result<RoomSignData, StoreError> {
        queries::room_sign_data(&self.conn, room_id)
    }

    /// The whole database as SQL text.
    pub fn dump(&self) -> Result<String, StoreError> {
        queries::dump(&self.conn)
    }
}
