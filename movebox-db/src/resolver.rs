//! The field-processing pipeline shared by every record kind.
//!
//! `create` runs: allow-list check, prompt, interpolate, generate,
//! non-empty guard, insert. All of it happens on the connection the
//! resolver was built with; the caller owns the enclosing transaction, so a
//! failure anywhere (including inside a nested get-or-create) rolls back
//! every row the call produced.

use std::path::{Path, PathBuf};

use movebox_model::{canonical_color, normalize_timestamp, Record, RecordKind, Value};
use rusqlite::Connection;

use crate::error::StoreError;
use crate::fields::{self, Interpolation};
use crate::images::{guess_type, HashedImage, ImageStore};
use crate::operations;
use crate::schema::table_schema;
use crate::ui::{FieldPrompt, UiCallback};

/// Image fields a new image takes from the record that references it.
const IMAGE_CONTEXT_FIELDS: &[&str] = &["description", "timestamp"];

pub struct Resolver<'a> {
    conn: &'a Connection,
    images: &'a ImageStore,
    ui: Option<&'a dyn UiCallback>,
}

impl<'a> Resolver<'a> {
    pub fn new(conn: &'a Connection, images: &'a ImageStore, ui: Option<&'a dyn UiCallback>) -> Self {
        Self { conn, images, ui }
    }

    pub fn connection(&self) -> &Connection {
        self.conn
    }

    /// The project's primary user id.
    pub fn primary_user(&self) -> Result<i64, StoreError> {
        let project = operations::select_record(self.conn, table_schema(RecordKind::Project), 1)?
            .ok_or(StoreError::ProjectMissing)?;
        project
            .get("primary_user")
            .and_then(Value::as_id)
            .ok_or(StoreError::ProjectMissing)
    }

    // ── Create ──────────────────────────────────────────────────────────────

    /// Resolve and insert a new record, returning its id.
    pub fn create(&self, kind: RecordKind, mut data: Record) -> Result<i64, StoreError> {
        let schema = table_schema(kind);

        let invalid = fields::check_allowed_fields(kind, &data);
        if !invalid.is_empty() {
            return Err(StoreError::InvalidField {
                table: schema.table.to_string(),
                fields: invalid,
            });
        }

        if kind == RecordKind::Project && operations::count_records(self.conn, schema)? > 0 {
            return Err(StoreError::DuplicateKeyConflict {
                table: schema.table.to_string(),
                column: "rowid".to_string(),
                value: "1".to_string(),
            });
        }

        self.prompt_missing(kind, &mut data)?;
        self.check_missing(kind, &data, true)?;

        let placed_link = self.interpolate(kind, &mut data, None)?;
        self.generate(kind, &mut data, None)?;
        self.check_missing(kind, &data, false)?;

        if data.is_empty() {
            return Err(StoreError::empty_record(schema.table));
        }

        match operations::insert_record(self.conn, schema, &data) {
            Ok(id) => {
                log::info!("Created {} record {}", schema.table, id);
                Ok(id)
            }
            Err(e) => {
                if let Some(link) = placed_link {
                    log::warn!("Image link {} left without a database row", link.display());
                }
                Err(e)
            }
        }
    }

    // ── Update ──────────────────────────────────────────────────────────────

    /// Resolve and apply changes to an existing record.
    ///
    /// `data` must carry `id`. Generated fields are only filled in when the
    /// stored row has no value for them either.
    pub fn update(&self, kind: RecordKind, mut data: Record) -> Result<i64, StoreError> {
        let schema = table_schema(kind);
        let id = data
            .remove("id")
            .and_then(|v| v.as_id())
            .ok_or_else(|| StoreError::MissingFields {
                table: schema.table.to_string(),
                fields: vec!["id".to_string()],
            })?;

        let invalid = fields::check_allowed_fields(kind, &data);
        if !invalid.is_empty() {
            return Err(StoreError::InvalidField {
                table: schema.table.to_string(),
                fields: invalid,
            });
        }
        if data.is_empty() {
            return Err(StoreError::empty_record(schema.table));
        }

        let existing = operations::select_record(self.conn, schema, id)?
            .ok_or_else(|| StoreError::not_found(schema.table, id))?;

        self.interpolate(kind, &mut data, Some(id))?;
        self.generate(kind, &mut data, Some(&existing))?;

        let changed = operations::update_record(self.conn, schema, id, &data)?;
        if changed == 0 {
            return Err(StoreError::not_found(schema.table, id));
        }
        log::info!("Updated {} record {}", schema.table, id);
        Ok(id)
    }

    // ── Get-or-create ───────────────────────────────────────────────────────

    /// Id of the `kind` row whose natural key matches `value`, creating the
    /// row when there is none.
    ///
    /// Images match on the content hash of the file at path `value`. New
    /// rows copy the kind's companion fields from `context`.
    pub fn get_or_create(&self, kind: RecordKind, value: &Value, context: &Record) -> Result<i64, StoreError> {
        let schema = table_schema(kind);

        if kind == RecordKind::Image {
            let path = value.to_string();
            let hashed = self.images.hash_source(Path::new(&path))?;
            let hash = Value::Text(hashed.hash.clone());
            if let Some(id) = operations::find_id_by_column(self.conn, schema, "hash", &hash)? {
                log::debug!("Found image {} for {}", id, path);
                return Ok(id);
            }
            let mut record = Record::new();
            for field in IMAGE_CONTEXT_FIELDS {
                if let Some(v) = context.get(field).filter(|v| !v.is_null()) {
                    record.insert(*field, v.clone());
                }
            }
            self.place_image(&hashed, &mut record)?;
            return self.create(kind, record);
        }

        let key = fields::natural_key(kind).ok_or_else(|| StoreError::NoNaturalKey {
            table: schema.table.to_string(),
            value: value.to_string(),
        })?;
        if let Some(id) = operations::find_id_by_column(self.conn, schema, key.column, value)? {
            return Ok(id);
        }

        let mut record = Record::new().with(key.column, value.clone());
        for companion in key.companions {
            if let Some(v) = context.get(companion) {
                record.insert(*companion, v.clone());
            }
        }
        log::debug!("No {} named '{}', creating it", schema.table, value);
        self.create(kind, record)
    }

    // ── Pipeline Steps ──────────────────────────────────────────────────────

    fn prompt_missing(&self, kind: RecordKind, data: &mut Record) -> Result<(), StoreError> {
        let Some(ui) = self.ui else {
            return Ok(());
        };
        let prompts: Vec<FieldPrompt> = fields::field_specs(kind)
            .iter()
            .filter(|f| !data.contains(f.name))
            .filter_map(|f| {
                f.prompt().map(|prompt| FieldPrompt {
                    field: f.name,
                    prompt,
                })
            })
            .collect();
        if prompts.is_empty() {
            return Ok(());
        }

        let answers = ui.prompt(kind.table_name(), &prompts)?;
        for (field, answer) in answers {
            let answer = answer.trim();
            if answer.is_empty() || !prompts.iter().any(|p| p.field == field) {
                continue;
            }
            data.insert(field, answer);
        }
        Ok(())
    }

    /// Fail with the required fields still absent. Before generation runs,
    /// fields that have a generator are not counted.
    fn check_missing(&self, kind: RecordKind, data: &Record, allow_generated: bool) -> Result<(), StoreError> {
        let missing: Vec<String> = fields::check_missing_fields(kind, data)
            .into_iter()
            .filter(|name| {
                !allow_generated
                    || fields::field_spec(kind, name).is_none_or(|f| f.generator().is_none())
            })
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::MissingFields {
                table: kind.table_name().to_string(),
                fields: missing,
            })
        }
    }

    /// Normalize supplied values in declaration order. Returns the image
    /// link placed along the way, if any.
    ///
    /// An image whose content already belongs to a row other than `own_id`
    /// is rejected before anything is written to the image directory.
    fn interpolate(
        &self,
        kind: RecordKind,
        data: &mut Record,
        own_id: Option<i64>,
    ) -> Result<Option<PathBuf>, StoreError> {
        let mut placed = None;
        for spec in fields::field_specs(kind) {
            let Some(value) = data.get(spec.name).cloned() else {
                continue;
            };
            if value.is_null() {
                continue;
            }

            if let Some(target) = spec.references() {
                let id = self.resolve_reference(spec.name, target, &value, data)?;
                data.insert(spec.name, id);
                continue;
            }

            match spec.interpolation() {
                Some(Interpolation::Color) => {
                    data.insert(spec.name, canonical_color(&value.to_string())?);
                }
                Some(Interpolation::Timestamp) => {
                    data.insert(spec.name, normalize_timestamp(&value.to_string())?);
                }
                Some(Interpolation::Image) => {
                    if data.contains("hash") {
                        continue;
                    }
                    let hashed = self.images.hash_source(Path::new(&value.to_string()))?;
                    let image = table_schema(RecordKind::Image);
                    let hash = Value::Text(hashed.hash.clone());
                    if let Some(found) = operations::find_id_by_column(self.conn, image, "hash", &hash)? {
                        if Some(found) != own_id {
                            return Err(StoreError::DuplicateKeyConflict {
                                table: image.table.to_string(),
                                column: "hash".to_string(),
                                value: hashed.hash,
                            });
                        }
                    }
                    placed = Some(self.place_image(&hashed, data)?);
                }
                None => {}
            }
        }
        Ok(placed)
    }

    fn resolve_reference(
        &self,
        field: &str,
        target: RecordKind,
        value: &Value,
        context: &Record,
    ) -> Result<i64, StoreError> {
        let schema = table_schema(target);
        match value.as_id() {
            Some(id) => {
                if operations::record_exists(self.conn, schema, id)? {
                    Ok(id)
                } else {
                    Err(StoreError::DanglingReference {
                        field: field.to_string(),
                        table: schema.table.to_string(),
                        id,
                    })
                }
            }
            None => self.get_or_create(target, value, context),
        }
    }

    /// Link a hashed source into the image directory and fill in the image
    /// fields derived from it.
    fn place_image(&self, hashed: &HashedImage, data: &mut Record) -> Result<PathBuf, StoreError> {
        let link = self.images.place(hashed)?;
        let guess = guess_type(&hashed.source);
        data.insert("image_file", link.to_string_lossy().into_owned());
        data.insert("hash", hashed.hash.clone());
        if !data.contains("mimetype") {
            data.insert("mimetype", guess.mimetype);
        }
        if !data.contains("encoding") {
            data.insert("encoding", guess.encoding);
        }
        Ok(link)
    }

    fn generate(&self, kind: RecordKind, data: &mut Record, existing: Option<&Record>) -> Result<(), StoreError> {
        for spec in fields::field_specs(kind) {
            let Some(generator) = spec.generator() else {
                continue;
            };
            if data.contains(spec.name) {
                continue;
            }
            if existing
                .and_then(|row| row.get(spec.name))
                .is_some_and(|v| !v.is_null())
            {
                continue;
            }
            let value = generator(self, data)?;
            log::debug!("Generated {}.{} = {}", kind.table_name(), spec.name, value);
            data.insert(spec.name, value);
        }
        Ok(())
    }
}
