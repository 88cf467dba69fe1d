use std::path::PathBuf;

use movebox_model::ModelError;
use thiserror::Error;

use crate::schema::SchemaError;

/// Errors raised by store operations.
///
/// Everything except [`StoreError::Schema`] is scoped to the failing
/// operation: its transaction is rolled back and the store stays usable.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schema initialization failed; the database handle is unusable
    #[error("Schema initialization failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid color or timestamp value
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Keys that are not declared fields of the table
    #[error("Invalid fields for {table}: {}", fields.join(", "))]
    InvalidField { table: String, fields: Vec<String> },

    /// Required fields that were neither supplied, prompted for, nor generated
    #[error("Missing required fields for {table}: {}", fields.join(", "))]
    MissingFields { table: String, fields: Vec<String> },

    /// Image source file missing or unreadable
    #[error("Cannot read image file {path}: {source}")]
    ImageRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Could not place the image reference in the image directory
    #[error("Failed to link {link} -> {target}: {source}")]
    ImagePlacement {
        link: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },

    #[error("Duplicate {column} '{value}' in {table}")]
    DuplicateKeyConflict {
        table: String,
        column: String,
        value: String,
    },

    #[error("Record not found: {table} with id {id}")]
    NotFound { table: String, id: i64 },

    /// Foreign-key field naming a row that does not exist
    #[error("Field '{field}' references missing {table} record {id}")]
    DanglingReference {
        field: String,
        table: String,
        id: i64,
    },

    /// Non-numeric reference to a table without a natural key
    #[error("{table} records can only be referenced by id, got '{value}'")]
    NoNaturalKey { table: String, value: String },

    /// Delete blocked because other rows still reference the record
    #[error("Cannot delete {table} record {id}: still referenced by other records")]
    StillReferenced { table: String, id: i64 },

    #[error("Cannot insert record with empty data into {table}")]
    EmptyRecord { table: String },

    #[error("No move project found; initialize the database first")]
    ProjectMissing,
}

impl StoreError {
    pub(crate) fn not_found(table: &str, id: i64) -> Self {
        Self::NotFound {
            table: table.to_string(),
            id,
        }
    }

    pub(crate) fn empty_record(table: &str) -> Self {
        Self::EmptyRecord {
            table: table.to_string(),
        }
    }
}
