//! SQLite persistence layer for move inventories.
//!
//! Record kinds are mapped onto tables by a static schema catalog and a
//! static field table; one generic resolver validates, completes and
//! resolves every record before it is stored. Backed by SQLite (via
//! rusqlite with bundled feature).

pub mod batch;
pub mod config;
pub mod error;
pub mod fields;
pub mod images;
pub mod operations;
pub mod queries;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod ui;

pub use batch::CommitOutcome;
pub use config::{default_data_home, image_dir_for, StoreConfig};
pub use error::StoreError;
pub use fields::{
    check_allowed_fields, check_missing_fields, field_specs, fields, required_fields, FieldRule,
    FieldSpec, Interpolation,
};
pub use images::{guess_type, hash_file, ImageStore};
pub use schema::{open_database, open_memory, table_schema, SchemaError};
pub use store::Store;
pub use ui::{DataTable, Display, FieldPrompt, UiCallback};
