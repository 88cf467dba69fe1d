//! Move inventory data model: record kinds, field values, and the value
//! normalizers (colors, timestamps) applied before records are stored.
//!
//! This crate has no database dependency. `movebox-db` declares which
//! fields each record kind accepts and persists [`Record`]s to SQLite.

pub mod color;
pub mod error;
pub mod label;
pub mod timestamp;
pub mod types;

pub use color::{canonical_color, lookup_color, NamedColor};
pub use error::ModelError;
pub use label::{BoxLabelData, LabelKind, RoomSignData};
pub use timestamp::{normalize_timestamp, normalize_timestamp_at, STORAGE_FORMAT};
pub use types::*;
