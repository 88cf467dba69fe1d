//! Data model types for the move inventory.
//!
//! Records are dynamic field maps: the set of fields a record kind accepts
//! is declared by the database layer's field tables, so the model only
//! needs a kind tag, a value type, and an ordered map of values.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ── Record Kind ─────────────────────────────────────────────────────────────

/// The record types stored in a move database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Location,
    Room,
    User,
    Project,
    BatchMove,
    MovingBox,
    Item,
    BoxScan,
    Image,
}

impl RecordKind {
    /// Every kind, in schema creation order (referenced tables first).
    pub const ALL: [RecordKind; 9] = [
        RecordKind::Location,
        RecordKind::Room,
        RecordKind::User,
        RecordKind::Image,
        RecordKind::Project,
        RecordKind::BatchMove,
        RecordKind::MovingBox,
        RecordKind::Item,
        RecordKind::BoxScan,
    ];

    /// SQL table name.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Room => "room",
            Self::User => "uri_user",
            Self::Project => "move_project",
            Self::BatchMove => "batch_move",
            Self::MovingBox => "moving_box",
            Self::Item => "item",
            Self::BoxScan => "box_scan",
            Self::Image => "image",
        }
    }

    /// Short name used on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Room => "room",
            Self::User => "user",
            Self::Project => "project",
            Self::BatchMove => "batch",
            Self::MovingBox => "box",
            Self::Item => "item",
            Self::BoxScan => "scan",
            Self::Image => "image",
        }
    }

    /// One-line description for help output.
    pub fn description(self) -> &'static str {
        match self {
            Self::Location => "location where boxes may be",
            Self::Room => "room at origin & destination",
            Self::User => "user who owns database or performs a box scan",
            Self::Project => "overall move project info",
            Self::BatchMove => "batch/group of moving boxes",
            Self::MovingBox => "moving box including label info",
            Self::Item => "item inside a box",
            Self::BoxScan => "box scan event on move to new location",
            Self::Image => "images for boxes or items",
        }
    }

    /// Look up a kind by its CLI name or table name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.cli_name() == name || k.table_name() == name)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ModelError::UnknownRecordKind(s.to_string()))
    }
}

// ── Value ───────────────────────────────────────────────────────────────────

/// A single field value as stored in, or supplied to, the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    /// Interpret the value as a row id.
    ///
    /// Integers and strings made only of ASCII digits count as ids; any
    /// other string is a natural key.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse().ok()
            }
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ── Record ──────────────────────────────────────────────────────────────────

/// A field-name → value map for one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The record's `id` field, if present and numeric.
    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_id)
    }

    /// Text content of a field, if it is a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Parse a `field=value` command-line assignment.
pub fn parse_assignment(arg: &str) -> Option<(String, String)> {
    let (field, value) = arg.split_once('=')?;
    let field = field.trim().trim_start_matches("--");
    if field.is_empty() {
        return None;
    }
    Some((field.to_string(), value.to_string()))
}

/// Widest `start-end` range accepted by [`expand_id_ranges`].
pub const MAX_ID_RANGE: i64 = 5000;

/// Expand box id arguments: single ids and inclusive `start-end` ranges.
/// A range spanning more than [`MAX_ID_RANGE`] ids is rejected.
pub fn expand_id_ranges<S: AsRef<str>>(args: &[S]) -> Result<Vec<i64>, ModelError> {
    let mut ids = Vec::new();
    for arg in args {
        let arg = arg.as_ref().trim();
        let bad = || ModelError::InvalidIdRange(arg.to_string());
        match arg.split_once('-') {
            Some((start, end)) => {
                let start: i64 = start.trim().parse().map_err(|_| bad())?;
                let end: i64 = end.trim().parse().map_err(|_| bad())?;
                if end < start || end - start >= MAX_ID_RANGE {
                    return Err(bad());
                }
                ids.extend(start..=end);
            }
            None => ids.push(arg.parse().map_err(|_| bad())?),
        }
    }
    Ok(ids)
}
