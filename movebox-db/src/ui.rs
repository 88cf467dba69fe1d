//! User interface callback contract.
//!
//! Front ends (the CLI today) implement [`UiCallback`] so the record
//! resolver can ask for missing fields. A store without a UI never prompts
//! and instead requires every required field up front.

use std::collections::BTreeMap;
use std::io;

use movebox_model::{Record, RecordKind, Value};

use crate::fields;

/// A field the resolver would like the user to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPrompt {
    pub field: &'static str,
    pub prompt: &'static str,
}

/// Rows to show in tabular form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Lay out records using the kind's declared field order.
    ///
    /// Fields present in a record but not declared (e.g. joined columns)
    /// are appended after the declared ones.
    pub fn from_records(kind: RecordKind, records: &[Record]) -> Self {
        let mut columns: Vec<String> = fields::fields(kind)
            .into_iter()
            .map(str::to_string)
            .collect();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }
        let rows = records
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| r.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Something for the UI to show.
#[derive(Debug, Clone, Copy)]
pub enum Display<'a> {
    Text(&'a str),
    Table(&'a DataTable),
}

/// Callbacks supplied by whatever front end drives the store.
pub trait UiCallback {
    /// Ask for values of the given fields of `table`.
    ///
    /// Returns field → answer; blank answers may be omitted or empty, and
    /// are ignored either way.
    fn prompt(&self, table: &str, prompts: &[FieldPrompt]) -> io::Result<BTreeMap<String, String>>;

    fn display(&self, output: Display<'_>);

    fn error(&self, text: &str, context: Option<&str>);
}
