use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movebox_db::{DataTable, Display};
use movebox_model::{parse_assignment, Record, RecordKind, Value};

use super::AppContext;
use crate::cli_types::RecordOp;
use crate::error::CliError;

/// Split `[ID] [FIELD=VALUE ...]` arguments into an optional id and the
/// assigned fields.
pub(crate) fn parse_record_args(args: &[String]) -> Result<(Option<i64>, Record), CliError> {
    let mut id = None;
    let mut data = Record::new();
    for (i, arg) in args.iter().enumerate() {
        match parse_assignment(arg) {
            Some((field, value)) => {
                data.insert(field, value);
            }
            None if i == 0 => {
                let parsed = arg
                    .trim()
                    .parse()
                    .map_err(|_| CliError::usage(format!("expected a record id, got '{arg}'")))?;
                id = Some(parsed);
            }
            None => {
                return Err(CliError::usage(format!(
                    "expected FIELD=VALUE, got '{arg}'"
                )));
            }
        }
    }
    if let Some(field_id) = data.remove("id") {
        match (id, field_id.as_id()) {
            (_, None) => return Err(CliError::usage("id must be a number")),
            (Some(a), Some(b)) if a != b => {
                return Err(CliError::usage(format!("conflicting ids {a} and {b}")));
            }
            (_, Some(b)) => id = Some(b),
        }
    }
    Ok((id, data))
}

fn require_id(kind: RecordKind, id: Option<i64>) -> Result<i64, CliError> {
    // The project is a singleton, addressed as 1 when no id is given
    match (kind, id) {
        (_, Some(id)) => Ok(id),
        (RecordKind::Project, None) => Ok(1),
        (_, None) => Err(CliError::usage(format!("{kind} needs a record id"))),
    }
}

pub(crate) fn run_record(
    ctx: &AppContext,
    db: &Path,
    kind: RecordKind,
    op: RecordOp,
    args: &[String],
) -> Result<(), CliError> {
    let (id, mut data) = parse_record_args(args)?;
    let mut store = ctx.open_store(db)?;

    match op {
        RecordOp::Create => {
            if let Some(id) = id {
                data.insert("id", id);
            }
            let new_id = store.create(kind, data)?;
            log::info!(
                "Created {} {}",
                kind,
                new_id.if_supports_color(Stdout, |t| t.green())
            );
        }
        RecordOp::Read => {
            let id = require_id(kind, id)?;
            let row = store.read(kind, id)?;
            let table = DataTable::from_records(kind, &[row]);
            if let Some(ui) = store.ui() {
                ui.display(Display::Table(&table));
            }
        }
        RecordOp::Update => {
            let id = require_id(kind, id)?;
            data.insert("id", Value::Integer(id));
            store.update(kind, data)?;
            log::info!("Updated {} {}", kind, id);
        }
        RecordOp::Delete => {
            let id = require_id(kind, id)?;
            if !data.is_empty() {
                return Err(CliError::usage("delete takes only a record id"));
            }
            store.delete(kind, id)?;
            log::info!("Deleted {} {}", kind, id);
        }
    }
    Ok(())
}
