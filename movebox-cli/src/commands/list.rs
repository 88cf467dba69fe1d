use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movebox_db::{field_specs, DataTable, Display, FieldRule, Interpolation};
use movebox_model::RecordKind;

use super::AppContext;
use crate::error::CliError;

/// Show every record of a table.
pub(crate) fn run_list(ctx: &AppContext, db: &Path, kind: RecordKind) -> Result<(), CliError> {
    let store = ctx.open_store(db)?;
    let rows = store.list(kind)?;
    let table = DataTable::from_records(kind, &rows);
    if let Some(ui) = store.ui() {
        ui.display(Display::Table(&table));
    }
    Ok(())
}

/// Describe the fields a table accepts.
pub(crate) fn run_fields(kind: RecordKind) {
    log::info!(
        "{} ({}): {}",
        kind.cli_name().if_supports_color(Stdout, |t| t.bold()),
        kind.table_name(),
        kind.description(),
    );

    for spec in field_specs(kind) {
        let mut notes = Vec::new();
        for rule in spec.rules {
            match rule {
                FieldRule::Required => notes.push("required".to_string()),
                FieldRule::References(target) => notes.push(format!("→ {target}")),
                FieldRule::Interpolate(Interpolation::Color) => notes.push("color".to_string()),
                FieldRule::Interpolate(Interpolation::Timestamp) => {
                    notes.push("timestamp".to_string())
                }
                FieldRule::Interpolate(Interpolation::Image) => notes.push("image file".to_string()),
                FieldRule::Generate(_) => notes.push("generated".to_string()),
                FieldRule::Prompt(_) => {}
            }
        }
        let prompt = spec
            .prompt()
            .map(|p| format!(" \"{p}\""))
            .unwrap_or_default();
        log::info!(
            "  {}{}{}",
            format!("{:<14}", spec.name).if_supports_color(Stdout, |t| t.cyan()),
            if notes.is_empty() {
                String::new()
            } else {
                format!(" [{}]", notes.join(", "))
            },
            prompt.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
