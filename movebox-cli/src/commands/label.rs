use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movebox_model::{expand_id_ranges, LabelKind};

use super::AppContext;
use crate::error::CliError;

/// Print label data for each box: what a renderer would lay out.
pub(crate) fn run_label(
    ctx: &AppContext,
    db: &Path,
    ids: &[String],
    label_type: Option<LabelKind>,
) -> Result<(), CliError> {
    let kind = label_type
        .or(ctx.settings.default_label)
        .unwrap_or_default();
    let box_ids = expand_id_ranges(ids)?;
    let store = ctx.open_store(db)?;

    log::info!(
        "{} label{} ({})",
        box_ids.len(),
        if box_ids.len() == 1 { "" } else { "s" },
        kind
    );
    for box_id in box_ids {
        let label = store.box_label_data(box_id)?;
        log::info!("");
        log::info!(
            "{} {}",
            "Box".if_supports_color(Stdout, |t| t.bold()),
            label.box_number().if_supports_color(Stdout, |t| t.bold()),
        );
        log::info!("  Room:  {}", label.room_label());
        log::info!(
            "  Color: {} {}",
            label.color_name(),
            label.color_hex().unwrap_or_default().if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("  Owner: {}", label.user);
        log::info!("  Found: {}", label.found);
        log::info!("  URI:   {}", label.uri().if_supports_color(Stdout, |t| t.cyan()));
        log::info!("  File:  {}", label.pdf_basename());
    }
    Ok(())
}

/// Print destination sign data for a room.
pub(crate) fn run_sign(ctx: &AppContext, db: &Path, room_id: i64) -> Result<(), CliError> {
    let store = ctx.open_store(db)?;
    let sign = store.room_sign_data(room_id)?;
    log::info!("{}", sign.room_label().if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Color: {} {}",
        sign.color,
        sign.color_hex().unwrap_or_default().if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Title: {}", sign.title);
    log::info!("  File:  {}", sign.pdf_basename());
    Ok(())
}
