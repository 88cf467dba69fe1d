use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::AppContext;
use crate::error::CliError;
use crate::settings;

/// Show effective settings and their sources.
pub(crate) fn run_config_show(ctx: &AppContext) {
    log::info!(
        "{}",
        "moveboxtracker Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if ctx.settings_path.exists() {
        log::info!(
            "  Settings file: {} {}",
            ctx.settings_path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            ctx.settings_path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    log::info!(
        "  data_home:     {} {}",
        ctx.data_home.display(),
        format!("({})", ctx.data_home_source).if_supports_color(Stdout, |t| t.dimmed()),
    );
    let label = ctx.settings.default_label.unwrap_or_default();
    let source = if ctx.settings.default_label.is_some() {
        "(settings file)"
    } else {
        "(default)"
    };
    log::info!(
        "  default_label: {} {}",
        label,
        source.if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Print the settings file path.
pub(crate) fn run_config_path(ctx: &AppContext) {
    log::info!("{}", ctx.settings_path.display());
}

/// Save a new default data home.
pub(crate) fn run_config_set_data_home(ctx: &AppContext, path: &Path) -> Result<(), CliError> {
    let path = std::path::absolute(path)?;
    settings::save_data_home(&ctx.settings_path, &path)
        .map_err(|e| CliError::config(format!("{}: {e}", ctx.settings_path.display())))?;
    log::info!(
        "Saved data_home = {} in {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        ctx.settings_path.display(),
    );
    Ok(())
}
