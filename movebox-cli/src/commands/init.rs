use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movebox_model::Record;

use super::AppContext;
use crate::error::CliError;

/// Create a database file and its project record.
///
/// Fields not given as flags are prompted for.
pub(crate) fn run_init(
    ctx: &AppContext,
    db: &Path,
    user: Option<String>,
    title: Option<String>,
    found: Option<String>,
) -> Result<(), CliError> {
    let mut store = ctx.open_store(db)?;
    if store.project()?.is_some() {
        return Err(CliError::usage(format!(
            "{} is already initialized",
            store.path().display()
        )));
    }

    let mut data = Record::new();
    for (field, value) in [("primary_user", user), ("title", title), ("found_contact", found)] {
        if let Some(v) = value {
            data.insert(field, v);
        }
    }
    store.init_project(data)?;

    log::info!(
        "Created {} (images in {})",
        store.path().display().if_supports_color(Stdout, |t| t.cyan()),
        store.image_dir().display(),
    );
    Ok(())
}
