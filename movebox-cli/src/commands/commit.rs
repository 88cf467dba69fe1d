use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use movebox_db::CommitOutcome;

use super::AppContext;
use crate::error::CliError;

/// Move the boxes scanned in a batch to the batch's location.
pub(crate) fn run_commit(ctx: &AppContext, db: &Path, batch_id: i64) -> Result<(), CliError> {
    let mut store = ctx.open_store(db)?;
    match store.commit_batch(batch_id)? {
        CommitOutcome::Moved(n) => log::info!(
            "Batch {}: moved {} box{}",
            batch_id,
            n.if_supports_color(Stdout, |t| t.green()),
            if n == 1 { "" } else { "es" }
        ),
        CommitOutcome::NoRecordsModified => log::warn!(
            "Batch {}: no boxes needed moving",
            batch_id
        ),
    }
    Ok(())
}
