use std::io::Write;
use std::path::Path;

use super::AppContext;
use crate::error::CliError;

/// Write the database as SQL text to stdout.
pub(crate) fn run_dump(ctx: &AppContext, db: &Path) -> Result<(), CliError> {
    let store = ctx.open_store(db)?;
    let sql = store.dump()?;
    let mut out = std::io::stdout().lock();
    out.write_all(sql.as_bytes())?;
    out.flush()?;
    Ok(())
}
