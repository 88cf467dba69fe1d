//! Batch commit: move every scanned box to its batch's destination.

use movebox_model::RecordKind;
use rusqlite::Connection;

use crate::error::StoreError;
use crate::operations;
use crate::schema::table_schema;

/// Result of committing a batch move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Number of boxes whose location changed
    Moved(usize),
    /// Every scanned box was already at the destination (or none were scanned)
    NoRecordsModified,
}

impl CommitOutcome {
    pub fn count(self) -> usize {
        match self {
            Self::Moved(n) => n,
            Self::NoRecordsModified => 0,
        }
    }
}

/// Relocate the boxes scanned in `batch_id` to the batch's location.
///
/// Boxes already at the destination are not touched, so committing the
/// same batch twice reports [`CommitOutcome::NoRecordsModified`] the
/// second time.
pub fn commit_batch(conn: &Connection, batch_id: i64) -> Result<CommitOutcome, StoreError> {
    let batches = table_schema(RecordKind::BatchMove);
    if !operations::record_exists(conn, batches, batch_id)? {
        return Err(StoreError::not_found(batches.table, batch_id));
    }

    let sql = "UPDATE moving_box
               SET location = (SELECT location FROM batch_move WHERE id = ?1)
               WHERE id IN (SELECT box FROM box_scan WHERE batch = ?1)
                 AND location != (SELECT location FROM batch_move WHERE id = ?1)";
    log::debug!("{sql}");
    let moved = conn.execute(sql, [batch_id])?;

    if moved == 0 {
        log::info!("Batch {} moved no boxes", batch_id);
        Ok(CommitOutcome::NoRecordsModified)
    } else {
        log::info!("Batch {} moved {} boxes", batch_id, moved);
        Ok(CommitOutcome::Moved(moved))
    }
}
