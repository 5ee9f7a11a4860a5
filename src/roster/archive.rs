use tracing::info;

use crate::error::{AppealError, Result};
use crate::sheets::{ACTIVE_SHEET_ID, ARCHIVE_SHEET_ID, Mutation, SheetsApi};

/// The two edits that move a row from the active sheet to the archive
///
/// `position` is 1-based; the deletion range is its zero-based half-open equivalent.
pub fn archive_mutations(position: u32, cells: &[String]) -> Result<[Mutation; 2]> {
    if position == 0 {
        return Err(AppealError::InvariantViolation(
            "row positions start at 1".to_string(),
        ));
    }

    Ok([
        Mutation::DeleteRows {
            sheet_id: ACTIVE_SHEET_ID,
            start_index: position - 1,
            end_index: position,
        },
        Mutation::AppendRow { sheet_id: ARCHIVE_SHEET_ID, values: cells.to_vec() },
    ])
}

/// Delete row `position` from the active sheet and append `cells` to the archive
///
/// Both edits travel in one batch. Failures are returned as-is: nothing is retried or
/// rolled back, and callers must not assume the active sheet is unchanged afterwards.
pub fn archive_row<S: SheetsApi + ?Sized>(
    api: &S,
    spreadsheet_id: &str,
    position: u32,
    cells: &[String],
) -> Result<()> {
    let mutations = archive_mutations(position, cells)?;
    api.batch_mutate(spreadsheet_id, &mutations)?;

    info!("Archived row {position} ({} cells)", cells.len());
    Ok(())
}
