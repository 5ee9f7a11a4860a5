//! Two-phase roster lookup.
//!
//! Phase one reads the whole name column (`A2:A`) in a single call and scans it lazily
//! top to bottom. Phase two fetches the complete row of a candidate. A candidate whose
//! full row comes back empty is treated as a ghost entry and the scan continues.

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Query, RosterMatch};
use crate::sheets::{A1Range, SheetsApi};

/// First data row; row 1 is the header
const FIRST_DATA_ROW: u32 = 2;

/// Find the first roster row whose name contains `query`, ignoring case
///
/// Returns `Ok(None)` when nothing matches, including for an empty query, which
/// issues no remote call at all. When several names match, the topmost wins.
pub fn find_row<S: SheetsApi + ?Sized>(
    api: &S,
    spreadsheet_id: &str,
    query: &Query,
) -> Result<Option<RosterMatch>> {
    if query.is_empty() {
        debug!("Empty query, skipping search");
        return Ok(None);
    }

    let column = api.read_range(spreadsheet_id, &A1Range::names())?;

    for (index, name) in name_candidates(&column) {
        if !query.matches(name) {
            continue;
        }

        let position = index as u32 + FIRST_DATA_ROW;
        let cells = api
            .read_range(spreadsheet_id, &A1Range::Row(position))?
            .into_iter()
            .next()
            .unwrap_or_default();

        if cells.is_empty() {
            debug!("Row {position} matched by name but is empty, continuing");
            continue;
        }

        info!("Query {:?} matched row {position}", query.as_str());
        return Ok(Some(RosterMatch::new(position, cells)));
    }

    info!("Query {:?} matched no rows", query.as_str());
    Ok(None)
}

/// Non-empty names paired with their offset from the first data row
fn name_candidates(column: &[Vec<String>]) -> impl Iterator<Item = (usize, &str)> {
    column.iter().enumerate().filter_map(|(index, row)| {
        row.first().map(String::as_str).filter(|name| !name.is_empty()).map(|name| (index, name))
    })
}
