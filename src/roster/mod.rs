//! Roster operations over a spreadsheet.
//!
//! [`Roster`] binds a [`SheetsApi`] to one spreadsheet and memoizes the header row for
//! as long as the handle lives. The header never changes during a session, so it is
//! read at most once per client.

pub mod archive;
pub mod search;

use std::sync::OnceLock;

pub use archive::archive_row;
pub use search::find_row;

use crate::error::{AppealError, Result};
use crate::models::{Query, RosterMatch};
use crate::sheets::{A1Range, SheetsApi};
use crate::utils::row_link;

pub struct Roster<S> {
    api: S,
    spreadsheet_id: String,
    header: OnceLock<Vec<String>>,
}

impl<S: SheetsApi> Roster<S> {
    pub fn new(api: S, spreadsheet_id: impl Into<String>) -> Self {
        Self { api, spreadsheet_id: spreadsheet_id.into(), header: OnceLock::new() }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn api(&self) -> &S {
        &self.api
    }

    /// Column labels from row 1, fetched on first use
    pub fn header(&self) -> Result<&[String]> {
        if let Some(header) = self.header.get() {
            return Ok(header);
        }

        let header = self
            .api
            .read_range(&self.spreadsheet_id, &A1Range::header())?
            .into_iter()
            .next()
            .unwrap_or_default();
        if header.is_empty() {
            return Err(AppealError::InvariantViolation(
                "No header found in spreadsheet".to_string(),
            ));
        }

        Ok(self.header.get_or_init(|| header))
    }

    /// The header if it has already been fetched
    pub fn cached_header(&self) -> Option<&[String]> {
        self.header.get().map(Vec::as_slice)
    }

    pub fn find_row(&self, query: &Query) -> Result<Option<RosterMatch>> {
        find_row(&self.api, &self.spreadsheet_id, query)
    }

    pub fn archive_row(&self, found: &RosterMatch) -> Result<()> {
        archive_row(&self.api, &self.spreadsheet_id, found.position, &found.cells)
    }

    pub fn row_link(&self, position: u32) -> String {
        row_link(&self.spreadsheet_id, position)
    }
}
