//! Remote store access.
//!
//! The spreadsheet is treated as a row store with two sheets: the active roster
//! (sheet 0: header row plus one row per person, name in column A) and the archive
//! (sheet 1, append-only). [`SheetsApi`] is the seam between the roster logic and the
//! network; [`SheetsClient`] implements it against the Google Sheets v4 REST API.

pub mod auth;
pub mod client;
#[cfg(test)]
pub(crate) mod memory;
pub mod range;
pub mod requests;

pub use client::SheetsClient;
pub use range::A1Range;
pub use requests::Mutation;

use crate::error::Result;

/// Sheet holding the active roster
pub const ACTIVE_SHEET_ID: u32 = 0;
/// Sheet receiving archived rows
pub const ARCHIVE_SHEET_ID: u32 = 1;

pub trait SheetsApi {
    /// Raw rows of `range`; a range without data yields an empty vector
    fn read_range(&self, spreadsheet_id: &str, range: &A1Range) -> Result<Vec<Vec<String>>>;

    /// Apply `mutations` in one round trip. The batch either succeeds or fails as a whole
    /// from the caller's point of view.
    fn batch_mutate(&self, spreadsheet_id: &str, mutations: &[Mutation]) -> Result<()>;
}

/// Body of a failed response, or a marker naming why it could not be read
pub(crate) fn error_body(body: reqwest::Result<String>) -> String {
    body.unwrap_or_else(|e| format!("<body unreadable: {e}>"))
}

impl<T: SheetsApi + ?Sized> SheetsApi for &T {
    fn read_range(&self, spreadsheet_id: &str, range: &A1Range) -> Result<Vec<Vec<String>>> {
        (**self).read_range(spreadsheet_id, range)
    }

    fn batch_mutate(&self, spreadsheet_id: &str, mutations: &[Mutation]) -> Result<()> {
        (**self).batch_mutate(spreadsheet_id, mutations)
    }
}
