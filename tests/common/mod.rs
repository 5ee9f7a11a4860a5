//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use roster_appeal::error::{AppealError, Result};
use roster_appeal::sheets::{ACTIVE_SHEET_ID, ARCHIVE_SHEET_ID};
use roster_appeal::{A1Range, Mutation, SheetsApi};
use tempfile::TempDir;

pub const SPREADSHEET_ID: &str = "test-spreadsheet";

/// In-memory stand-in for the spreadsheet, recording every call
#[derive(Default)]
pub struct FakeSheets {
    active: RefCell<Vec<Vec<String>>>,
    archive: RefCell<Vec<Vec<String>>>,
    reads: RefCell<Vec<String>>,
    batches: RefCell<Vec<Vec<Mutation>>>,
    fail_reads: Cell<bool>,
    fail_batches: Cell<bool>,
    ghost_rows: RefCell<Vec<u32>>,
}

impl FakeSheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set row 1 of the active sheet
    pub fn with_header(self, labels: &[&str]) -> Self {
        {
            let mut active = self.active.borrow_mut();
            let header = labels.iter().map(|s| s.to_string()).collect();
            if active.is_empty() {
                active.push(header);
            } else {
                active[0] = header;
            }
        }
        self
    }

    /// Append a data row below the existing ones
    pub fn with_row(self, cells: &[&str]) -> Self {
        {
            let mut active = self.active.borrow_mut();
            if active.is_empty() {
                active.push(Vec::new());
            }
            active.push(cells.iter().map(|s| s.to_string()).collect());
        }
        self
    }

    /// Append a row whose name is listed in column A but whose full-row read is empty
    pub fn with_ghost_row(self, name: &str) -> Self {
        let position = {
            let mut active = self.active.borrow_mut();
            if active.is_empty() {
                active.push(Vec::new());
            }
            active.push(vec![name.to_string()]);
            active.len() as u32
        };
        self.ghost_rows.borrow_mut().push(position);
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.set(true);
        self
    }

    pub fn failing_batches(self) -> Self {
        self.fail_batches.set(true);
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }

    pub fn batches(&self) -> Vec<Vec<Mutation>> {
        self.batches.borrow().clone()
    }

    pub fn active_rows(&self) -> Vec<Vec<String>> {
        self.active.borrow().clone()
    }

    pub fn archived_rows(&self) -> Vec<Vec<String>> {
        self.archive.borrow().clone()
    }
}

impl SheetsApi for FakeSheets {
    fn read_range(&self, _spreadsheet_id: &str, range: &A1Range) -> Result<Vec<Vec<String>>> {
        self.reads.borrow_mut().push(range.to_string());
        if self.fail_reads.get() {
            return Err(AppealError::RemoteStore("HTTP 503: The service is unavailable.".into()));
        }

        let active = self.active.borrow();
        Ok(match range {
            A1Range::Row(row) if self.ghost_rows.borrow().contains(row) => Vec::new(),
            A1Range::Row(row) => active
                .get((*row as usize).saturating_sub(1))
                .filter(|cells| !cells.is_empty())
                .map(|cells| vec![cells.clone()])
                .unwrap_or_default(),
            A1Range::Column { from_row, .. } => active
                .iter()
                .skip((*from_row as usize).saturating_sub(1))
                .map(|cells| cells.first().cloned().into_iter().collect())
                .collect(),
        })
    }

    fn batch_mutate(&self, _spreadsheet_id: &str, mutations: &[Mutation]) -> Result<()> {
        self.batches.borrow_mut().push(mutations.to_vec());
        if self.fail_batches.get() {
            return Err(AppealError::RemoteStore("HTTP 429: Quota exceeded".into()));
        }

        for mutation in mutations {
            match mutation {
                Mutation::DeleteRows { sheet_id, start_index, end_index } => {
                    assert_eq!(*sheet_id, ACTIVE_SHEET_ID, "rows are only deleted from the roster");
                    self.active.borrow_mut().drain(*start_index as usize..*end_index as usize);
                }
                Mutation::AppendRow { sheet_id, values } => {
                    assert_eq!(*sheet_id, ARCHIVE_SHEET_ID, "rows are only appended to the archive");
                    self.archive.borrow_mut().push(values.clone());
                }
            }
        }
        Ok(())
    }
}

/// The two-person roster used across scenarios
pub fn sample_roster() -> FakeSheets {
    FakeSheets::new()
        .with_header(&["Name", "Phone"])
        .with_row(&["John Appleseed", "555-1234"])
        .with_row(&["Mary Major", "555-9876"])
}

/// Path of the service-account key checked into the fixtures
pub fn fixture_key_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/service_account.json")
}

pub fn fixture_key_json() -> String {
    std::fs::read_to_string(fixture_key_path()).expect("Failed to read fixture key")
}

/// Temporary working directory for credential files
pub fn temp_workdir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}
