//! In-memory spreadsheet for unit tests

use std::cell::{Cell, RefCell};

use super::range::A1Range;
use super::requests::Mutation;
use super::{ACTIVE_SHEET_ID, ARCHIVE_SHEET_ID, SheetsApi};
use crate::error::{AppealError, Result};

#[derive(Default)]
pub(crate) struct MemorySheets {
    pub active: RefCell<Vec<Vec<String>>>,
    pub archive: RefCell<Vec<Vec<String>>>,
    pub reads: RefCell<Vec<String>>,
    pub batches: RefCell<Vec<Vec<Mutation>>>,
    pub fail_reads: Cell<bool>,
    pub fail_batches: Cell<bool>,
    /// Rows whose name shows up in the column read but whose `n:n` read is empty
    pub ghost_rows: RefCell<Vec<u32>>,
}

impl MemorySheets {
    pub fn with_rows(rows: &[&[&str]]) -> Self {
        let sheets = Self::default();
        *sheets.active.borrow_mut() =
            rows.iter().map(|row| row.iter().map(|c| c.to_string()).collect()).collect();
        sheets
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }
}

impl SheetsApi for MemorySheets {
    fn read_range(&self, _spreadsheet_id: &str, range: &A1Range) -> Result<Vec<Vec<String>>> {
        self.reads.borrow_mut().push(range.to_string());
        if self.fail_reads.get() {
            return Err(AppealError::RemoteStore("HTTP 503: unavailable".to_string()));
        }

        let active = self.active.borrow();
        let rows = match range {
            A1Range::Row(row) if self.ghost_rows.borrow().contains(row) => Vec::new(),
            A1Range::Row(row) => active
                .get(*row as usize - 1)
                .filter(|cells| !cells.is_empty())
                .map(|cells| vec![cells.clone()])
                .unwrap_or_default(),
            A1Range::Column { from_row, .. } => active
                .iter()
                .skip(*from_row as usize - 1)
                .map(|cells| cells.first().cloned().into_iter().collect())
                .collect(),
        };
        Ok(rows)
    }

    fn batch_mutate(&self, _spreadsheet_id: &str, mutations: &[Mutation]) -> Result<()> {
        self.batches.borrow_mut().push(mutations.to_vec());
        if self.fail_batches.get() {
            return Err(AppealError::RemoteStore("HTTP 500: backend error".to_string()));
        }

        for mutation in mutations {
            match mutation {
                Mutation::DeleteRows { sheet_id, start_index, end_index } => {
                    assert_eq!(*sheet_id, ACTIVE_SHEET_ID);
                    self.active.borrow_mut().drain(*start_index as usize..*end_index as usize);
                }
                Mutation::AppendRow { sheet_id, values } => {
                    assert_eq!(*sheet_id, ARCHIVE_SHEET_ID);
                    self.archive.borrow_mut().push(values.clone());
                }
            }
        }
        Ok(())
    }
}
