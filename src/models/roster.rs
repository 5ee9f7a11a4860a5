use serde::Serialize;

/// A roster row located by a search
///
/// `position` is the 1-based row number on the active sheet, header included, so the
/// first data row is 2. Rows carry no identity beyond their position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterMatch {
    pub position: u32,
    pub cells: Vec<String>,
}

impl RosterMatch {
    pub fn new(position: u32, cells: Vec<String>) -> Self {
        Self { position, cells }
    }

    /// Pairs header labels with this row's cells, stopping at the shorter of the two
    pub fn fields<'a>(&'a self, header: &'a [String]) -> impl Iterator<Item = (&'a str, &'a str)> {
        header.iter().map(String::as_str).zip(self.cells.iter().map(String::as_str))
    }

    /// First cell, which holds the person's name
    pub fn name(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }
}
