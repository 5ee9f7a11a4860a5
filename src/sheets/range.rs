use std::fmt;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// A1-notation range on the first sheet of a spreadsheet
///
/// Rows are 1-based and inclusive; columns are letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum A1Range {
    /// One column from `from_row` to the last row with data, e.g. `A2:A`
    Column { column: char, from_row: u32 },
    /// A complete row, e.g. `2:2`
    Row(u32),
}

impl A1Range {
    /// The name column below the header
    pub fn names() -> Self {
        A1Range::Column { column: 'A', from_row: 2 }
    }

    pub fn header() -> Self {
        A1Range::Row(1)
    }

    /// Path-segment form for the values endpoint
    pub fn encoded(&self) -> String {
        utf8_percent_encode(&self.to_string(), NON_ALPHANUMERIC).to_string()
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            A1Range::Column { column, from_row } => write!(f, "{column}{from_row}:{column}"),
            A1Range::Row(row) => write!(f, "{row}:{row}"),
        }
    }
}
