//! Structural edits for `spreadsheets.batchUpdate`

use serde_json::{Value, json};

/// A single structural edit applied as part of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Delete rows `[start_index, end_index)`, zero-based
    DeleteRows { sheet_id: u32, start_index: u32, end_index: u32 },
    /// Append one row of string cells after the last row with data
    AppendRow { sheet_id: u32, values: Vec<String> },
}

impl Mutation {
    /// The `Request` object understood by the Sheets API
    pub fn to_request(&self) -> Value {
        match self {
            Mutation::DeleteRows { sheet_id, start_index, end_index } => json!({
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": start_index,
                        "endIndex": end_index,
                    },
                },
            }),
            Mutation::AppendRow { sheet_id, values } => {
                let cells: Vec<Value> = values
                    .iter()
                    .map(|v| json!({ "userEnteredValue": { "stringValue": v } }))
                    .collect();
                json!({
                    "appendCells": {
                        "sheetId": sheet_id,
                        "rows": [{ "values": cells }],
                        "fields": "*",
                    },
                })
            }
        }
    }
}

/// Request body for a batch of mutations
pub fn batch_update_body(mutations: &[Mutation]) -> Value {
    json!({ "requests": mutations.iter().map(Mutation::to_request).collect::<Vec<_>>() })
}
