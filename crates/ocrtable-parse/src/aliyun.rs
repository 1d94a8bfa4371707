//! Aliyun table OCR responses.
//!
//! The useful payload sits in `Data`, which the API gateway returns as a
//! JSON-encoded string; SDKs that decode it hand back an object instead, and
//! some callers pass the decoded payload directly. Both are accepted.
//!
//! Cell bounds are inclusive: `xec`/`yec` name the last occupied column and
//! row, so they are shifted by one to get exclusive ends.

use ocrtable_core::{CellSpan, Outcome, Table};
use serde::Deserialize;

use crate::error::{NormalizationError, check_extent, coordinate, inclusive_end, required};
use crate::vendor::Vendor;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Data")]
    data: Option<serde_json::Value>,
    #[serde(rename = "Code")]
    code: Option<serde_json::Value>,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "prism_tablesInfo")]
    tables: Option<Vec<RawTable>>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(rename = "prism_tablesInfo")]
    tables: Option<Vec<RawTable>>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(rename = "cellInfos")]
    cells: Option<Vec<RawCell>>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    word: Option<String>,
    xsc: Option<i64>,
    xec: Option<i64>,
    ysc: Option<i64>,
    yec: Option<i64>,
}

/// Parse an Aliyun response into tables, in response order.
pub fn parse(value: serde_json::Value) -> Result<Outcome<Vec<Table>>, NormalizationError> {
    let envelope: Envelope = serde_json::from_value(value)?;

    let (raw_tables, prefix) = match (envelope.data, envelope.tables) {
        (Some(data), _) => {
            let payload: Payload = match data {
                serde_json::Value::String(text) => serde_json::from_str(&text)?,
                other => serde_json::from_value(other)?,
            };
            let tables = required(payload.tables, || "Data.prism_tablesInfo".to_string())?;
            (tables, "Data.")
        }
        (None, Some(tables)) => (tables, ""),
        (None, None) => {
            if let Some(code) = envelope.code {
                return Err(NormalizationError::Vendor {
                    vendor: Vendor::Aliyun,
                    code: match code {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    },
                    message: envelope.message.unwrap_or_default(),
                });
            }
            return Err(NormalizationError::missing("Data"));
        }
    };

    let mut tables = Vec::with_capacity(raw_tables.len());
    for (t, raw) in raw_tables.into_iter().enumerate() {
        let raw_cells = required(raw.cells, || format!("{prefix}prism_tablesInfo[{t}].cellInfos"))?;
        let mut cells = Vec::with_capacity(raw_cells.len());
        for (i, cell) in raw_cells.into_iter().enumerate() {
            let path = |field: &str| format!("{prefix}prism_tablesInfo[{t}].cellInfos[{i}].{field}");
            let col_start = coordinate(cell.xsc, || path("xsc"))?;
            let col_end = inclusive_end(cell.xec, || path("xec"))?;
            let row_start = coordinate(cell.ysc, || path("ysc"))?;
            let row_end = inclusive_end(cell.yec, || path("yec"))?;
            cells.push(CellSpan::new(
                required(cell.word, || path("word"))?,
                row_start,
                row_end,
                col_start,
                col_end,
            ));
        }
        let table = Table::new(cells);
        check_extent(&table, || format!("{prefix}prism_tablesInfo[{t}]"))?;
        tables.push(table);
    }

    Ok(Outcome::ok(tables))
}
