//! Baidu table recognition responses.
//!
//! Cells carry exclusive `row_end`/`col_end` already, and header/footer
//! text arrives in dedicated arrays beside `body`.
//!
//! ```json
//! {"tables_result": [{
//!     "header": [{"words": "Title"}],
//!     "body": [{"row_start": 0, "row_end": 1, "col_start": 0, "col_end": 1, "words": "A"}],
//!     "footer": []
//! }]}
//! ```

use ocrtable_core::{CellSpan, Outcome, Table};
use serde::Deserialize;

use crate::error::{NormalizationError, check_extent, coordinate, required};
use crate::vendor::Vendor;

#[derive(Debug, Deserialize)]
struct Response {
    error_code: Option<serde_json::Value>,
    error_msg: Option<String>,
    tables_result: Option<Vec<RawTable>>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    header: Vec<Block>,
    body: Option<Vec<RawCell>>,
    #[serde(default)]
    footer: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    words: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    row_start: Option<i64>,
    row_end: Option<i64>,
    col_start: Option<i64>,
    col_end: Option<i64>,
    words: Option<String>,
}

/// Parse a Baidu response into tables, in response order.
pub fn parse(value: serde_json::Value) -> Result<Outcome<Vec<Table>>, NormalizationError> {
    let response: Response = serde_json::from_value(value)?;

    if let Some(code) = response.error_code.filter(is_error_code) {
        return Err(NormalizationError::Vendor {
            vendor: Vendor::Baidu,
            code: code_to_string(&code),
            message: response.error_msg.unwrap_or_default(),
        });
    }

    let raw_tables = required(response.tables_result, || "tables_result".to_string())?;
    let mut tables = Vec::with_capacity(raw_tables.len());
    for (t, raw) in raw_tables.into_iter().enumerate() {
        let body = required(raw.body, || format!("tables_result[{t}].body"))?;

        let mut cells = Vec::with_capacity(body.len());
        for (i, cell) in body.into_iter().enumerate() {
            let path = |field: &str| format!("tables_result[{t}].body[{i}].{field}");
            cells.push(CellSpan::new(
                required(cell.words, || path("words"))?,
                coordinate(cell.row_start, || path("row_start"))?,
                coordinate(cell.row_end, || path("row_end"))?,
                coordinate(cell.col_start, || path("col_start"))?,
                coordinate(cell.col_end, || path("col_end"))?,
            ));
        }

        let header = blocks(raw.header, t, "header")?;
        let footer = blocks(raw.footer, t, "footer")?;
        let table = Table::new(cells).with_header(header).with_footer(footer);
        check_extent(&table, || format!("tables_result[{t}]"))?;
        tables.push(table);
    }

    Ok(Outcome::ok(tables))
}

fn blocks(raw: Vec<Block>, t: usize, kind: &str) -> Result<Vec<String>, NormalizationError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, block)| required(block.words, || format!("tables_result[{t}].{kind}[{i}].words")))
        .collect()
}

/// Baidu sends `error_code` as a number, occasionally as a string, and
/// some gateways echo `0` on success.
fn is_error_code(code: &serde_json::Value) -> bool {
    match code {
        serde_json::Value::Null => false,
        serde_json::Value::Number(n) => n.as_i64() != Some(0),
        serde_json::Value::String(s) => !s.is_empty() && s != "0",
        _ => true,
    }
}

fn code_to_string(code: &serde_json::Value) -> String {
    match code {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
