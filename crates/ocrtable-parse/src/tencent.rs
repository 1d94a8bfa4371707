//! Tencent Cloud table OCR responses.
//!
//! Grid cells carry exclusive `RowBr`/`ColBr`. Text recognized outside the
//! table comes back as cells whose coordinates are `-1`; those become header
//! or footer blocks depending on the cell `Type`. A detection may consist of
//! such blocks only (plain text above or below a table), in which case its
//! blocks are attached to a neighbouring table.

use ocrtable_core::{CellSpan, Outcome, Table, Warning, WarningCode};
use serde::Deserialize;

use crate::error::{NormalizationError, check_extent, coordinate, required};
use crate::vendor::Vendor;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Option<Response>,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(rename = "Error")]
    error: Option<ApiError>,
    #[serde(rename = "TableDetections")]
    detections: Option<Vec<Detection>>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct Detection {
    #[serde(rename = "Cells")]
    cells: Option<Vec<RawCell>>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(rename = "RowTl")]
    row_tl: Option<i64>,
    #[serde(rename = "RowBr")]
    row_br: Option<i64>,
    #[serde(rename = "ColTl")]
    col_tl: Option<i64>,
    #[serde(rename = "ColBr")]
    col_br: Option<i64>,
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
}

impl RawCell {
    /// Whether the cell lies outside the table grid.
    fn is_block(&self) -> bool {
        [self.row_tl, self.row_br, self.col_tl, self.col_br]
            .into_iter()
            .any(|v| v.is_none_or(|v| v < 0))
    }
}

#[derive(Debug, Default)]
struct Blocks {
    header: Vec<String>,
    footer: Vec<String>,
}

impl Blocks {
    fn is_empty(&self) -> bool {
        self.header.is_empty() && self.footer.is_empty()
    }

    fn push(&mut self, kind: Option<&str>, text: String) {
        match kind {
            Some(k) if k.eq_ignore_ascii_case("header") => self.header.push(text),
            _ => self.footer.push(text),
        }
    }

    fn append(&mut self, mut other: Blocks) {
        self.header.append(&mut other.header);
        self.footer.append(&mut other.footer);
    }
}

/// Parse a Tencent Cloud response into tables, in response order.
pub fn parse(value: serde_json::Value) -> Result<Outcome<Vec<Table>>, NormalizationError> {
    let envelope: Envelope = serde_json::from_value(value)?;
    let response = required(envelope.response, || "Response".to_string())?;

    if let Some(err) = response.error {
        return Err(NormalizationError::Vendor {
            vendor: Vendor::Tencent,
            code: err.code,
            message: err.message,
        });
    }

    let detections = required(response.detections, || {
        "Response.TableDetections".to_string()
    })?;

    let mut tables: Vec<Table> = Vec::new();
    let mut pending = Blocks::default();

    for (d, detection) in detections.into_iter().enumerate() {
        let raw_cells = required(detection.cells, || {
            format!("Response.TableDetections[{d}].Cells")
        })?;

        let mut cells = Vec::new();
        let mut blocks = Blocks::default();
        for (i, cell) in raw_cells.into_iter().enumerate() {
            let path = |field: &str| format!("Response.TableDetections[{d}].Cells[{i}].{field}");
            if cell.is_block() {
                blocks.push(cell.kind.as_deref(), required(cell.text, || path("Text"))?);
                continue;
            }
            cells.push(CellSpan::new(
                required(cell.text, || path("Text"))?,
                coordinate(cell.row_tl, || path("RowTl"))?,
                coordinate(cell.row_br, || path("RowBr"))?,
                coordinate(cell.col_tl, || path("ColTl"))?,
                coordinate(cell.col_br, || path("ColBr"))?,
            ));
        }

        if cells.is_empty() {
            pending.append(blocks);
            continue;
        }

        let mut attached = std::mem::take(&mut pending);
        attached.append(blocks);
        let table = Table::new(cells)
            .with_header(attached.header)
            .with_footer(attached.footer);
        check_extent(&table, || format!("Response.TableDetections[{d}]"))?;
        tables.push(table);
    }

    let mut warnings = Vec::new();
    if !pending.is_empty() {
        match tables.last_mut() {
            Some(last) => {
                last.header.append(&mut pending.header);
                last.footer.append(&mut pending.footer);
            }
            None => {
                for text in pending.header.iter().chain(pending.footer.iter()) {
                    warnings.push(Warning::with_code(
                        WarningCode::UnplacedBlock,
                        format!("text block {text:?} found but no table to attach it to"),
                    ));
                }
            }
        }
    }

    Ok(Outcome::with_warnings(tables, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(text: &str, row: (i64, i64), col: (i64, i64)) -> serde_json::Value {
        json!({
            "RowTl": row.0, "RowBr": row.1, "ColTl": col.0, "ColBr": col.1,
            "Text": text, "Type": "body", "Confidence": 99
        })
    }

    fn block(text: &str, kind: &str) -> serde_json::Value {
        json!({"RowTl": -1, "RowBr": -1, "ColTl": -1, "ColBr": -1, "Text": text, "Type": kind})
    }

    fn response(detections: serde_json::Value) -> serde_json::Value {
        json!({"Response": {"TableDetections": detections, "RequestId": "abc"}})
    }

    #[test]
    fn parses_grid_cells() {
        let value = response(json!([{
            "Type": 1,
            "Cells": [
                cell("A", (0, 1), (0, 1)),
                cell("B", (0, 1), (1, 2)),
                cell("C", (1, 2), (0, 2)),
            ]
        }]));
        let outcome = parse(value).unwrap();
        assert!(outcome.is_clean());
        assert_eq!(outcome.value.len(), 1);
        assert_eq!(outcome.value[0].cells[2], CellSpan::new("C", 1, 2, 0, 2));
    }

    #[test]
    fn classifies_out_of_grid_cells_by_type() {
        let value = response(json!([{
            "Cells": [
                block("Quarterly report", "header"),
                cell("A", (0, 1), (0, 1)),
                block("Prepared by finance", "footer"),
                block("untyped", "body"),
            ]
        }]));
        let table = &parse(value).unwrap().value[0];
        assert_eq!(table.header, vec!["Quarterly report".to_string()]);
        assert_eq!(
            table.footer,
            vec!["Prepared by finance".to_string(), "untyped".to_string()]
        );
    }

    #[test]
    fn untagged_block_defaults_to_footer() {
        let value = response(json!([{
            "Cells": [
                cell("A", (0, 1), (0, 1)),
                {"RowTl": -1, "RowBr": -1, "ColTl": -1, "ColBr": -1, "Text": "no type"},
            ]
        }]));
        let table = &parse(value).unwrap().value[0];
        assert!(table.header.is_empty());
        assert_eq!(table.footer, vec!["no type".to_string()]);
    }

    #[test]
    fn oversized_coordinate_names_path() {
        let value = response(json!([{"Cells": [
            cell("A", (0, 1), (0, 1)),
            cell("B", (0, 4_000_000_000_000), (1, 2)),
        ]}]));
        let err = parse(value).unwrap_err();
        assert!(matches!(err, NormalizationError::InvalidField { ref path, .. }
            if path == "Response.TableDetections[0].Cells[1].RowBr"));
    }

    #[test]
    fn grid_past_cell_limit_is_rejected() {
        let value = response(json!([{"Cells": [
            cell("corner", (4095, 4096), (0, 1)),
            cell("edge", (0, 1), (4095, 4096)),
        ]}]));
        let err = parse(value).unwrap_err();
        assert!(matches!(err, NormalizationError::InvalidField { ref path, .. }
            if path == "Response.TableDetections[0]"));
    }

    #[test]
    fn missing_coordinate_is_a_block() {
        let value = response(json!([{
            "Cells": [
                cell("A", (0, 1), (0, 1)),
                {"Text": "floating", "Type": "footer"},
            ]
        }]));
        let table = &parse(value).unwrap().value[0];
        assert_eq!(table.cells.len(), 1);
        assert_eq!(table.footer, vec!["floating".to_string()]);
    }

    #[test]
    fn block_only_detection_attaches_to_next_table() {
        let value = response(json!([
            {"Type": 0, "Cells": [block("Title above", "header")]},
            {"Type": 1, "Cells": [cell("A", (0, 1), (0, 1))]},
        ]));
        let outcome = parse(value).unwrap();
        assert_eq!(outcome.value.len(), 1);
        assert_eq!(outcome.value[0].header, vec!["Title above".to_string()]);
    }

    #[test]
    fn trailing_block_only_detection_attaches_to_previous_table() {
        let value = response(json!([
            {"Type": 1, "Cells": [cell("A", (0, 1), (0, 1))]},
            {"Type": 1, "Cells": [cell("B", (0, 1), (0, 1))]},
            {"Type": 0, "Cells": [block("Notes below", "other")]},
        ]));
        let outcome = parse(value).unwrap();
        assert_eq!(outcome.value.len(), 2);
        assert!(outcome.value[0].footer.is_empty());
        assert_eq!(outcome.value[1].footer, vec!["Notes below".to_string()]);
        assert!(outcome.is_clean());
    }

    #[test]
    fn blocks_without_any_table_warn() {
        let value = response(json!([{"Cells": [block("orphan", "header")]}]));
        let outcome = parse(value).unwrap();
        assert!(outcome.value.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].code, WarningCode::UnplacedBlock);
    }

    #[test]
    fn vendor_error_is_propagated() {
        let value = json!({"Response": {
            "Error": {"Code": "FailedOperation.ImageDecodeFailed", "Message": "image decode failed"},
            "RequestId": "r-1"
        }});
        let err = parse(value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tencent Cloud returned error FailedOperation.ImageDecodeFailed: image decode failed"
        );
    }

    #[test]
    fn missing_response() {
        let err = parse(json!({"TableDetections": []})).unwrap_err();
        assert_eq!(err.to_string(), "missing field `Response`");
    }

    #[test]
    fn missing_detections() {
        let err = parse(json!({"Response": {"RequestId": "r"}})).unwrap_err();
        assert_eq!(err.to_string(), "missing field `Response.TableDetections`");
    }

    #[test]
    fn missing_text_names_path() {
        let value = response(json!([{"Cells": [
            cell("A", (0, 1), (0, 1)),
            {"RowTl": 0, "RowBr": 1, "ColTl": 1, "ColBr": 2}
        ]}]));
        let err = parse(value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing field `Response.TableDetections[0].Cells[1].Text`"
        );
    }
}
