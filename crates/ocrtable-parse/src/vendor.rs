//! Vendor detection and the shared normalization pipeline.
//!
//! Each vendor module turns its wire format into [`Table`] values with
//! exclusive span ends. [`Vendor::normalize`] then applies the steps every
//! source shares: whitespace trimming, Unicode normalization, a grid
//! reconstruction pass to surface span defects, and strict-mode escalation.

use std::fmt;

use ocrtable_core::{MAX_GRID_AXIS, Outcome, Table, UnicodeNorm, build_grid, normalize_table};

use crate::error::{NormalizationError, check_extent, out_of_range};
use crate::{aliyun, baidu, tencent};

/// OCR service a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// Baidu AI table recognition.
    Baidu,
    /// Tencent Cloud table OCR.
    Tencent,
    /// Aliyun table OCR.
    Aliyun,
    /// The JSON form of [`Table`] itself.
    Canonical,
}

impl Vendor {
    /// All supported vendors, in detection order.
    pub const ALL: [Vendor; 4] = [
        Vendor::Baidu,
        Vendor::Tencent,
        Vendor::Aliyun,
        Vendor::Canonical,
    ];

    /// Short lowercase identifier, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Baidu => "baidu",
            Vendor::Tencent => "tencent",
            Vendor::Aliyun => "aliyun",
            Vendor::Canonical => "canonical",
        }
    }

    /// Guess the vendor from the top-level shape of a response.
    pub fn detect(value: &serde_json::Value) -> Result<Vendor, NormalizationError> {
        let object = match value {
            serde_json::Value::Array(_) => return Ok(Vendor::Canonical),
            serde_json::Value::Object(object) => object,
            other => {
                return Err(NormalizationError::UnknownFormat(format!(
                    "expected a JSON object, found {}",
                    json_kind(other)
                )));
            }
        };

        let has = |key: &str| object.contains_key(key);
        if has("tables_result") || has("error_code") {
            Ok(Vendor::Baidu)
        } else if has("Response") {
            Ok(Vendor::Tencent)
        } else if has("Data") || has("prism_tablesInfo") {
            Ok(Vendor::Aliyun)
        } else if has("cells") {
            Ok(Vendor::Canonical)
        } else if has("Code") {
            Ok(Vendor::Aliyun)
        } else {
            let keys: Vec<&str> = object.keys().map(String::as_str).take(8).collect();
            Err(NormalizationError::UnknownFormat(if keys.is_empty() {
                "empty JSON object".to_string()
            } else {
                format!("top-level keys: {}", keys.join(", "))
            }))
        }
    }

    /// Normalize a parsed response into tables.
    pub fn normalize(
        self,
        value: serde_json::Value,
        options: &NormalizeOptions,
    ) -> Result<Outcome<Vec<Table>>, NormalizationError> {
        let parsed = match self {
            Vendor::Baidu => baidu::parse(value)?,
            Vendor::Tencent => tencent::parse(value)?,
            Vendor::Aliyun => aliyun::parse(value)?,
            Vendor::Canonical => parse_canonical(value)?,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(vendor = %self, tables = parsed.value.len(), "response parsed");

        finish(parsed, options)
    }

    /// Normalize a response body.
    pub fn normalize_str(
        self,
        body: &str,
        options: &NormalizeOptions,
    ) -> Result<Outcome<Vec<Table>>, NormalizationError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        self.normalize(value, options)
    }

    /// Normalize a response body and keep only its first table.
    ///
    /// A response without tables yields an empty [`Table`], which renderers
    /// treat as "no table found".
    pub fn normalize_first(
        self,
        body: &str,
        options: &NormalizeOptions,
    ) -> Result<Outcome<Table>, NormalizationError> {
        Ok(self
            .normalize_str(body, options)?
            .map(|tables| tables.into_iter().next().unwrap_or_default()))
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Vendor::Baidu => "Baidu",
            Vendor::Tencent => "Tencent Cloud",
            Vendor::Aliyun => "Aliyun",
            Vendor::Canonical => "canonical",
        })
    }
}

/// Options for turning vendor responses into tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Unicode normalization applied to all text (default: NFKC).
    pub unicode_norm: UnicodeNorm,
    /// Trim surrounding whitespace and drop blank header/footer blocks (default: true).
    pub trim_text: bool,
    /// Fail on the first warning instead of collecting it (default: false).
    pub strict: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            unicode_norm: UnicodeNorm::Nfkc,
            trim_text: true,
            strict: false,
        }
    }
}

/// Detect the vendor of a response body and normalize it.
pub fn normalize_auto(
    body: &str,
    options: &NormalizeOptions,
) -> Result<(Vendor, Outcome<Vec<Table>>), NormalizationError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let vendor = Vendor::detect(&value)?;
    let outcome = vendor.normalize(value, options)?;
    Ok((vendor, outcome))
}

fn parse_canonical(value: serde_json::Value) -> Result<Outcome<Vec<Table>>, NormalizationError> {
    let many = value.is_array();
    let tables: Vec<Table> = if many {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    for (t, table) in tables.iter().enumerate() {
        let prefix = if many { format!("[{t}].") } else { String::new() };
        for (i, cell) in table.cells.iter().enumerate() {
            let coords = [
                ("row_start", cell.row_start),
                ("row_end", cell.row_end),
                ("col_start", cell.col_start),
                ("col_end", cell.col_end),
            ];
            if let Some((field, v)) = coords.into_iter().find(|&(_, v)| v > MAX_GRID_AXIS) {
                return Err(out_of_range(format!("{prefix}cells[{i}].{field}"), v));
            }
        }
        check_extent(table, || format!("{prefix}cells"))?;
    }
    Ok(Outcome::ok(tables))
}

fn finish(
    parsed: Outcome<Vec<Table>>,
    options: &NormalizeOptions,
) -> Result<Outcome<Vec<Table>>, NormalizationError> {
    let Outcome {
        value: mut tables,
        mut warnings,
    } = parsed;

    for table in &mut tables {
        if options.trim_text {
            trim_table(table);
        }
        normalize_table(table, options.unicode_norm);
        warnings.extend(build_grid(table).warnings().iter().cloned());
    }

    if options.strict {
        if let Some(first) = warnings.into_iter().next() {
            return Err(NormalizationError::Strict(first));
        }
        return Ok(Outcome::ok(tables));
    }

    #[cfg(feature = "tracing")]
    for warning in &warnings {
        tracing::warn!(%warning, "normalization warning");
    }

    Ok(Outcome::with_warnings(tables, warnings))
}

fn trim_table(table: &mut Table) {
    for cell in &mut table.cells {
        let trimmed = cell.text.trim();
        if trimmed.len() != cell.text.len() {
            cell.text = trimmed.to_string();
        }
    }
    for blocks in [&mut table.header, &mut table.footer] {
        blocks.retain(|b| !b.trim().is_empty());
        for block in blocks.iter_mut() {
            *block = block.trim().to_string();
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
