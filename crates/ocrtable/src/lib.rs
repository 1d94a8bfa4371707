//! ocrtable: rebuild OCR-recognized tables as HTML, text, and spreadsheets.
//!
//! This is the public API facade crate for ocrtable-rs. It re-exports types
//! from ocrtable-core and ocrtable-parse and adds the renderer boundary
//! ([`TableConverter`]) and the xlsx exporter.
//!
//! # Architecture
//!
//! - **ocrtable-core**: table model, grid reconstruction, HTML and text renderers
//! - **ocrtable-parse**: vendor response normalization (Baidu, Tencent Cloud, Aliyun)
//! - **ocrtable** (this crate): public API that ties everything together
//!
//! ```
//! use ocrtable::{NormalizeOptions, TableConverter, Vendor};
//!
//! let body = r#"{"cells": [
//!     {"text": "A", "row_start": 0, "row_end": 1, "col_start": 0, "col_end": 1},
//!     {"text": "B", "row_start": 0, "row_end": 1, "col_start": 1, "col_end": 2},
//!     {"text": "C", "row_start": 1, "row_end": 2, "col_start": 0, "col_end": 2}
//! ]}"#;
//! let table = Vendor::Canonical
//!     .normalize_first(body, &NormalizeOptions::default())
//!     .unwrap()
//!     .value;
//! assert_eq!(TableConverter::new().to_text_display(&table), "A\tB\nC\t");
//! ```

mod converter;
#[cfg(feature = "xlsx")]
pub mod xlsx;

pub use converter::{NO_TABLE_MESSAGE, Rendered, RenderedOutputs, TableConverter, guarded};
pub use ocrtable_core;
pub use ocrtable_core::{
    CellAlignment, CellSpan, FooterSegment, Grid, GridCell, HeaderLayout, HtmlOptions,
    HtmlRenderer, Outcome, RenderError, Slot, SpanDefect, Table, TextOptions, TextRenderer,
    UnicodeNorm, Warning, WarningCode, build_grid, classify_alignment, clipboard_fragment,
    footer_segments,
};
pub use ocrtable_parse;
pub use ocrtable_parse::{NormalizationError, NormalizeOptions, Vendor, normalize_auto};
#[cfg(feature = "xlsx")]
pub use xlsx::{SheetPlan, Workbook, XlsxExporter, XlsxOptions};
