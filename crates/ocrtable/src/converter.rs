//! The renderer boundary.
//!
//! [`TableConverter`] drives the renderers for one table. Every entry point
//! builds the grid once, runs the renderers behind [`std::panic::catch_unwind`],
//! and reports a table without content as [`Rendered::NoTable`] rather than
//! as an error. The `*_display` methods fold all three outcomes into a string
//! that can be shown to a user directly.

use std::panic::{AssertUnwindSafe, catch_unwind};

use ocrtable_core::{
    Grid, HtmlOptions, HtmlRenderer, RenderError, Table, TextOptions, TextRenderer, build_grid,
    clipboard_fragment,
};

#[cfg(feature = "xlsx")]
use crate::xlsx::{Workbook, XlsxExporter, XlsxOptions};

/// Message shown when a response contains no table.
pub const NO_TABLE_MESSAGE: &str = "no table found";

/// Result of rendering a table that may be empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<T> {
    /// The rendered output.
    Table(T),
    /// The table had no cells and no header/footer blocks.
    NoTable,
}

impl<T> Rendered<T> {
    /// Returns true for [`Rendered::NoTable`].
    pub fn is_no_table(&self) -> bool {
        matches!(self, Rendered::NoTable)
    }

    /// The output, if there was a table.
    pub fn into_option(self) -> Option<T> {
        match self {
            Rendered::Table(value) => Some(value),
            Rendered::NoTable => None,
        }
    }

    /// Transform the output, keeping `NoTable` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Rendered<U> {
        match self {
            Rendered::Table(value) => Rendered::Table(f(value)),
            Rendered::NoTable => Rendered::NoTable,
        }
    }
}

impl Rendered<String> {
    /// The output, or [`NO_TABLE_MESSAGE`].
    pub fn into_display(self) -> String {
        match self {
            Rendered::Table(text) => text,
            Rendered::NoTable => NO_TABLE_MESSAGE.to_string(),
        }
    }
}

/// Every output of one table, rendered from a single grid.
#[derive(Debug)]
pub struct RenderedOutputs {
    pub html: String,
    pub text: String,
    #[cfg(feature = "xlsx")]
    pub workbook: Workbook,
}

/// Renders tables with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct TableConverter {
    pub html: HtmlOptions,
    pub text: TextOptions,
    #[cfg(feature = "xlsx")]
    pub xlsx: XlsxOptions,
}

impl TableConverter {
    /// A converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html_options(mut self, options: HtmlOptions) -> Self {
        self.html = options;
        self
    }

    pub fn with_text_options(mut self, options: TextOptions) -> Self {
        self.text = options;
        self
    }

    #[cfg(feature = "xlsx")]
    pub fn with_xlsx_options(mut self, options: XlsxOptions) -> Self {
        self.xlsx = options;
        self
    }

    /// HTML `<table>` markup.
    pub fn to_html(&self, table: &Table) -> Result<Rendered<String>, RenderError> {
        self.run(table, |grid| {
            Ok(HtmlRenderer::render_grid(grid, table, &self.html))
        })
    }

    /// HTML wrapped in the CF_HTML clipboard envelope.
    pub fn to_clipboard_html(&self, table: &Table) -> Result<Rendered<String>, RenderError> {
        Ok(self.to_html(table)?.map(|html| clipboard_fragment(&html)))
    }

    /// Tab-separated text.
    pub fn to_text(&self, table: &Table) -> Result<Rendered<String>, RenderError> {
        self.run(table, |grid| {
            Ok(TextRenderer::render_grid(grid, table, &self.text))
        })
    }

    /// An in-memory xlsx workbook.
    #[cfg(feature = "xlsx")]
    pub fn to_workbook(&self, table: &Table) -> Result<Rendered<Workbook>, RenderError> {
        self.run(table, |grid| XlsxExporter::export_grid(grid, table, &self.xlsx))
    }

    /// Serialized xlsx bytes.
    #[cfg(feature = "xlsx")]
    pub fn to_xlsx_bytes(&self, table: &Table) -> Result<Rendered<Vec<u8>>, RenderError> {
        self.run(table, |grid| {
            XlsxExporter::export_grid(grid, table, &self.xlsx)?.to_bytes()
        })
    }

    /// All outputs from one grid, so their merge layouts cannot disagree.
    pub fn render_all(&self, table: &Table) -> Result<Rendered<RenderedOutputs>, RenderError> {
        self.run(table, |grid| {
            Ok(RenderedOutputs {
                html: HtmlRenderer::render_grid(grid, table, &self.html),
                text: TextRenderer::render_grid(grid, table, &self.text),
                #[cfg(feature = "xlsx")]
                workbook: XlsxExporter::export_grid(grid, table, &self.xlsx)?,
            })
        })
    }

    /// HTML, the no-table message, or the error message.
    pub fn to_html_display(&self, table: &Table) -> String {
        display(self.to_html(table))
    }

    /// Clipboard HTML, the no-table message, or the error message.
    pub fn to_clipboard_display(&self, table: &Table) -> String {
        display(self.to_clipboard_html(table))
    }

    /// Text, the no-table message, or the error message.
    pub fn to_text_display(&self, table: &Table) -> String {
        display(self.to_text(table))
    }

    fn run<T>(
        &self,
        table: &Table,
        render: impl FnOnce(&Grid<'_>) -> Result<T, RenderError>,
    ) -> Result<Rendered<T>, RenderError> {
        if table.is_empty() {
            return Ok(Rendered::NoTable);
        }
        guarded(|| {
            let grid = build_grid(table);
            render(&grid)
        })
        .map(Rendered::Table)
    }
}

/// Run `f`, turning a panic into [`RenderError::Panicked`].
pub fn guarded<T>(f: impl FnOnce() -> Result<T, RenderError>) -> Result<T, RenderError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            #[cfg(feature = "tracing")]
            tracing::error!(%message, "renderer panicked");
            Err(RenderError::Panicked(message))
        }
    }
}

fn display(result: Result<Rendered<String>, RenderError>) -> String {
    match result {
        Ok(rendered) => rendered.into_display(),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrtable_core::CellSpan;

    fn example_table() -> Table {
        Table::new(vec![
            CellSpan::unit("A", 0, 0),
            CellSpan::unit("B", 0, 1),
            CellSpan::new("C", 1, 2, 0, 2),
        ])
    }

    #[test]
    fn html_for_example() {
        let html = TableConverter::new()
            .to_html(&example_table())
            .unwrap()
            .into_option()
            .unwrap();
        assert!(html.contains("<tr><td>A</td><td>B</td></tr>"));
        assert!(html.contains("<tr><td colspan='2'>C</td></tr>"));
    }

    #[test]
    fn text_for_example() {
        let text = TableConverter::new().to_text(&example_table()).unwrap();
        assert_eq!(text, Rendered::Table("A\tB\nC\t".to_string()));
    }

    #[test]
    fn empty_table_is_no_table() {
        let converter = TableConverter::new();
        assert!(converter.to_html(&Table::default()).unwrap().is_no_table());
        assert!(converter.to_text(&Table::default()).unwrap().is_no_table());
        assert_eq!(converter.to_html_display(&Table::default()), NO_TABLE_MESSAGE);
        assert_eq!(converter.to_text_display(&Table::default()), "no table found");
    }

    #[test]
    fn blocks_only_table_is_rendered() {
        let table = Table::default().with_footer(vec!["only a note".to_string()]);
        let html = TableConverter::new().to_html_display(&table);
        assert!(html.contains("only a note"));
    }

    #[test]
    fn oversized_table_renders_without_spans() {
        let table = Table::new(vec![
            CellSpan::unit("corner", 4095, 0),
            CellSpan::unit("edge", 0, 4095),
            CellSpan::new("far", 0, usize::MAX, 0, 1),
        ]);
        let converter = TableConverter::new();
        assert_eq!(converter.to_text(&table).unwrap(), Rendered::Table(String::new()));
        assert!(!converter.to_html_display(&table).contains("corner"));
    }

    #[test]
    fn clipboard_wraps_fragment() {
        let out = TableConverter::new().to_clipboard_display(&example_table());
        assert!(out.starts_with("Version:0.9"));
        assert!(out.contains("<!--StartFragment--><table"));
    }

    #[test]
    fn panics_become_errors() {
        let result: Result<(), RenderError> = guarded(|| panic!("grid exploded"));
        assert_eq!(
            result.unwrap_err(),
            RenderError::Panicked("grid exploded".to_string())
        );
    }

    #[test]
    fn formatted_panic_message_is_kept() {
        let code = 7;
        let result: Result<(), RenderError> = guarded(|| panic!("bad cell {code}"));
        assert_eq!(
            result.unwrap_err().to_string(),
            "renderer failed unexpectedly: bad cell 7"
        );
    }

    #[test]
    fn errors_pass_through_guard() {
        let result: Result<(), RenderError> =
            guarded(|| Err(RenderError::Spreadsheet("bad".to_string())));
        assert_eq!(result.unwrap_err(), RenderError::Spreadsheet("bad".to_string()));
    }

    #[test]
    fn display_of_error() {
        assert_eq!(
            display(Err(RenderError::Panicked("x".to_string()))),
            "renderer failed unexpectedly: x"
        );
    }

    #[test]
    fn text_options_are_applied() {
        let converter = TableConverter::new().with_text_options(TextOptions {
            trim_trailing_tabs: true,
            ..TextOptions::default()
        });
        assert_eq!(converter.to_text_display(&example_table()), "A\tB\nC");
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn xlsx_bytes_and_no_table() {
        let converter = TableConverter::new();
        let bytes = converter.to_xlsx_bytes(&example_table()).unwrap().into_option().unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(converter.to_workbook(&Table::default()).unwrap().is_no_table());
    }

    #[test]
    fn render_all_shares_one_grid() {
        let outputs = TableConverter::new()
            .render_all(&example_table())
            .unwrap()
            .into_option()
            .unwrap();
        assert!(outputs.html.contains("colspan='2'"));
        assert_eq!(outputs.text, "A\tB\nC\t");
    }
}
