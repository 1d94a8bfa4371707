//! HTML rendering for reconstructed tables.
//!
//! Produces a `<table>` with native `rowspan`/`colspan` that spreadsheet
//! applications accept on paste. Multi-line cell text is written with the
//! `&#10;` entity so the line breaks stay inside one spreadsheet cell.

use crate::grid::{Grid, build_grid};
use crate::layout::{HeaderLayout, footer_segments};
use crate::table::Table;

/// Options for HTML rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Value of the table's `border` attribute.
    pub border: u32,
    /// Background color of header cells (CSS color).
    pub header_background: String,
    /// Background color of footer cells (CSS color).
    pub footer_background: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            border: 1,
            header_background: "#f2f2f2".to_string(),
            footer_background: "#fafafa".to_string(),
        }
    }
}

/// Renders tables as HTML.
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Render a table, reconstructing its grid first.
    pub fn render(table: &Table, options: &HtmlOptions) -> String {
        let grid = build_grid(table);
        Self::render_grid(&grid, table, options)
    }

    /// Render from a grid already built for `table`.
    ///
    /// Header and footer layout use at least one column, so a table made
    /// only of blocks still produces a well-formed `<table>`.
    pub fn render_grid(grid: &Grid<'_>, table: &Table, options: &HtmlOptions) -> String {
        let layout_cols = grid.col_count().max(1);
        let mut html = format!(
            "<table border='{}' style='border-collapse: collapse;'>\n",
            options.border
        );

        let header_style = format!(
            "text-align: center; font-weight: bold; background-color: {};",
            options.header_background
        );
        match HeaderLayout::from_blocks(&table.header) {
            HeaderLayout::None => {}
            HeaderLayout::Banner(text) => {
                html.push_str("<thead>\n<tr>");
                html.push_str(&format!(
                    "<th colspan='{layout_cols}' style='{header_style}'>{}</th>",
                    cell_text(text)
                ));
                html.push_str("</tr>\n</thead>\n");
            }
            HeaderLayout::Blocks(blocks) => {
                html.push_str("<thead>\n<tr>");
                for block in blocks {
                    html.push_str(&format!(
                        "<th style='{header_style}'>{}</th>",
                        cell_text(block)
                    ));
                }
                html.push_str("</tr>\n</thead>\n");
            }
        }

        html.push_str("<tbody>\n");
        for row in grid.rows() {
            html.push_str("<tr>");
            for cell in row {
                html.push_str("<td");
                if cell.row_span > 1 {
                    html.push_str(&format!(" rowspan='{}'", cell.row_span));
                }
                if cell.col_span > 1 {
                    html.push_str(&format!(" colspan='{}'", cell.col_span));
                }
                html.push('>');
                html.push_str(&cell_text(cell.text()));
                html.push_str("</td>");
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n");

        let segments = footer_segments(layout_cols, &table.footer);
        if !segments.is_empty() {
            let footer_style = format!(
                "font-style: italic; background-color: {};",
                options.footer_background
            );
            html.push_str("<tfoot>\n<tr>");
            for segment in &segments {
                html.push_str(&format!(
                    "<td colspan='{}' style='{footer_style}'>{}</td>",
                    segment.span,
                    cell_text(&segment.text)
                ));
            }
            html.push_str("</tr>\n</tfoot>\n");
        }

        html.push_str("</table>");
        html
    }
}

/// Escape cell text and encode line breaks as `&#10;`.
fn cell_text(text: &str) -> String {
    let escaped = html_escape::encode_text(text);
    escaped
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "&#10;")
}

const FRAGMENT_PREFIX: &str = "<html>\r\n<body>\r\n<!--StartFragment-->";
const FRAGMENT_SUFFIX: &str = "<!--EndFragment-->\r\n</body>\r\n</html>";

fn clipboard_header(
    start_html: usize,
    end_html: usize,
    start_fragment: usize,
    end_fragment: usize,
) -> String {
    format!(
        "Version:0.9\r\nStartHTML:{start_html:010}\r\nEndHTML:{end_html:010}\r\n\
         StartFragment:{start_fragment:010}\r\nEndFragment:{end_fragment:010}\r\n"
    )
}

/// Wrap an HTML fragment in the clipboard HTML envelope.
///
/// The envelope starts with a `Version`/`StartHTML`/`EndHTML`/
/// `StartFragment`/`EndFragment` header whose values are byte offsets into
/// the returned string, as spreadsheet applications expect when reading
/// HTML from the system clipboard. Offsets are zero-padded to ten digits so
/// the header length does not depend on the values.
pub fn clipboard_fragment(fragment: &str) -> String {
    let header_len = clipboard_header(0, 0, 0, 0).len();
    let start_html = header_len;
    let start_fragment = start_html + FRAGMENT_PREFIX.len();
    let end_fragment = start_fragment + fragment.len();
    let end_html = end_fragment + FRAGMENT_SUFFIX.len();

    let mut out = clipboard_header(start_html, end_html, start_fragment, end_fragment);
    out.push_str(FRAGMENT_PREFIX);
    out.push_str(fragment);
    out.push_str(FRAGMENT_SUFFIX);
    out
}
