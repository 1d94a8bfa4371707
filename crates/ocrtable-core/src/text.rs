//! Tab-separated plain-text rendering.

use crate::grid::{Grid, build_grid};
use crate::table::Table;

/// Options for plain-text rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Drop tab separators at the end of each line (default: false).
    ///
    /// By default a row whose trailing columns are covered or empty keeps
    /// its separators (`"C\t"`), so columns stay aligned on paste.
    pub trim_trailing_tabs: bool,
    /// Emit header blocks before the matrix and footer blocks after it
    /// (default: false).
    pub include_header_footer: bool,
}

/// Renders tables as tab-separated text.
pub struct TextRenderer;

impl TextRenderer {
    /// Render a table, reconstructing its grid first.
    pub fn render(table: &Table, options: &TextOptions) -> String {
        let grid = build_grid(table);
        Self::render_grid(&grid, table, options)
    }

    /// Render from a grid already built for `table`.
    ///
    /// Only the origin of each merged cell carries text. Rows whose cells
    /// are all blank are left out entirely, and lines are joined with `\n`
    /// without a trailing newline.
    pub fn render_grid(grid: &Grid<'_>, table: &Table, options: &TextOptions) -> String {
        let mut lines: Vec<String> = Vec::new();

        if options.include_header_footer {
            lines.extend(
                table
                    .header
                    .iter()
                    .map(|block| flatten(block))
                    .filter(|line| !line.trim().is_empty()),
            );
        }

        for row in grid.origin_matrix() {
            if row.iter().all(|text| text.trim().is_empty()) {
                continue;
            }
            let fields: Vec<String> = row.iter().map(|text| flatten(text)).collect();
            let mut line = fields.join("\t");
            if options.trim_trailing_tabs {
                let trimmed_len = line.trim_end_matches('\t').len();
                line.truncate(trimmed_len);
            }
            lines.push(line);
        }

        if options.include_header_footer {
            let footer: Vec<String> = table.footer.iter().map(|block| flatten(block)).collect();
            if footer.iter().any(|block| !block.trim().is_empty()) {
                lines.push(footer.join("\t"));
            }
        }

        lines.join("\n")
    }
}

/// Collapse line breaks and tabs so one cell never spans fields or lines.
fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n', '\t'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellSpan;

    fn merged_row_table() -> Table {
        Table::new(vec![
            CellSpan::unit("A", 0, 0),
            CellSpan::unit("B", 0, 1),
            CellSpan::new("C", 1, 2, 0, 2),
        ])
    }

    #[test]
    fn test_merged_row_text() {
        let text = TextRenderer::render(&merged_row_table(), &TextOptions::default());
        assert_eq!(text, "A\tB\nC\t");
    }

    #[test]
    fn test_trim_trailing_tabs() {
        let options = TextOptions {
            trim_trailing_tabs: true,
            ..TextOptions::default()
        };
        let text = TextRenderer::render(&merged_row_table(), &options);
        assert_eq!(text, "A\tB\nC");
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let table = Table::new(vec![
            CellSpan::unit("top", 0, 0),
            CellSpan::unit("   ", 1, 1),
            CellSpan::unit("bottom", 3, 1),
        ]);
        let text = TextRenderer::render(&table, &TextOptions::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["top\t", "\tbottom"]);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_merged_interior_is_blank() {
        let table = Table::new(vec![
            CellSpan::new("tall", 0, 2, 0, 1),
            CellSpan::unit("x", 0, 1),
            CellSpan::unit("y", 1, 1),
        ]);
        let text = TextRenderer::render(&table, &TextOptions::default());
        assert_eq!(text, "tall\tx\n\ty");
    }

    #[test]
    fn test_multiline_cell_stays_on_one_line() {
        let table = Table::new(vec![
            CellSpan::unit("a\nb", 0, 0),
            CellSpan::unit("c\td", 0, 1),
        ]);
        let text = TextRenderer::render(&table, &TextOptions::default());
        assert_eq!(text, "a b\tc d");
    }

    #[test]
    fn test_header_footer_included_on_request() {
        let table = merged_row_table()
            .with_header(vec!["Title".to_string()])
            .with_footer(vec!["n1".to_string(), "n2".to_string()]);
        let options = TextOptions {
            include_header_footer: true,
            ..TextOptions::default()
        };
        let text = TextRenderer::render(&table, &options);
        assert_eq!(text, "Title\nA\tB\nC\t\nn1\tn2");

        let default_text = TextRenderer::render(&table, &TextOptions::default());
        assert_eq!(default_text, "A\tB\nC\t");
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert_eq!(TextRenderer::render(&Table::default(), &TextOptions::default()), "");
    }
}
