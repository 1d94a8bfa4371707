//! Spreadsheet export.
//!
//! Export happens in two steps. [`SheetPlan::build`] decides every value,
//! merge, style and column width as plain data; [`XlsxExporter`] then
//! replays the plan onto a umya-spreadsheet workbook. Keeping the layout
//! decisions out of the spreadsheet API makes them cheap to inspect.

use std::io::Cursor;

use ocrtable_core::{
    CellAlignment, Grid, HeaderLayout, RenderError, Table, build_grid, classify_alignment,
    footer_segments, parse_plain_number,
};
use umya_spreadsheet::{Border, HorizontalAlignmentValues, Spreadsheet, VerticalAlignmentValues};
use unicode_width::UnicodeWidthStr;

/// Options for spreadsheet export.
#[derive(Debug, Clone, PartialEq)]
pub struct XlsxOptions {
    /// Name of the single worksheet (default: `"Table"`).
    pub sheet_name: String,
    /// Narrowest auto-fitted column, in character units (default: 8).
    pub min_column_width: f64,
    /// Widest auto-fitted column, in character units (default: 60).
    pub max_column_width: f64,
    /// Store plain decimals as numbers instead of text (default: false).
    pub store_numbers: bool,
    /// ARGB fill of header cells.
    pub header_fill: String,
    /// ARGB fill of footer cells.
    pub footer_fill: String,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Table".to_string(),
            min_column_width: 8.0,
            max_column_width: 60.0,
            store_numbers: false,
            header_fill: "FFF2F2F2".to_string(),
            footer_fill: "FFFAFAFA".to_string(),
        }
    }
}

/// Value written to a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// Horizontal alignment of a planned cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    #[default]
    Left,
    Center,
    Right,
}

/// Formatting of a planned cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub italic: bool,
    pub horizontal: Horizontal,
    pub wrap: bool,
    /// ARGB background fill.
    pub fill: Option<String>,
}

/// One cell of the sheet: a value with its style, or a style alone for the
/// interior of a merged range.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCell {
    /// 1-based row.
    pub row: u32,
    /// 1-based column.
    pub col: u32,
    pub value: Option<CellValue>,
    pub style: CellStyle,
}

/// An inclusive, 1-based merged range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl MergeRange {
    /// A1-style reference, e.g. `"A1:C2"`.
    pub fn to_a1(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_letters(self.first_col),
            self.first_row,
            column_letters(self.last_col),
            self.last_row
        )
    }
}

/// Everything the exporter will write, in application order.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub sheet_name: String,
    pub cells: Vec<PlannedCell>,
    pub merges: Vec<MergeRange>,
    /// Width of columns `1..=column_widths.len()`.
    pub column_widths: Vec<f64>,
    /// Rows occupied by the header.
    pub header_rows: u32,
    /// Row of the footer, if any.
    pub footer_row: Option<u32>,
    /// Last used row and column; every cell up to it gets a thin border.
    pub extent: Option<(u32, u32)>,
}

impl SheetPlan {
    /// Lay out `table` on a sheet.
    pub fn build(grid: &Grid<'_>, table: &Table, options: &XlsxOptions) -> Self {
        let columns = to_u32(grid.col_count().max(1));
        let mut cells = Vec::new();
        let mut merges = Vec::new();

        let header_style = CellStyle {
            bold: true,
            horizontal: Horizontal::Center,
            fill: Some(options.header_fill.clone()),
            ..CellStyle::default()
        };
        let header_rows = match HeaderLayout::from_blocks(&table.header) {
            HeaderLayout::None => 0,
            HeaderLayout::Banner(text) => {
                cells.push(PlannedCell {
                    row: 1,
                    col: 1,
                    value: Some(CellValue::Text(text.to_string())),
                    style: header_style,
                });
                if columns > 1 {
                    merges.push(MergeRange {
                        first_row: 1,
                        first_col: 1,
                        last_row: 1,
                        last_col: columns,
                    });
                }
                1
            }
            HeaderLayout::Blocks(blocks) => {
                for (i, text) in blocks.iter().enumerate() {
                    cells.push(PlannedCell {
                        row: to_u32(i) + 1,
                        col: 1,
                        value: Some(CellValue::Text(text.clone())),
                        style: header_style.clone(),
                    });
                }
                to_u32(blocks.len())
            }
        };

        let body_start = header_rows + 1;
        for cell in grid.cells() {
            let row = body_start + to_u32(cell.row);
            let col = to_u32(cell.col) + 1;
            let text = cell.text();
            let number = if options.store_numbers {
                parse_plain_number(text)
            } else {
                None
            };
            let value = number.map_or_else(|| CellValue::Text(text.to_string()), CellValue::Number);
            let horizontal = match (&value, classify_alignment(text)) {
                (CellValue::Number(_), _) | (_, CellAlignment::Right) => Horizontal::Right,
                (_, CellAlignment::Left) => Horizontal::Left,
            };
            cells.push(PlannedCell {
                row,
                col,
                value: Some(value),
                style: CellStyle {
                    horizontal,
                    wrap: true,
                    ..CellStyle::default()
                },
            });
            if cell.is_merged() {
                merges.push(MergeRange {
                    first_row: row,
                    first_col: col,
                    last_row: row + to_u32(cell.row_span) - 1,
                    last_col: col + to_u32(cell.col_span) - 1,
                });
            }
        }

        let mut last_row = header_rows + to_u32(grid.row_count());
        let footer_row = if table.footer.is_empty() {
            None
        } else {
            last_row += 1;
            let row = last_row;
            let style = CellStyle {
                italic: true,
                fill: Some(options.footer_fill.clone()),
                ..CellStyle::default()
            };
            for segment in footer_segments(grid.col_count(), &table.footer) {
                let first_col = to_u32(segment.start_col) + 1;
                let last_col = to_u32(segment.last_col()) + 1;
                cells.push(PlannedCell {
                    row,
                    col: first_col,
                    value: Some(CellValue::Text(segment.text)),
                    style: style.clone(),
                });
                if last_col > first_col {
                    for col in first_col + 1..=last_col {
                        cells.push(PlannedCell {
                            row,
                            col,
                            value: None,
                            style: style.clone(),
                        });
                    }
                    merges.push(MergeRange {
                        first_row: row,
                        first_col,
                        last_row: row,
                        last_col,
                    });
                }
            }
            Some(row)
        };

        Self {
            sheet_name: options.sheet_name.clone(),
            cells,
            merges,
            column_widths: column_widths(grid, columns, options),
            header_rows,
            footer_row,
            extent: (last_row > 0).then_some((last_row, columns)),
        }
    }

    /// The planned cell holding a value at `(row, col)`, 1-based.
    pub fn value_at(&self, row: u32, col: u32) -> Option<&PlannedCell> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.col == col && c.value.is_some())
    }
}

/// Widest line of each column's single-column body cells, clamped.
///
/// Display width is used, so CJK characters count as two units.
fn column_widths(grid: &Grid<'_>, columns: u32, options: &XlsxOptions) -> Vec<f64> {
    let mut widest = vec![0usize; columns as usize];
    for cell in grid.cells().iter().filter(|c| c.col_span == 1) {
        let width = cell
            .text()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        widest[cell.col] = widest[cell.col].max(width);
    }
    widest
        .into_iter()
        // Two units of padding so text does not touch the border.
        .map(|w| ((w + 2) as f64).clamp(options.min_column_width, options.max_column_width))
        .collect()
}

/// An in-memory xlsx workbook.
pub struct Workbook {
    book: Spreadsheet,
}

impl Workbook {
    /// The underlying umya-spreadsheet document.
    pub fn spreadsheet(&self) -> &Spreadsheet {
        &self.book
    }

    /// Serialize to xlsx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut buffer)
            .map_err(|e| RenderError::Spreadsheet(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook").finish_non_exhaustive()
    }
}

/// Exports tables as xlsx workbooks.
pub struct XlsxExporter;

impl XlsxExporter {
    /// Export a table, reconstructing its grid first.
    pub fn export(table: &Table, options: &XlsxOptions) -> Result<Workbook, RenderError> {
        let grid = build_grid(table);
        Self::export_grid(&grid, table, options)
    }

    /// Export from a grid already built for `table`.
    pub fn export_grid(
        grid: &Grid<'_>,
        table: &Table,
        options: &XlsxOptions,
    ) -> Result<Workbook, RenderError> {
        let plan = SheetPlan::build(grid, table, options);
        Self::apply(&plan)
    }

    /// Write a plan into a new single-sheet workbook.
    pub fn apply(plan: &SheetPlan) -> Result<Workbook, RenderError> {
        let mut book = umya_spreadsheet::new_file_empty_worksheet();
        let sheet = book
            .new_sheet(plan.sheet_name.as_str())
            .map_err(|e| RenderError::Spreadsheet(e.to_string()))?;

        for cell in &plan.cells {
            let coordinate = (cell.col, cell.row);
            match &cell.value {
                Some(CellValue::Text(text)) => {
                    sheet.get_cell_mut(coordinate).set_value_string(text.as_str());
                }
                Some(CellValue::Number(number)) => {
                    sheet.get_cell_mut(coordinate).set_value_number(*number);
                }
                None => {}
            }

            let style = sheet.get_style_mut(coordinate);
            if cell.style.bold {
                style.get_font_mut().set_bold(true);
            }
            if cell.style.italic {
                style.get_font_mut().set_italic(true);
            }
            let alignment = style.get_alignment_mut();
            alignment.set_horizontal(match cell.style.horizontal {
                Horizontal::Left => HorizontalAlignmentValues::Left,
                Horizontal::Center => HorizontalAlignmentValues::Center,
                Horizontal::Right => HorizontalAlignmentValues::Right,
            });
            alignment.set_vertical(VerticalAlignmentValues::Center);
            if cell.style.wrap {
                alignment.set_wrap_text(true);
            }
            if let Some(fill) = &cell.style.fill {
                style.set_background_color(fill.as_str());
            }
        }

        for merge in &plan.merges {
            sheet.add_merge_cells(merge.to_a1());
        }

        for (i, width) in plan.column_widths.iter().enumerate() {
            let col = to_u32(i) + 1;
            sheet.get_column_dimension_by_number_mut(&col).set_width(*width);
        }

        // Borders go on last so they cover merged interiors too.
        if let Some((last_row, last_col)) = plan.extent {
            for row in 1..=last_row {
                for col in 1..=last_col {
                    let borders = sheet.get_style_mut((col, row)).get_borders_mut();
                    borders.get_left_mut().set_border_style(Border::BORDER_THIN);
                    borders.get_right_mut().set_border_style(Border::BORDER_THIN);
                    borders.get_top_mut().set_border_style(Border::BORDER_THIN);
                    borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sheet = %plan.sheet_name,
            cells = plan.cells.len(),
            merges = plan.merges.len(),
            "xlsx sheet written"
        );

        Ok(Workbook { book })
    }
}

/// Spreadsheet column name for a 1-based index: 1 → `A`, 27 → `AA`.
pub fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
