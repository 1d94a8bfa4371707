//! Canonical table data model.
//!
//! A [`Table`] is the vendor-independent form every normalizer produces:
//! a flat list of [`CellSpan`]s with exclusive row/column bounds, plus
//! free-standing header and footer text blocks that sit outside the grid.

use std::fmt;

/// Largest coordinate a span may use on either axis.
pub const MAX_GRID_AXIS: usize = 4096;

/// Largest `row_count × col_count` a grid may allocate.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// A single OCR-detected table cell with its rectangular extent.
///
/// Bounds are exclusive: `row_end` is the first row *not* covered by the
/// span. A well-formed span covers at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSpan {
    /// Recognized text; may contain `\n` for multi-line cells.
    pub text: String,
    /// First covered row (0-indexed).
    pub row_start: usize,
    /// First row past the span.
    pub row_end: usize,
    /// First covered column (0-indexed).
    pub col_start: usize,
    /// First column past the span.
    pub col_end: usize,
}

/// Why a [`CellSpan`] failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanDefect {
    /// `row_end <= row_start`.
    EmptyRows,
    /// `col_end <= col_start`.
    EmptyColumns,
    /// A coordinate lies past [`MAX_GRID_AXIS`].
    OutOfBounds,
}

impl fmt::Display for SpanDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanDefect::EmptyRows => write!(f, "row_end must be greater than row_start"),
            SpanDefect::EmptyColumns => write!(f, "col_end must be greater than col_start"),
            SpanDefect::OutOfBounds => {
                write!(f, "coordinates must not exceed {MAX_GRID_AXIS}")
            }
        }
    }
}

impl CellSpan {
    pub fn new(
        text: impl Into<String>,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Self {
        Self {
            text: text.into(),
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// A 1×1 span at `(row, col)`.
    pub fn unit(text: impl Into<String>, row: usize, col: usize) -> Self {
        Self::new(text, row, row + 1, col, col + 1)
    }

    /// Number of rows covered (0 for a malformed span).
    pub fn row_span(&self) -> usize {
        self.row_end.saturating_sub(self.row_start)
    }

    /// Number of columns covered (0 for a malformed span).
    pub fn col_span(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }

    /// Whether the span covers more than one grid slot.
    pub fn is_merged(&self) -> bool {
        self.row_span() > 1 || self.col_span() > 1
    }

    /// Check the axis limit and the `end > start` invariant on both axes.
    pub fn validate(&self) -> Result<(), SpanDefect> {
        let coords = [self.row_start, self.row_end, self.col_start, self.col_end];
        if coords.iter().any(|&c| c > MAX_GRID_AXIS) {
            return Err(SpanDefect::OutOfBounds);
        }
        if self.row_end <= self.row_start {
            return Err(SpanDefect::EmptyRows);
        }
        if self.col_end <= self.col_start {
            return Err(SpanDefect::EmptyColumns);
        }
        Ok(())
    }

    /// Whether `(row, col)` lies inside the span.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..self.row_end).contains(&row)
            && (self.col_start..self.col_end).contains(&col)
    }
}

/// A reconstructed OCR table: grid cells plus header and footer blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Grid cells in vendor order.
    pub cells: Vec<CellSpan>,
    /// Free-standing title lines above the grid.
    #[cfg_attr(feature = "serde", serde(default))]
    pub header: Vec<String>,
    /// Free-standing lines below the grid (totals, notes).
    #[cfg_attr(feature = "serde", serde(default))]
    pub footer: Vec<String>,
}

impl Table {
    pub fn new(cells: Vec<CellSpan>) -> Self {
        Self {
            cells,
            header: Vec::new(),
            footer: Vec::new(),
        }
    }

    /// Builder-style setter for header blocks.
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = header;
        self
    }

    /// Builder-style setter for footer blocks.
    pub fn with_footer(mut self, footer: Vec<String>) -> Self {
        self.footer = footer;
        self
    }

    /// Number of grid rows: the largest `row_end`, or 0 without cells.
    pub fn row_count(&self) -> usize {
        self.cells.iter().map(|c| c.row_end).max().unwrap_or(0)
    }

    /// Number of grid columns: the largest `col_end`, or 0 without cells.
    pub fn col_count(&self) -> usize {
        self.cells.iter().map(|c| c.col_end).max().unwrap_or(0)
    }

    /// `row_count × col_count`, or `None` when it passes [`MAX_GRID_CELLS`].
    pub fn grid_area(&self) -> Option<usize> {
        self.row_count()
            .checked_mul(self.col_count())
            .filter(|&area| area <= MAX_GRID_CELLS)
    }

    /// Whether there is any grid at all.
    pub fn has_grid(&self) -> bool {
        !self.cells.is_empty()
    }

    /// The "no table found" case: no cells and no header/footer blocks.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.header.is_empty() && self.footer.is_empty()
    }

    /// Columns available to header/footer layout.
    ///
    /// At least one, so a table made only of blocks still renders.
    pub fn layout_columns(&self) -> usize {
        self.col_count().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- CellSpan tests ---

    #[test]
    fn test_unit_span() {
        let span = CellSpan::unit("A", 2, 3);
        assert_eq!(span.row_start, 2);
        assert_eq!(span.row_end, 3);
        assert_eq!(span.col_start, 3);
        assert_eq!(span.col_end, 4);
        assert_eq!(span.row_span(), 1);
        assert_eq!(span.col_span(), 1);
        assert!(!span.is_merged());
    }

    #[test]
    fn test_merged_span() {
        let span = CellSpan::new("Total", 0, 2, 1, 4);
        assert_eq!(span.row_span(), 2);
        assert_eq!(span.col_span(), 3);
        assert!(span.is_merged());
        assert!(span.contains(1, 3));
        assert!(!span.contains(2, 3));
        assert!(!span.contains(0, 0));
    }

    #[test]
    fn test_validate_rejects_empty_extent() {
        assert_eq!(CellSpan::new("x", 1, 1, 0, 1).validate(), Err(SpanDefect::EmptyRows));
        assert_eq!(
            CellSpan::new("x", 0, 1, 3, 2).validate(),
            Err(SpanDefect::EmptyColumns)
        );
        assert!(CellSpan::unit("x", 0, 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_coordinates_past_axis_limit() {
        let far = CellSpan::new("x", 0, 4_000_000_000_000, 1, 2);
        assert_eq!(far.validate(), Err(SpanDefect::OutOfBounds));
        let inverted_far = CellSpan::new("x", usize::MAX, 3, 0, 1);
        assert_eq!(inverted_far.validate(), Err(SpanDefect::OutOfBounds));
        assert!(CellSpan::new("x", 0, MAX_GRID_AXIS, 0, MAX_GRID_AXIS).validate().is_ok());
    }

    #[test]
    fn test_inverted_span_reports_zero_extent() {
        let span = CellSpan::new("x", 4, 2, 0, 1);
        assert_eq!(span.row_span(), 0);
    }

    // --- Table tests ---

    #[test]
    fn test_dimensions_from_exclusive_ends() {
        let table = Table::new(vec![
            CellSpan::unit("A", 0, 0),
            CellSpan::unit("B", 0, 1),
            CellSpan::new("C", 1, 2, 0, 2),
        ]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.col_count(), 2);
        assert!(table.has_grid());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_empty_table_has_zero_dimensions() {
        let table = Table::default();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.col_count(), 0);
        assert!(table.is_empty());
        assert_eq!(table.layout_columns(), 1);
    }

    #[test]
    fn test_blocks_only_table_is_not_empty() {
        let table = Table::default().with_footer(vec!["note".to_string()]);
        assert!(!table.has_grid());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_grid_area_is_checked() {
        let table = Table::new(vec![CellSpan::new("x", 0, 3, 0, 4)]);
        assert_eq!(table.grid_area(), Some(12));
        assert_eq!(Table::default().grid_area(), Some(0));

        let wide = Table::new(vec![
            CellSpan::unit("a", MAX_GRID_AXIS - 1, 0),
            CellSpan::unit("b", 0, MAX_GRID_AXIS - 1),
        ]);
        assert_eq!(wide.grid_area(), None);

        let overflow = Table::new(vec![CellSpan::new("x", 0, usize::MAX, 0, 2)]);
        assert_eq!(overflow.grid_area(), None);
    }

    #[test]
    fn test_sparse_cells_extend_dimensions() {
        let table = Table::new(vec![CellSpan::unit("far", 4, 6)]);
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.col_count(), 7);
    }
}
