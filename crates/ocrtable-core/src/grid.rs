//! Grid reconstruction from cell spans.
//!
//! [`build_grid`] turns a [`Table`]'s sparse span list into a dense
//! occupancy grid in a single row-major pass. Every coordinate ends up
//! either as the origin of an emitted cell or covered by one, so the
//! emitted cells tile the `row_count × col_count` rectangle exactly.
//! All renderers read the same [`Grid`], which keeps their merge layout
//! identical.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{Warning, WarningCode};
use crate::table::{CellSpan, MAX_GRID_CELLS, SpanDefect, Table};

/// State of one grid coordinate after reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Top-left corner of a span-backed cell; index into [`Grid::cells`].
    Origin(usize),
    /// A synthesized empty 1×1 cell; index into [`Grid::cells`].
    Empty(usize),
    /// Interior of a merged cell whose origin is at `(row, col)`.
    Covered { row: usize, col: usize },
}

/// A cell emitted by the reconstructor, in row-major emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell<'a> {
    /// Origin row.
    pub row: usize,
    /// Origin column.
    pub col: usize,
    /// Rows covered, at least 1.
    pub row_span: usize,
    /// Columns covered, at least 1.
    pub col_span: usize,
    /// The span this cell renders, `None` for synthesized empty cells.
    pub span: Option<&'a CellSpan>,
    /// Index of `span` in [`Table::cells`].
    pub source_index: Option<usize>,
}

impl<'a> GridCell<'a> {
    fn empty(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            span: None,
            source_index: None,
        }
    }

    /// Cell text, empty for synthesized cells.
    pub fn text(&self) -> &'a str {
        self.span.map(|s| s.text.as_str()).unwrap_or("")
    }

    /// Whether the cell needs `rowspan`/`colspan` or a merged range.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }

    /// Last covered row (inclusive).
    pub fn last_row(&self) -> usize {
        self.row + self.row_span - 1
    }

    /// Last covered column (inclusive).
    pub fn last_col(&self) -> usize {
        self.col + self.col_span - 1
    }
}

/// Dense occupancy grid borrowed from one [`Table`].
#[derive(Debug, Clone)]
pub struct Grid<'a> {
    row_count: usize,
    col_count: usize,
    slots: Vec<Slot>,
    cells: Vec<GridCell<'a>>,
    /// `cells[row_starts[r]..row_starts[r + 1]]` originate in row `r`.
    row_starts: Vec<usize>,
    warnings: Vec<Warning>,
}

impl<'a> Grid<'a> {
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// True when the table had no cells.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.col_count == 0
    }

    /// Slot state at `(row, col)`, `None` when out of bounds.
    pub fn slot(&self, row: usize, col: usize) -> Option<Slot> {
        if row >= self.row_count || col >= self.col_count {
            return None;
        }
        self.slots.get(row * self.col_count + col).copied()
    }

    /// Whether `(row, col)` is the interior of an earlier merged cell.
    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        matches!(self.slot(row, col), Some(Slot::Covered { .. }))
    }

    /// All emitted cells in row-major order.
    pub fn cells(&self) -> &[GridCell<'a>] {
        &self.cells
    }

    /// Cells whose origin lies in `row`, left to right.
    pub fn row(&self, row: usize) -> &[GridCell<'a>] {
        match (self.row_starts.get(row), self.row_starts.get(row + 1)) {
            (Some(&start), Some(&end)) => &self.cells[start..end],
            _ => &[],
        }
    }

    /// Iterate rows of originating cells.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell<'a>]> + '_ {
        (0..self.row_count).map(move |r| self.row(r))
    }

    /// Warnings collected while reconstructing (dropped spans).
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Text matrix holding each cell's text at its origin only.
    ///
    /// Covered and empty positions are `""`.
    pub fn origin_matrix(&self) -> Vec<Vec<&'a str>> {
        let mut matrix = vec![vec![""; self.col_count]; self.row_count];
        for cell in &self.cells {
            matrix[cell.row][cell.col] = cell.text();
        }
        matrix
    }
}

/// Reconstruct the dense grid for `table`.
///
/// Coordinates are visited row-major. A coordinate already claimed is
/// skipped; otherwise the span whose origin is that coordinate is placed
/// and its whole rectangle claimed, or an empty 1×1 cell is synthesized.
///
/// Malformed input never breaks the tiling:
/// - spans with an empty extent are dropped ([`WarningCode::InvalidSpan`]);
///   so are spans with a coordinate past
///   [`MAX_GRID_AXIS`](crate::table::MAX_GRID_AXIS), which do not widen the grid;
/// - a grid larger than [`MAX_GRID_CELLS`] is not allocated: the result is
///   empty with a [`WarningCode::GridTooLarge`] warning;
/// - when several spans share an origin, the first in input order wins
///   and the rest are dropped ([`WarningCode::DuplicateOrigin`]);
/// - a span whose rectangle overlaps an earlier claim is dropped and its
///   origin rendered empty ([`WarningCode::OverlappingSpan`]).
pub fn build_grid(table: &Table) -> Grid<'_> {
    let mut row_count = 0;
    let mut col_count = 0;
    let mut warnings = Vec::new();

    let mut origins: HashMap<(usize, usize), usize> = HashMap::with_capacity(table.cells.len());
    for (index, span) in table.cells.iter().enumerate() {
        let checked = span.validate();
        if checked != Err(SpanDefect::OutOfBounds) {
            row_count = row_count.max(span.row_end);
            col_count = col_count.max(span.col_end);
        }
        if let Err(defect) = checked {
            warnings.push(
                Warning::with_code(WarningCode::InvalidSpan, format!("span dropped: {defect}"))
                    .at(span.row_start, span.col_start)
                    .for_cell(index),
            );
            continue;
        }
        match origins.entry((span.row_start, span.col_start)) {
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
            Entry::Occupied(first) => {
                warnings.push(
                    Warning::with_code(
                        WarningCode::DuplicateOrigin,
                        format!("span shares its origin with cell #{}", first.get()),
                    )
                    .at(span.row_start, span.col_start)
                    .for_cell(index),
                );
            }
        }
    }

    let Some(area) = row_count
        .checked_mul(col_count)
        .filter(|&area| area <= MAX_GRID_CELLS)
    else {
        warnings.push(Warning::with_code(
            WarningCode::GridTooLarge,
            format!(
                "{row_count} x {col_count} grid exceeds the limit of {MAX_GRID_CELLS} cells"
            ),
        ));
        #[cfg(feature = "tracing")]
        tracing::warn!(rows = row_count, cols = col_count, "grid too large, no span placed");
        return Grid {
            row_count: 0,
            col_count: 0,
            slots: Vec::new(),
            cells: Vec::new(),
            row_starts: vec![0],
            warnings,
        };
    };

    let mut claimed: Vec<Option<Slot>> = vec![None; area];
    let mut cells = Vec::with_capacity(origins.len());
    let mut row_starts = Vec::with_capacity(row_count + 1);

    for row in 0..row_count {
        row_starts.push(cells.len());
        for col in 0..col_count {
            if claimed[row * col_count + col].is_some() {
                continue;
            }

            let placed = origins.get(&(row, col)).and_then(|&index| {
                let span = &table.cells[index];
                if rect_is_free(&claimed, col_count, span) {
                    Some((index, span))
                } else {
                    warnings.push(
                        Warning::with_code(
                            WarningCode::OverlappingSpan,
                            "span overlaps an earlier cell and was dropped",
                        )
                        .at(row, col)
                        .for_cell(index),
                    );
                    None
                }
            });

            let position = cells.len();
            match placed {
                Some((index, span)) => {
                    for r in span.row_start..span.row_end {
                        for c in span.col_start..span.col_end {
                            claimed[r * col_count + c] = Some(Slot::Covered { row, col });
                        }
                    }
                    claimed[row * col_count + col] = Some(Slot::Origin(position));
                    cells.push(GridCell {
                        row,
                        col,
                        row_span: span.row_span(),
                        col_span: span.col_span(),
                        span: Some(span),
                        source_index: Some(index),
                    });
                }
                None => {
                    claimed[row * col_count + col] = Some(Slot::Empty(position));
                    cells.push(GridCell::empty(row, col));
                }
            }
        }
    }
    row_starts.push(cells.len());

    #[cfg(feature = "tracing")]
    {
        tracing::debug!(
            rows = row_count,
            cols = col_count,
            emitted = cells.len(),
            "grid reconstructed"
        );
        for warning in &warnings {
            tracing::warn!(%warning, "span skipped during grid reconstruction");
        }
    }

    // Every coordinate was visited, so every slot is claimed.
    let slots: Vec<Slot> = claimed.into_iter().flatten().collect();
    debug_assert_eq!(slots.len(), area);

    Grid {
        row_count,
        col_count,
        slots,
        cells,
        row_starts,
        warnings,
    }
}

fn rect_is_free(claimed: &[Option<Slot>], col_count: usize, span: &CellSpan) -> bool {
    (span.row_start..span.row_end).all(|r| {
        (span.col_start..span.col_end).all(|c| claimed[r * col_count + c].is_none())
    })
}
