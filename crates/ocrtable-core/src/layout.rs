//! Header and footer placement shared by the HTML and spreadsheet renderers.
//!
//! Header and footer blocks carry no grid coordinates, so their layout is
//! derived from the block count and the table width alone. Keeping the
//! arithmetic here guarantees both renderers split footers identically.

/// How header blocks are laid out above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout<'a> {
    /// No header blocks.
    None,
    /// A single block spanning every column.
    Banner(&'a str),
    /// Several blocks, each in its own unspanned cell.
    Blocks(&'a [String]),
}

impl<'a> HeaderLayout<'a> {
    pub fn from_blocks(blocks: &'a [String]) -> Self {
        match blocks {
            [] => HeaderLayout::None,
            [only] => HeaderLayout::Banner(only),
            many => HeaderLayout::Blocks(many),
        }
    }
}

/// One footer cell: a run of columns holding one or more blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterSegment {
    /// Text to render; overflow blocks are space-joined into the last segment.
    pub text: String,
    /// First column covered (0-indexed).
    pub start_col: usize,
    /// Columns covered, at least 1.
    pub span: usize,
}

impl FooterSegment {
    /// Last covered column (inclusive).
    pub fn last_col(&self) -> usize {
        self.start_col + self.span - 1
    }
}

/// Distribute `blocks` across `col_count` columns.
///
/// With `N` blocks, each segment gets `col_count / N` columns and the first
/// `col_count % N` segments get one more. The last segment takes whatever
/// columns remain, so spans always sum to `col_count`.
///
/// When there are more blocks than columns, one segment per column is
/// produced and the surplus blocks are appended to the last one.
///
/// A `col_count` of 0 is treated as 1.
pub fn footer_segments(col_count: usize, blocks: &[String]) -> Vec<FooterSegment> {
    if blocks.is_empty() {
        return Vec::new();
    }
    let col_count = col_count.max(1);
    let segment_count = blocks.len().min(col_count);
    let per_segment = col_count / segment_count;
    let extra = col_count % segment_count;

    let mut segments = Vec::with_capacity(segment_count);
    let mut start_col = 0;
    for i in 0..segment_count {
        let is_last = i + 1 == segment_count;
        let span = if is_last {
            col_count - start_col
        } else {
            per_segment + usize::from(i < extra)
        };
        let text = if is_last {
            blocks[i..].join(" ")
        } else {
            blocks[i].clone()
        };
        segments.push(FooterSegment {
            text,
            start_col,
            span,
        });
        start_col += span;
    }
    segments
}
