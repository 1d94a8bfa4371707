//! ocrtable-core: Backend-independent data types and algorithms.
//!
//! This crate provides the canonical table model ([`CellSpan`], [`Table`]),
//! grid reconstruction ([`build_grid`]), and the HTML and plain-text
//! renderers used by ocrtable. It knows nothing about OCR vendors; the
//! `ocrtable-parse` crate turns vendor responses into [`Table`] values.

pub mod align;
pub mod error;
pub mod grid;
pub mod html;
pub mod layout;
pub mod table;
pub mod text;
pub mod unicode_norm;

pub use align::{CellAlignment, classify_alignment, is_decimal, is_percentage, parse_plain_number};
pub use error::{Outcome, RenderError, Warning, WarningCode};
pub use grid::{Grid, GridCell, Slot, build_grid};
pub use html::{HtmlOptions, HtmlRenderer, clipboard_fragment};
pub use layout::{FooterSegment, HeaderLayout, footer_segments};
pub use table::{CellSpan, MAX_GRID_AXIS, MAX_GRID_CELLS, SpanDefect, Table};
pub use text::{TextOptions, TextRenderer};
pub use unicode_norm::{UnicodeNorm, normalize_table};
