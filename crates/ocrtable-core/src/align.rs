//! Numeric-looking text detection for cell alignment.
//!
//! OCR output is always text, so "is this a number" has to be guessed from
//! the characters. Thousands separators are ignored and a trailing `%` is
//! accepted, which covers the amounts and ratios found in financial tables.

use std::sync::LazyLock;

use regex::Regex;

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)$").expect("valid regex"));

/// Horizontal alignment chosen for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlignment {
    Left,
    Right,
}

/// Whether `text` is a plain decimal number (sign and fraction allowed).
pub fn is_decimal(text: &str) -> bool {
    DECIMAL.is_match(text.trim())
}

/// Whether `text` is a decimal followed by `%`.
pub fn is_percentage(text: &str) -> bool {
    text.trim()
        .strip_suffix('%')
        .is_some_and(|rest| is_decimal(rest))
}

/// Alignment for a text cell: numbers and percentages right, the rest left.
///
/// Commas are stripped before testing, so `"1,234.50"` and `"12,5%"` both
/// count as numeric.
pub fn classify_alignment(text: &str) -> CellAlignment {
    let stripped = text.replace(',', "");
    if is_percentage(&stripped) || is_decimal(&stripped) {
        CellAlignment::Right
    } else {
        CellAlignment::Left
    }
}

/// Parse text that can be stored as a spreadsheet number without losing
/// its appearance.
///
/// Only plain decimals qualify: separators, percentages, and integers with
/// leading zeros (codes such as `"007"`) stay text.
pub fn parse_plain_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !is_decimal(trimmed) {
        return None;
    }
    let digits = trimmed.trim_start_matches(['+', '-']);
    if digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.") {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
