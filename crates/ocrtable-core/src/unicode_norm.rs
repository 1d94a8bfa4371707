//! Unicode normalization for recognized table text.
//!
//! Provides [`UnicodeNorm`] for selecting a normalization form and
//! [`normalize_table`] for applying it to every cell and block of a table.

use unicode_normalization::UnicodeNormalization;

use crate::table::Table;

/// Unicode normalization form to apply to recognized text.
///
/// OCR engines for CJK documents often emit full-width digits and
/// punctuation (`１２３，４５６`). NFKC folds them to their ASCII forms so
/// numeric detection and column widths behave as for Latin text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeNorm {
    /// No normalization (default).
    #[default]
    None,
    /// Canonical Decomposition, followed by Canonical Composition (NFC).
    Nfc,
    /// Canonical Decomposition (NFD).
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition (NFKC).
    Nfkc,
    /// Compatibility Decomposition (NFKD).
    Nfkd,
}

impl UnicodeNorm {
    /// Apply this normalization form to the given string.
    ///
    /// Returns the input unchanged if normalization is `None`.
    pub fn normalize(&self, text: &str) -> String {
        match self {
            UnicodeNorm::None => text.to_string(),
            UnicodeNorm::Nfc => text.nfc().collect(),
            UnicodeNorm::Nfd => text.nfd().collect(),
            UnicodeNorm::Nfkc => text.nfkc().collect(),
            UnicodeNorm::Nfkd => text.nfkd().collect(),
        }
    }
}

/// Normalize the text of every cell, header block, and footer block.
pub fn normalize_table(table: &mut Table, norm: UnicodeNorm) {
    if norm == UnicodeNorm::None {
        return;
    }
    for cell in &mut table.cells {
        cell.text = norm.normalize(&cell.text);
    }
    for block in table.header.iter_mut().chain(table.footer.iter_mut()) {
        *block = norm.normalize(block);
    }
}
