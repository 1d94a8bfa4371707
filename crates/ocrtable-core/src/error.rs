//! Error and warning types for ocrtable.
//!
//! Provides [`RenderError`] for failures that stop a rendering pass,
//! [`Warning`] for non-fatal issues that allow best-effort continuation
//! (dropped spans, misplaced blocks), and [`Outcome`] for pairing a value
//! with the warnings collected while producing it.

use std::fmt;

/// Fatal error types for grid reconstruction and rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The spreadsheet backend rejected an operation.
    Spreadsheet(String),
    /// I/O error while serializing output.
    IoError(String),
    /// A renderer panicked; the payload message is preserved.
    Panicked(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Spreadsheet(msg) => write!(f, "spreadsheet error: {msg}"),
            RenderError::IoError(msg) => write!(f, "I/O error: {msg}"),
            RenderError::Panicked(msg) => write!(f, "renderer failed unexpectedly: {msg}"),
            RenderError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err.to_string())
    }
}

/// Machine-readable warning code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum WarningCode {
    /// Two spans share the same origin; the later one was dropped.
    DuplicateOrigin,
    /// A span overlaps cells already claimed by an earlier span and was dropped.
    OverlappingSpan,
    /// A span has an empty or inverted extent.
    InvalidSpan,
    /// A header/footer block could not be attached to any table.
    UnplacedBlock,
    /// The grid would pass the cell-count limit, so no span was placed.
    GridTooLarge,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::DuplicateOrigin => "DUPLICATE_ORIGIN",
            WarningCode::OverlappingSpan => "OVERLAPPING_SPAN",
            WarningCode::InvalidSpan => "INVALID_SPAN",
            WarningCode::UnplacedBlock => "UNPLACED_BLOCK",
            WarningCode::GridTooLarge => "GRID_TOO_LARGE",
            WarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue found while normalizing or reconstructing a table.
///
/// Carries a structured [`code`](Warning::code), a human-readable
/// description, and optional grid context: the coordinate the issue was
/// found at and the index of the offending span in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Grid row (0-indexed), if applicable.
    pub row: Option<usize>,
    /// Grid column (0-indexed), if applicable.
    pub col: Option<usize>,
    /// Index of the span in the table's cell list, if applicable.
    pub cell_index: Option<usize>,
}

impl Warning {
    /// Create a warning with just a description.
    ///
    /// Uses [`WarningCode::Other`] as the code.
    pub fn new(description: impl Into<String>) -> Self {
        let desc = description.into();
        Self {
            code: WarningCode::Other(desc.clone()),
            description: desc,
            row: None,
            col: None,
            cell_index: None,
        }
    }

    /// Create a warning with a specific code and description.
    pub fn with_code(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            row: None,
            col: None,
            cell_index: None,
        }
    }

    /// Attach the grid coordinate the warning refers to.
    pub fn at(mut self, row: usize, col: usize) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    /// Attach the index of the offending span.
    pub fn for_cell(mut self, cell_index: usize) -> Self {
        self.cell_index = Some(cell_index);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let (Some(row), Some(col)) = (self.row, self.col) {
            write!(f, " (row {row}, col {col})")?;
        }
        if let Some(index) = self.cell_index {
            write!(f, " [cell #{index}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    /// The produced value.
    pub value: T,
    /// Warnings collected while producing it.
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    /// Create an outcome with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create an outcome with warnings.
    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- RenderError tests ---

    #[test]
    fn test_render_error_display() {
        assert_eq!(
            RenderError::Spreadsheet("bad range".to_string()).to_string(),
            "spreadsheet error: bad range"
        );
        assert_eq!(
            RenderError::Panicked("index out of bounds".to_string()).to_string(),
            "renderer failed unexpectedly: index out of bounds"
        );
        assert_eq!(RenderError::Other("boom".to_string()).to_string(), "boom");
    }

    #[test]
    fn test_render_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full");
        let err: RenderError = io_err.into();
        assert!(matches!(err, RenderError::IoError(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_render_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(RenderError::Other("x".to_string()));
        assert_eq!(err.to_string(), "x");
    }

    // --- Warning tests ---

    #[test]
    fn test_warning_code_tags() {
        assert_eq!(WarningCode::DuplicateOrigin.as_str(), "DUPLICATE_ORIGIN");
        assert_eq!(WarningCode::OverlappingSpan.as_str(), "OVERLAPPING_SPAN");
        assert_eq!(WarningCode::InvalidSpan.as_str(), "INVALID_SPAN");
        assert_eq!(WarningCode::UnplacedBlock.as_str(), "UNPLACED_BLOCK");
        assert_eq!(WarningCode::GridTooLarge.as_str(), "GRID_TOO_LARGE");
        assert_eq!(WarningCode::Other("x".to_string()).as_str(), "OTHER");
    }

    #[test]
    fn test_warning_new_uses_other_code() {
        let w = Warning::new("something odd");
        assert_eq!(w.code, WarningCode::Other("something odd".to_string()));
        assert!(w.row.is_none());
        assert!(w.cell_index.is_none());
    }

    #[test]
    fn test_warning_display_with_context() {
        let w = Warning::with_code(WarningCode::DuplicateOrigin, "dropped duplicate")
            .at(1, 2)
            .for_cell(5);
        assert_eq!(
            w.to_string(),
            "[DUPLICATE_ORIGIN] dropped duplicate (row 1, col 2) [cell #5]"
        );
    }

    #[test]
    fn test_warning_display_without_context() {
        let w = Warning::with_code(WarningCode::UnplacedBlock, "lonely footer");
        assert_eq!(w.to_string(), "[UNPLACED_BLOCK] lonely footer");
    }

    // --- Outcome tests ---

    #[test]
    fn test_outcome_ok_is_clean() {
        let outcome = Outcome::ok(3);
        assert!(outcome.is_clean());
        assert_eq!(outcome.value, 3);
    }

    #[test]
    fn test_outcome_map_keeps_warnings() {
        let outcome = Outcome::with_warnings(2, vec![Warning::new("w")]);
        let mapped = outcome.map(|v| v * 10);
        assert_eq!(mapped.value, 20);
        assert_eq!(mapped.warnings.len(), 1);
        assert!(!mapped.is_clean());
    }
}
