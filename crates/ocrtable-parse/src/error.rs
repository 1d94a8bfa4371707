//! Error types for the normalization layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Every variant renders
//! as a message that can be shown to a user as-is; field errors name the
//! JSON path that failed, e.g. `tables_result[0].body[2].row_end`.

use ocrtable_core::{MAX_GRID_AXIS, MAX_GRID_CELLS, RenderError, Table, Warning};
use thiserror::Error;

use crate::vendor::Vendor;

/// Error type for turning a vendor response into tables.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The body is not JSON, or a field has the wrong JSON type.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The vendor reported a failure instead of a result.
    #[error("{vendor} returned error {code}: {message}")]
    Vendor {
        vendor: Vendor,
        code: String,
        message: String,
    },

    /// A required field is absent.
    #[error("missing field `{path}`")]
    MissingField { path: String },

    /// A field is present but its value cannot be used.
    #[error("invalid field `{path}`: {reason}")]
    InvalidField { path: String, reason: String },

    /// The body matches none of the known vendor shapes.
    #[error("unrecognized OCR response: {0}")]
    UnknownFormat(String),

    /// A warning escalated by strict mode.
    #[error("strict mode: {0}")]
    Strict(Warning),
}

impl NormalizationError {
    pub(crate) fn missing(path: impl Into<String>) -> Self {
        NormalizationError::MissingField { path: path.into() }
    }

    pub(crate) fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        NormalizationError::InvalidField {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<NormalizationError> for RenderError {
    fn from(err: NormalizationError) -> Self {
        RenderError::Other(err.to_string())
    }
}

/// Unwrap a required field or report its path.
pub(crate) fn required<T>(
    value: Option<T>,
    path: impl FnOnce() -> String,
) -> Result<T, NormalizationError> {
    value.ok_or_else(|| NormalizationError::missing(path()))
}

/// Unwrap a required grid coordinate, rejecting negatives and values past
/// [`MAX_GRID_AXIS`].
pub(crate) fn coordinate(
    value: Option<i64>,
    path: impl FnOnce() -> String,
) -> Result<usize, NormalizationError> {
    match value {
        None => Err(NormalizationError::missing(path())),
        Some(v) if v < 0 => Err(NormalizationError::invalid(
            path(),
            format!("negative coordinate {v}"),
        )),
        Some(v) => match usize::try_from(v) {
            Ok(c) if c <= MAX_GRID_AXIS => Ok(c),
            _ => Err(out_of_range(path(), v)),
        },
    }
}

/// Unwrap an inclusive end coordinate and convert it to an exclusive one.
pub(crate) fn inclusive_end(
    value: Option<i64>,
    path: impl FnOnce() -> String,
) -> Result<usize, NormalizationError> {
    let path = path();
    let last = coordinate(value, || path.clone())?;
    if last >= MAX_GRID_AXIS {
        return Err(out_of_range(path, last));
    }
    Ok(last + 1)
}

/// Reject a table whose grid would pass [`MAX_GRID_CELLS`].
pub(crate) fn check_extent(
    table: &Table,
    path: impl FnOnce() -> String,
) -> Result<(), NormalizationError> {
    match table.grid_area() {
        Some(_) => Ok(()),
        None => Err(NormalizationError::invalid(
            path(),
            format!(
                "{} x {} grid exceeds the limit of {MAX_GRID_CELLS} cells",
                table.row_count(),
                table.col_count()
            ),
        )),
    }
}

pub(crate) fn out_of_range(path: String, value: impl std::fmt::Display) -> NormalizationError {
    NormalizationError::invalid(
        path,
        format!("coordinate {value} exceeds the limit of {MAX_GRID_AXIS}"),
    )
}
