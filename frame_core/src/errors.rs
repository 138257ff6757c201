//! # Error Types
//!
//! Structured error types for frame_core. These errors are designed to be
//! informative for both humans and LLMs: a failed tool invocation should
//! come back as a descriptive message the conversational layer can relay,
//! never as a panic or a silently empty render.
//!
//! ## Error policy
//!
//! Workbook-level and sheet-level problems are fatal to an ingestion pass
//! and surface as typed errors here. Row-level and member-level problems
//! (a joint row with a blank coordinate, a zero-length member) are
//! recovered: the offending row or member is skipped, logged, and recorded
//! in the snapshot's diagnostics list instead.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::errors::{ModelError, ModelResult};
//!
//! fn check_pressure(soil_pressure: f64) -> ModelResult<()> {
//!     if soil_pressure <= 0.0 {
//!         return Err(ModelError::invalid_parameter(
//!             "soil_pressure",
//!             soil_pressure.to_string(),
//!             "bearing pressure must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for frame_core operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Structured error type for ingestion and tool operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ModelError {
    /// A required sheet is absent from the uploaded workbook
    #[error("Missing required sheet: '{sheet}'")]
    MissingSheet { sheet: String },

    /// The workbook container itself could not be parsed
    #[error("Malformed workbook: {reason}")]
    MalformedWorkbook { reason: String },

    /// A sheet is present but lacks a column its consumer needs
    #[error("Sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// A filter matched zero rows (e.g. an unknown load case name).
    /// Surfaced to the caller as a user-facing message, not fatal.
    #[error("No data for {filter} '{value}'")]
    EmptyFilter { filter: String, value: String },

    /// A tool parameter is invalid (out of range, wrong sign, etc.)
    #[error("Invalid parameter '{name}': {value} - {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    /// File I/O error while opening a workbook from disk
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl ModelError {
    /// Create a MissingSheet error
    pub fn missing_sheet(sheet: impl Into<String>) -> Self {
        ModelError::MissingSheet {
            sheet: sheet.into(),
        }
    }

    /// Create a MalformedWorkbook error
    pub fn malformed_workbook(reason: impl Into<String>) -> Self {
        ModelError::MalformedWorkbook {
            reason: reason.into(),
        }
    }

    /// Create a MissingColumn error
    pub fn missing_column(sheet: impl Into<String>, column: impl Into<String>) -> Self {
        ModelError::MissingColumn {
            sheet: sheet.into(),
            column: column.into(),
        }
    }

    /// Create an EmptyFilter error
    pub fn empty_filter(filter: impl Into<String>, value: impl Into<String>) -> Self {
        ModelError::EmptyFilter {
            filter: filter.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidParameter error
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ModelError::InvalidParameter {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ModelError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error should be relayed as a conversational reply
    /// (as opposed to aborting the whole ingestion)
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ModelError::EmptyFilter { .. } | ModelError::InvalidParameter { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ModelError::MissingSheet { .. } => "MISSING_SHEET",
            ModelError::MalformedWorkbook { .. } => "MALFORMED_WORKBOOK",
            ModelError::MissingColumn { .. } => "MISSING_COLUMN",
            ModelError::EmptyFilter { .. } => "EMPTY_FILTER",
            ModelError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ModelError::FileError { .. } => "FILE_ERROR",
        }
    }
}
