//! Report errors.

use thiserror::Error;

/// Errors that can occur while resolving parameters or generating a report.
#[derive(Debug, Error)]
pub enum ReportError {
  /// A parameter template failed to render.
  #[error("failed to resolve parameter '{name}': {message}")]
  ParameterResolution { name: String, message: String },

  /// A resolved parameter does not parse as its declared type.
  #[error("parameter '{name}' expected {expected}, got '{value}'")]
  ParameterType {
    name: String,
    expected: &'static str,
    value: String,
  },

  /// The search result carried an error instead of rows.
  #[error("search failed: {0}")]
  SearchFailed(String),

  #[error("failed to write csv: {0}")]
  Csv(#[from] csv::Error),

  #[error("failed to write json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
